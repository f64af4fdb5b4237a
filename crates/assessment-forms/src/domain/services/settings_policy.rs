//! Settings policy
//!
//! Validates and mutates the global upload allowlist and size limit. Invalid
//! input never errors: the previous settings come back unchanged and the
//! presentation boundary is responsible for guiding the operator.

use tracing::debug;

use crate::domain::aggregates::FormSettings;

/// Quick-add extensions offered by the settings screen
pub const COMMON_FILE_TYPES: [&str; 11] = [
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".jpg", ".jpeg", ".png", ".gif", ".txt", ".csv",
];

/// Boolean toggles of the settings screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsPatch {
    ShowProgressBar(bool),
    AllowFileUploads(bool),
    EnableAutoSave(bool),
    EnableValidation(bool),
}

/// Add an extension to the allowlist
///
/// Surrounding whitespace is ignored. The extension must start with `.` and
/// name something after it; empty, dotless or already-present values leave
/// the settings unchanged.
pub fn add_file_type(settings: &FormSettings, ext: &str) -> FormSettings {
    let mut next = settings.clone();
    let ext = ext.trim();
    if !is_extension(ext) {
        debug!(ext, "add_file_type: not an extension, ignoring");
        return next;
    }
    if !next.allows_file_type(ext) {
        next.allowed_file_types.push(ext.to_string());
    }
    next
}

/// Remove an extension; surrounding whitespace is ignored as in `add_file_type`
pub fn remove_file_type(settings: &FormSettings, ext: &str) -> FormSettings {
    let mut next = settings.clone();
    let ext = ext.trim();
    next.allowed_file_types.retain(|t| t != ext);
    next
}

/// Set the per-file size limit in MB; non-positive values are rejected
pub fn set_max_file_size(settings: &FormSettings, size_mb: i64) -> FormSettings {
    let mut next = settings.clone();
    match u32::try_from(size_mb) {
        Ok(size) if size >= 1 => next.max_file_size = size,
        _ => debug!(size_mb, "set_max_file_size: rejected, keeping previous value"),
    }
    next
}

/// Set the size limit from raw text input; non-numeric text is rejected
pub fn set_max_file_size_from_input(settings: &FormSettings, input: &str) -> FormSettings {
    match input.trim().parse::<i64>() {
        Ok(size_mb) => set_max_file_size(settings, size_mb),
        Err(_) => {
            debug!(input, "set_max_file_size: not a number, keeping previous value");
            settings.clone()
        }
    }
}

pub fn apply_settings_patch(settings: &FormSettings, patch: SettingsPatch) -> FormSettings {
    let mut next = settings.clone();
    match patch {
        SettingsPatch::ShowProgressBar(on) => next.show_progress_bar = on,
        SettingsPatch::AllowFileUploads(on) => next.allow_file_uploads = on,
        SettingsPatch::EnableAutoSave(on) => next.enable_auto_save = Some(on),
        SettingsPatch::EnableValidation(on) => next.enable_validation = Some(on),
    }
    next
}

/// Common extensions not yet in the allowlist, in quick-add order
pub fn suggested_file_types(settings: &FormSettings) -> Vec<&'static str> {
    COMMON_FILE_TYPES
        .iter()
        .copied()
        .filter(|t| !settings.allows_file_type(t))
        .collect()
}

/// Bring arbitrary settings back within the invariants: drops dotless and
/// duplicate extensions (first occurrence wins) and resets a zero size
/// limit to the default.
pub fn normalize(settings: FormSettings) -> FormSettings {
    let mut next = FormSettings {
        allowed_file_types: Vec::with_capacity(settings.allowed_file_types.len()),
        ..settings.clone()
    };
    for ext in &settings.allowed_file_types {
        next = add_file_type(&next, ext);
    }
    if next.max_file_size == 0 {
        next.max_file_size = FormSettings::DEFAULT_MAX_FILE_SIZE;
    }
    next
}

fn is_extension(ext: &str) -> bool {
    ext.len() > 1 && ext.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_type() {
        let settings = FormSettings::default();
        let next = add_file_type(&settings, ".txt");
        assert_eq!(next.allowed_file_types().last().map(String::as_str), Some(".txt"));
        assert_eq!(next.allowed_file_types().len(), settings.allowed_file_types().len() + 1);
    }

    #[test]
    fn test_add_file_type_rejects_junk() {
        let settings = FormSettings::default();
        assert_eq!(add_file_type(&settings, ""), settings);
        assert_eq!(add_file_type(&settings, "   "), settings);
        assert_eq!(add_file_type(&settings, "."), settings);
        assert_eq!(add_file_type(&settings, "txt"), settings);
        assert_eq!(add_file_type(&settings, ".pdf"), settings);
    }

    #[test]
    fn test_add_file_type_idempotent() {
        let settings = FormSettings::default();
        let once = add_file_type(&settings, ".gif");
        let twice = add_file_type(&once, ".gif");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_file_type() {
        let settings = FormSettings::default();
        let next = remove_file_type(&settings, ".pdf");
        assert!(!next.allows_file_type(".pdf"));
        assert_eq!(remove_file_type(&next, ".pdf"), next);
    }

    #[test]
    fn test_remove_undoes_padded_add() {
        let settings = FormSettings::default();
        let added = add_file_type(&settings, " .txt ");
        assert!(added.allows_file_type(".txt"));
        assert_eq!(remove_file_type(&added, " .txt "), settings);
    }

    #[test]
    fn test_set_max_file_size() {
        let settings = FormSettings::default();
        assert_eq!(set_max_file_size(&settings, 25).max_file_size(), 25);
        assert_eq!(set_max_file_size(&settings, 0).max_file_size(), 10);
        assert_eq!(set_max_file_size(&settings, -3).max_file_size(), 10);
        assert_eq!(set_max_file_size(&settings, i64::MAX).max_file_size(), 10);
        // Upper clamping is the UI's job
        assert_eq!(set_max_file_size(&settings, 500).max_file_size(), 500);
    }

    #[test]
    fn test_set_max_file_size_from_input() {
        let settings = FormSettings::default();
        assert_eq!(set_max_file_size_from_input(&settings, " 42 ").max_file_size(), 42);
        assert_eq!(set_max_file_size_from_input(&settings, "abc"), settings);
        assert_eq!(set_max_file_size_from_input(&settings, ""), settings);
    }

    #[test]
    fn test_settings_patch() {
        let settings = FormSettings::default();
        let next = apply_settings_patch(&settings, SettingsPatch::EnableAutoSave(true));
        assert!(next.enable_auto_save());
        let next = apply_settings_patch(&next, SettingsPatch::ShowProgressBar(false));
        assert!(!next.show_progress_bar());
    }

    #[test]
    fn test_suggested_file_types() {
        let suggested = suggested_file_types(&FormSettings::default());
        assert_eq!(suggested, vec![".xls", ".jpeg", ".gif", ".txt"]);
    }

    #[test]
    fn test_normalize() {
        let mut settings = FormSettings::default();
        settings.allowed_file_types = vec![".pdf".into(), "doc".into(), ".pdf".into(), ".csv".into()];
        settings.max_file_size = 0;

        let next = normalize(settings);
        assert_eq!(next.allowed_file_types(), [".pdf".to_string(), ".csv".to_string()]);
        assert_eq!(next.max_file_size(), FormSettings::DEFAULT_MAX_FILE_SIZE);
        assert!(next.validate().is_ok());
    }
}
