//! Builder configuration
//!
//! Defaults for new documents, loaded from TOML. Every section is optional.
//!
//! ```toml
//! [document]
//! title = "Water Utility Assessment"
//!
//! [settings]
//! max_file_size = 25
//! allowed_file_types = [".pdf", ".xlsx"]
//!
//! [indicator_upload]
//! max_files = 3
//!
//! [logging]
//! filter = "assessment_forms=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::aggregates::{DocumentUpload, FormSettings};
use crate::domain::services::settings_policy;
use crate::error::{FormsError, FormsResult};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub document: DocumentDefaults,
    pub settings: SettingsDefaults,
    pub indicator_upload: UploadDefaults,
    pub logging: LoggingConfig,
}

impl BuilderConfig {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> FormsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> FormsResult<Self> {
        toml::from_str(content).map_err(|e| FormsError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> FormsResult<String> {
        toml::to_string_pretty(self).map_err(|e| FormsError::Config(e.to_string()))
    }

    /// Settings for a new document, normalised through the settings policy
    pub fn form_settings(&self) -> FormSettings {
        let s = &self.settings;
        settings_policy::normalize(FormSettings {
            show_progress_bar: s.show_progress_bar,
            allow_file_uploads: s.allow_file_uploads,
            max_file_size: s.max_file_size,
            allowed_file_types: s.allowed_file_types.clone(),
            enable_auto_save: s.enable_auto_save,
            enable_validation: s.enable_validation,
        })
    }

    /// Upload policy given to newly added indicators
    pub fn indicator_upload(&self) -> DocumentUpload {
        let u = &self.indicator_upload;
        DocumentUpload {
            enabled: u.enabled,
            required: u.required,
            max_files: u.max_files,
            accepted_types: u.accepted_types.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDefaults {
    pub title: String,
    pub description: String,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            title: "Infrastructure Assessment Form".into(),
            description: "Complete assessment across all infrastructure sectors".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDefaults {
    pub show_progress_bar: bool,
    pub allow_file_uploads: bool,
    pub max_file_size: u32,
    pub allowed_file_types: Vec<String>,
    pub enable_auto_save: Option<bool>,
    pub enable_validation: Option<bool>,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        let settings = FormSettings::default();
        Self {
            show_progress_bar: settings.show_progress_bar,
            allow_file_uploads: settings.allow_file_uploads,
            max_file_size: settings.max_file_size,
            allowed_file_types: settings.allowed_file_types,
            enable_auto_save: settings.enable_auto_save,
            enable_validation: settings.enable_validation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadDefaults {
    pub enabled: bool,
    pub required: bool,
    pub max_files: Option<u32>,
    pub accepted_types: Option<Vec<String>>,
}

impl Default for UploadDefaults {
    fn default() -> Self {
        let upload = DocumentUpload::indicator_default();
        Self {
            enabled: upload.enabled,
            required: upload.required,
            max_files: upload.max_files,
            accepted_types: upload.accepted_types,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_builder() {
        let config = BuilderConfig::default();
        assert_eq!(config.document.title, "Infrastructure Assessment Form");
        assert_eq!(config.form_settings(), FormSettings::default());
        assert_eq!(config.indicator_upload(), DocumentUpload::indicator_default());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config = BuilderConfig::from_toml_str(
            r#"
            [settings]
            max_file_size = 25
            allowed_file_types = [".pdf", "xlsx", ".pdf"]

            [indicator_upload]
            max_files = 3
            "#,
        )
        .unwrap();

        let settings = config.form_settings();
        assert_eq!(settings.max_file_size(), 25);
        assert_eq!(settings.allowed_file_types(), [".pdf".to_string()]);
        assert!(settings.show_progress_bar());
        assert_eq!(config.indicator_upload().max_files, Some(3));
        assert_eq!(config.document, DocumentDefaults::default());
    }

    #[test]
    fn test_zero_size_is_normalised() {
        let config = BuilderConfig::from_toml_str("[settings]\nmax_file_size = 0\n").unwrap();
        assert_eq!(config.form_settings().max_file_size(), FormSettings::DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            BuilderConfig::from_toml_str("[settings\n"),
            Err(FormsError::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[document]\ntitle = \"Grid Audit\"").unwrap();

        let config = BuilderConfig::load(file.path()).unwrap();
        assert_eq!(config.document.title, "Grid Audit");

        let missing = BuilderConfig::load("/nonexistent/assessment-forms.toml").unwrap();
        assert_eq!(missing, BuilderConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BuilderConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(BuilderConfig::from_toml_str(&text).unwrap(), config);
    }
}
