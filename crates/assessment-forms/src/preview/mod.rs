//! Preview engine
//!
//! Ephemeral interaction state for the rendered form: which sections are
//! expanded, what has been typed into each field, which indicators have
//! their upload panel switched on and which files are attached. The
//! [`FormDocument`] is only ever read here; everything is keyed by entity id
//! and thrown away when another document is loaded.
//!
//! Every transition is total. Limits in the upload policy (`maxFiles`,
//! `acceptedTypes`) are advisory and never enforced by the engine.

pub mod view;

pub use view::{FieldView, IndicatorView, PreviewView, SectionView, UploadPanel};

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::aggregates::{FormDocument, Indicator};
use crate::domain::value_objects::{FieldId, FileDescriptor, IndicatorId, SectionId};

/// Preview interaction state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewState {
    expanded_sections: HashSet<SectionId>,
    values: HashMap<FieldId, String>,
    files: HashMap<IndicatorId, Vec<FileDescriptor>>,
    upload_toggles: HashMap<IndicatorId, bool>,
}

impl PreviewState {
    /// Initial state: only the first section is expanded
    pub fn for_document(doc: &FormDocument) -> Self {
        let mut state = Self::default();
        if let Some(first) = doc.sections().first() {
            state.expanded_sections.insert(first.id().clone());
        }
        state
    }

    /// Discard everything and start over for a newly loaded document
    pub fn reload(&mut self, doc: &FormDocument) {
        *self = Self::for_document(doc);
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Flip membership of the section in the expanded set
    pub fn toggle_section(&mut self, section_id: &SectionId) {
        if !self.expanded_sections.remove(section_id) {
            self.expanded_sections.insert(section_id.clone());
        }
    }

    pub fn is_section_expanded(&self, section_id: &SectionId) -> bool {
        self.expanded_sections.contains(section_id)
    }

    pub fn expanded_sections(&self) -> &HashSet<SectionId> {
        &self.expanded_sections
    }

    // =========================================================================
    // Field values
    // =========================================================================

    /// Record a value; last write wins, no coercion
    pub fn set_field_value(&mut self, field_id: &FieldId, value: impl Into<String>) {
        self.values.insert(field_id.clone(), value.into());
    }

    pub fn field_value(&self, field_id: &FieldId) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    /// Number of fields with a captured entry, empty strings included
    pub fn filled_count(&self) -> usize {
        self.values.len()
    }

    // =========================================================================
    // Document uploads
    // =========================================================================

    pub fn toggle_document_upload(&mut self, indicator_id: &IndicatorId, enabled: bool) {
        self.upload_toggles.insert(indicator_id.clone(), enabled);
    }

    /// Toggle state; an indicator never toggled is off
    pub fn is_upload_toggled(&self, indicator_id: &IndicatorId) -> bool {
        self.upload_toggles.get(indicator_id).copied().unwrap_or(false)
    }

    /// Whether the picker area of an indicator is shown: the indicator must
    /// allow uploads and the operator must have switched the panel on
    pub fn is_upload_panel_open(&self, indicator: &Indicator) -> bool {
        indicator.document_upload().enabled && self.is_upload_toggled(indicator.id())
    }

    /// Append files to the indicator's list, creating it if needed
    pub fn attach_files<I>(&mut self, indicator_id: &IndicatorId, files: I)
    where
        I: IntoIterator<Item = FileDescriptor>,
    {
        self.files
            .entry(indicator_id.clone())
            .or_default()
            .extend(files);
    }

    /// Remove the file at `index`; out-of-range indices are ignored
    pub fn remove_file(&mut self, indicator_id: &IndicatorId, index: usize) {
        match self.files.get_mut(indicator_id) {
            Some(files) if index < files.len() => {
                files.remove(index);
            }
            _ => debug!(%indicator_id, index, "remove_file: no such file, ignoring"),
        }
    }

    pub fn files(&self, indicator_id: &IndicatorId) -> &[FileDescriptor] {
        self.files
            .get(indicator_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Completion percentage, 0..=100
///
/// Counts value entries against the total number of fields in the document.
/// An empty document is 0%. Entries left behind by deleted fields can push
/// the raw ratio past 100, so the result is clamped.
pub fn compute_progress(doc: &FormDocument, state: &PreviewState) -> u8 {
    let total = doc.total_field_count();
    if total == 0 {
        return 0;
    }
    let ratio = state.filled_count() as f64 / total as f64;
    (ratio * 100.0).round().min(100.0) as u8
}
