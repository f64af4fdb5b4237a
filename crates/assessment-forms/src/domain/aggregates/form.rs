//! Form document aggregate root
//!
//! The single document edited in a session. Exclusively owns its sections,
//! which own their indicators, which own their fields: the tree is strictly
//! hierarchical and never shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::field::FormField;
use super::indicator::Indicator;
use super::section::Section;
use crate::domain::value_objects::{FieldId, FormId, IndicatorId, SectionId};
use crate::error::{FormsError, FormsResult};

/// Form document aggregate root
///
/// # Invariants
/// - Section ids are unique within the document
/// - Indicator ids are unique within their section
/// - Field ids are unique within their indicator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub(crate) id: FormId,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) sections: Vec<Section>,
    pub(crate) settings: FormSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl FormDocument {
    /// Create an empty document
    pub fn new(
        id: FormId,
        title: impl Into<String>,
        description: impl Into<String>,
        settings: FormSettings,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            sections: Vec::new(),
            settings,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn id(&self) -> &FormId { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> &str { &self.description }
    pub fn sections(&self) -> &[Section] { &self.sections }
    pub fn settings(&self) -> &FormSettings { &self.settings }
    pub fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
    pub fn updated_at(&self) -> Option<DateTime<Utc>> { self.updated_at }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Zero-based position of a section, used for serial numbering
    pub fn section_position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn indicator(&self, section_id: &SectionId, indicator_id: &IndicatorId) -> Option<&Indicator> {
        self.section(section_id)?.indicator(indicator_id)
    }

    /// Find an indicator anywhere in the document
    pub fn find_indicator(&self, id: &IndicatorId) -> Option<&Indicator> {
        self.indicators().find(|i| &i.id == id)
    }

    /// Find a field anywhere in the document
    pub fn find_field(&self, id: &FieldId) -> Option<&FormField> {
        self.fields().find(|f| &f.id == id)
    }

    pub fn indicators(&self) -> impl Iterator<Item = &Indicator> {
        self.sections.iter().flat_map(|s| s.indicators.iter())
    }

    /// All fields in display order
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.indicators().flat_map(|i| i.fields.iter())
    }

    /// Total number of fields across every section and indicator
    pub fn total_field_count(&self) -> usize {
        self.sections.iter().map(Section::field_count).sum()
    }

    /// Check the structural invariants of an externally supplied document
    pub fn validate(&self) -> FormsResult<()> {
        let mut section_ids = HashSet::new();
        for section in &self.sections {
            if !section_ids.insert(&section.id) {
                return Err(invalid(format!("duplicate section id {}", section.id)));
            }

            let mut indicator_ids = HashSet::new();
            for indicator in &section.indicators {
                if !indicator_ids.insert(&indicator.id) {
                    return Err(invalid(format!(
                        "duplicate indicator id {} in section {}",
                        indicator.id, section.id
                    )));
                }

                let mut field_ids = HashSet::new();
                for field in &indicator.fields {
                    if !field_ids.insert(&field.id) {
                        return Err(invalid(format!(
                            "duplicate field id {} in indicator {}",
                            field.id, indicator.id
                        )));
                    }
                }
            }
        }

        self.settings.validate()
    }
}

fn invalid(reason: String) -> FormsError {
    FormsError::InvalidDocument(reason)
}

/// Global form settings
///
/// # Invariants
/// - `max_file_size` (MB) is at least 1
/// - `allowed_file_types` holds no duplicates and every entry starts with '.'
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub(crate) show_progress_bar: bool,
    pub(crate) allow_file_uploads: bool,
    pub(crate) max_file_size: u32,
    pub(crate) allowed_file_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) enable_auto_save: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) enable_validation: Option<bool>,
}

impl FormSettings {
    pub const DEFAULT_MAX_FILE_SIZE: u32 = 10;

    pub fn show_progress_bar(&self) -> bool { self.show_progress_bar }
    pub fn allow_file_uploads(&self) -> bool { self.allow_file_uploads }
    pub fn max_file_size(&self) -> u32 { self.max_file_size }
    pub fn allowed_file_types(&self) -> &[String] { &self.allowed_file_types }
    pub fn enable_auto_save(&self) -> bool { self.enable_auto_save.unwrap_or(false) }
    pub fn enable_validation(&self) -> bool { self.enable_validation.unwrap_or(false) }

    pub fn allows_file_type(&self, ext: &str) -> bool {
        self.allowed_file_types.iter().any(|t| t == ext)
    }

    pub(crate) fn validate(&self) -> FormsResult<()> {
        if self.max_file_size == 0 {
            return Err(invalid("maxFileSize must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for ext in &self.allowed_file_types {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(FormsError::InvalidFileType(ext.clone()));
            }
            if !seen.insert(ext) {
                return Err(invalid(format!("duplicate allowed file type {}", ext)));
            }
        }
        Ok(())
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            show_progress_bar: true,
            allow_file_uploads: true,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_file_types: [".pdf", ".doc", ".docx", ".jpg", ".png", ".xlsx", ".csv"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            enable_auto_save: None,
            enable_validation: None,
        }
    }
}
