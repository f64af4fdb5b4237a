//! Indicator entity
//!
//! An assessable checkpoint within a section. Owns its fields (in authoring
//! order, which is also display order) and its document-upload policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::FormField;
use crate::domain::value_objects::{FieldId, FileDescriptor, IndicatorId};

/// Indicator (entity within the Section aggregate)
///
/// # Invariants
/// - Field ids are unique within the indicator
/// - `serial_number` is fixed at creation, never recomputed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub(crate) id: IndicatorId,
    pub(crate) serial_number: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) required_docs: String,
    pub(crate) status: IndicatorStatus,
    pub(crate) fields: Vec<FormField>,
    pub(crate) document_upload: DocumentUpload,
}

impl Indicator {
    /// Create an empty pending indicator with uploads disabled
    pub fn new(id: IndicatorId, serial_number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            serial_number: serial_number.into(),
            title: title.into(),
            description: String::new(),
            required_docs: String::new(),
            status: IndicatorStatus::Pending,
            fields: Vec::new(),
            document_upload: DocumentUpload::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_required_docs(mut self, required_docs: impl Into<String>) -> Self {
        self.required_docs = required_docs.into();
        self
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_document_upload(mut self, upload: DocumentUpload) -> Self {
        self.document_upload = upload;
        self
    }

    pub fn id(&self) -> &IndicatorId { &self.id }
    pub fn serial_number(&self) -> &str { &self.serial_number }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> &str { &self.description }
    pub fn required_docs(&self) -> &str { &self.required_docs }
    pub fn status(&self) -> IndicatorStatus { self.status }
    pub fn fields(&self) -> &[FormField] { &self.fields }
    pub fn document_upload(&self) -> &DocumentUpload { &self.document_upload }

    pub fn field(&self, id: &FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| &f.id == id)
    }
}

/// Review status of an indicator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorStatus {
    #[default]
    Pending,
    Completed,
    Error,
    Required,
}

impl IndicatorStatus {
    pub const ALL: [IndicatorStatus; 4] = [
        IndicatorStatus::Pending,
        IndicatorStatus::Completed,
        IndicatorStatus::Error,
        IndicatorStatus::Required,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Required => "required",
        }
    }
}

impl fmt::Display for IndicatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document-upload policy of an indicator
///
/// `max_files` and `accepted_types` are advisory: the preview hands them to
/// the file picker but never rejects an attachment because of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub enabled: bool,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_files: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_types: Option<Vec<String>>,
}

impl DocumentUpload {
    /// Policy given to every newly added indicator
    pub fn indicator_default() -> Self {
        Self {
            enabled: true,
            required: false,
            max_files: Some(5),
            accepted_types: Some(
                [".pdf", ".doc", ".docx", ".jpg", ".png"]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            ),
        }
    }

    /// File-picker filter: accepted types joined with `,` (empty = any)
    pub fn accept_attribute(&self) -> String {
        self.accepted_types
            .as_deref()
            .map(|types| types.join(","))
            .unwrap_or_default()
    }

    /// Whether the file's extension is in the accepted list (advisory)
    pub fn accepts(&self, file: &FileDescriptor) -> bool {
        match self.accepted_types.as_deref() {
            None | Some([]) => true,
            Some(types) => file
                .extension()
                .map(|ext| types.iter().any(|t| t.eq_ignore_ascii_case(&ext)))
                .unwrap_or(false),
        }
    }

    /// Slots left before `max_files` is reached; `None` when unbounded
    pub fn remaining_slots(&self, attached: usize) -> Option<usize> {
        self.max_files
            .map(|max| (max as usize).saturating_sub(attached))
    }
}
