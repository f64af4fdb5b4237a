//! Domain Events
//!
//! Raised by the builder session after an authoring action completes. The
//! UI layer turns them into notifications through [`BuilderEvent::notice`];
//! delivering those is not this crate's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FieldId, FormId, IndicatorId, SectionId};

/// Event envelope: unique id and time of occurrence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    pub fn new() -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// All domain events of the form builder
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuilderEvent {
    SectionAdded {
        metadata: EventMetadata,
        section_id: SectionId,
    },
    SectionDeleted {
        metadata: EventMetadata,
        section_id: SectionId,
    },
    IndicatorAdded {
        metadata: EventMetadata,
        section_id: SectionId,
        indicator_id: IndicatorId,
    },
    IndicatorDeleted {
        metadata: EventMetadata,
        section_id: SectionId,
        indicator_id: IndicatorId,
    },
    FieldAdded {
        metadata: EventMetadata,
        indicator_id: IndicatorId,
        field_id: FieldId,
    },
    FieldDeleted {
        metadata: EventMetadata,
        indicator_id: IndicatorId,
        field_id: FieldId,
    },
    DocumentLoaded {
        metadata: EventMetadata,
        form_id: FormId,
    },
    FormSaved {
        metadata: EventMetadata,
        form_id: FormId,
    },
    FormExported {
        metadata: EventMetadata,
        form_id: FormId,
        file_name: String,
    },
}

/// User-facing notification text for an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
    pub destructive: bool,
}

impl BuilderEvent {
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            Self::SectionAdded { metadata, .. }
            | Self::SectionDeleted { metadata, .. }
            | Self::IndicatorAdded { metadata, .. }
            | Self::IndicatorDeleted { metadata, .. }
            | Self::FieldAdded { metadata, .. }
            | Self::FieldDeleted { metadata, .. }
            | Self::DocumentLoaded { metadata, .. }
            | Self::FormSaved { metadata, .. }
            | Self::FormExported { metadata, .. } => metadata,
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SectionAdded { .. } => "section.added",
            Self::SectionDeleted { .. } => "section.deleted",
            Self::IndicatorAdded { .. } => "indicator.added",
            Self::IndicatorDeleted { .. } => "indicator.deleted",
            Self::FieldAdded { .. } => "field.added",
            Self::FieldDeleted { .. } => "field.deleted",
            Self::DocumentLoaded { .. } => "form.loaded",
            Self::FormSaved { .. } => "form.saved",
            Self::FormExported { .. } => "form.exported",
        }
    }

    /// Notification to show the operator, if this event warrants one
    pub fn notice(&self) -> Option<Notice> {
        let notice = match self {
            Self::SectionAdded { .. } => Notice {
                title: "Section Added",
                description: "New section has been added to your form.",
                destructive: false,
            },
            Self::SectionDeleted { .. } => Notice {
                title: "Section Deleted",
                description: "Section has been removed from your form.",
                destructive: true,
            },
            Self::FormSaved { .. } => Notice {
                title: "Form Saved",
                description: "Your form has been saved successfully.",
                destructive: false,
            },
            Self::FormExported { .. } => Notice {
                title: "Form Exported",
                description: "Form configuration has been downloaded as JSON.",
                destructive: false,
            },
            _ => return None,
        };
        Some(notice)
    }
}
