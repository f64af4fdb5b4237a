//! Tree editor
//!
//! Pure transformations over a [`FormDocument`]: every operation takes the
//! current document and returns the next one, leaving the input untouched.
//! A target id that is not in its parent's child list is a stale reference
//! and the document comes back unchanged. Surviving siblings keep their ids
//! and their relative order.

use std::fmt;
use tracing::debug;

use crate::domain::aggregates::{
    DocumentUpload, FieldKind, FieldValidation, FormDocument, FormField, FormSettings, Indicator,
    IndicatorStatus, Section,
};
use crate::domain::value_objects::{FieldId, IdSource, IndicatorId, SectionId};

/// Change to the document's own properties
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentPatch {
    Title(String),
    Description(String),
}

/// Change to one section's own properties
#[derive(Clone, Debug, PartialEq)]
pub enum SectionPatch {
    Title(String),
    Description(String),
    Collapsible(bool),
    Expanded(bool),
}

/// Change to one indicator's own properties
#[derive(Clone, Debug, PartialEq)]
pub enum IndicatorPatch {
    Title(String),
    Description(String),
    RequiredDocs(String),
    Status(IndicatorStatus),
    Upload(UploadPatch),
}

/// Change to an indicator's document-upload policy
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadPatch {
    Enabled(bool),
    Required(bool),
    MaxFiles(Option<u32>),
    AcceptedTypes(Option<Vec<String>>),
}

/// Change to one field
///
/// Switching to a select goes through [`FieldKind::select`], so a select
/// field always carries options.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldPatch {
    Label(String),
    Kind(FieldKind),
    Required(bool),
    Placeholder(Option<String>),
    Validation(Option<FieldValidation>),
}

impl DocumentPatch {
    fn apply(self, doc: &mut FormDocument) {
        match self {
            Self::Title(title) => doc.title = title,
            Self::Description(description) => doc.description = description,
        }
    }
}

impl SectionPatch {
    fn apply(self, section: &mut Section) {
        match self {
            Self::Title(title) => section.title = title,
            Self::Description(description) => section.description = description,
            Self::Collapsible(collapsible) => section.is_collapsible = collapsible,
            Self::Expanded(expanded) => section.is_expanded = expanded,
        }
    }
}

impl IndicatorPatch {
    fn apply(self, indicator: &mut Indicator) {
        match self {
            Self::Title(title) => indicator.title = title,
            Self::Description(description) => indicator.description = description,
            Self::RequiredDocs(docs) => indicator.required_docs = docs,
            Self::Status(status) => indicator.status = status,
            Self::Upload(patch) => patch.apply(&mut indicator.document_upload),
        }
    }
}

impl UploadPatch {
    fn apply(self, upload: &mut DocumentUpload) {
        match self {
            Self::Enabled(enabled) => upload.enabled = enabled,
            Self::Required(required) => upload.required = required,
            Self::MaxFiles(max_files) => upload.max_files = max_files,
            Self::AcceptedTypes(types) => upload.accepted_types = types,
        }
    }
}

impl FieldPatch {
    fn apply(self, field: &mut FormField) {
        match self {
            Self::Label(label) => field.label = label,
            Self::Kind(kind) => field.kind = kind,
            Self::Required(required) => field.required = required,
            Self::Placeholder(placeholder) => field.placeholder = placeholder,
            Self::Validation(validation) => field.validation = validation,
        }
    }
}

// =============================================================================
// Document
// =============================================================================

pub fn update_document(doc: &FormDocument, patch: DocumentPatch) -> FormDocument {
    let mut next = doc.clone();
    patch.apply(&mut next);
    next
}

/// Swap in new settings (produced by the settings policy)
pub fn replace_settings(doc: &FormDocument, settings: FormSettings) -> FormDocument {
    let mut next = doc.clone();
    next.settings = settings;
    next
}

// =============================================================================
// Sections
// =============================================================================

/// Append a section titled `"Section {n+1}"`, collapsible and collapsed
pub fn add_section(doc: &FormDocument, ids: &dyn IdSource) -> FormDocument {
    let mut next = doc.clone();
    let title = format!("Section {}", next.sections.len() + 1);
    let id = fresh_id(|| SectionId::generate(ids), |id| next.section(id).is_some());
    next.sections.push(Section::new(id, title));
    next
}

pub fn update_section(doc: &FormDocument, section_id: &SectionId, patch: SectionPatch) -> FormDocument {
    let mut next = doc.clone();
    match section_mut(&mut next, section_id) {
        Some(section) => patch.apply(section),
        None => debug!(%section_id, "update_section: unknown section, ignoring"),
    }
    next
}

/// Remove a section together with all its indicators and fields
pub fn delete_section(doc: &FormDocument, section_id: &SectionId) -> FormDocument {
    let mut next = doc.clone();
    let before = next.sections.len();
    next.sections.retain(|s| &s.id != section_id);
    if next.sections.len() == before {
        debug!(%section_id, "delete_section: unknown section, ignoring");
    }
    next
}

// =============================================================================
// Indicators
// =============================================================================

/// Append an indicator with the default upload policy
pub fn add_indicator(doc: &FormDocument, section_id: &SectionId, ids: &dyn IdSource) -> FormDocument {
    add_indicator_with(doc, section_id, ids, &DocumentUpload::indicator_default())
}

/// Append an indicator with two required numeric fields and the given
/// upload policy. The serial number `"{section}.{indicator}"` reflects
/// positions at creation time and is never recomputed.
pub fn add_indicator_with(
    doc: &FormDocument,
    section_id: &SectionId,
    ids: &dyn IdSource,
    upload: &DocumentUpload,
) -> FormDocument {
    let mut next = doc.clone();
    let Some(position) = next.section_position(section_id) else {
        debug!(%section_id, "add_indicator: unknown section, ignoring");
        return next;
    };

    let id = fresh_id(|| IndicatorId::generate(ids), |id| next.find_indicator(id).is_some());
    let first = fresh_id(|| FieldId::generate(ids), |id| next.find_field(id).is_some());
    let second = fresh_id(
        || FieldId::generate(ids),
        |id| id == &first || next.find_field(id).is_some(),
    );

    let section = &mut next.sections[position];
    let serial_number = format!("{}.{}", position + 1, section.indicators.len() + 1);
    let indicator = Indicator::new(id, serial_number, "New Indicator")
        .with_description("Indicator description")
        .with_required_docs("Required documents")
        .with_field(FormField::numbered_value(first, 1))
        .with_field(FormField::numbered_value(second, 2))
        .with_document_upload(upload.clone());

    section.indicators.push(indicator);
    next
}

pub fn update_indicator(
    doc: &FormDocument,
    section_id: &SectionId,
    indicator_id: &IndicatorId,
    patch: IndicatorPatch,
) -> FormDocument {
    let mut next = doc.clone();
    match indicator_mut(&mut next, section_id, indicator_id) {
        Some(indicator) => patch.apply(indicator),
        None => debug!(%section_id, %indicator_id, "update_indicator: unknown indicator, ignoring"),
    }
    next
}

/// Remove an indicator together with its fields
pub fn delete_indicator(doc: &FormDocument, section_id: &SectionId, indicator_id: &IndicatorId) -> FormDocument {
    let mut next = doc.clone();
    let removed = match section_mut(&mut next, section_id) {
        Some(section) => {
            let before = section.indicators.len();
            section.indicators.retain(|i| &i.id != indicator_id);
            section.indicators.len() != before
        }
        None => false,
    };
    if !removed {
        debug!(%section_id, %indicator_id, "delete_indicator: unknown indicator, ignoring");
    }
    next
}

// =============================================================================
// Fields
// =============================================================================

/// Append a required numeric field numbered after the current field count
pub fn add_field(
    doc: &FormDocument,
    section_id: &SectionId,
    indicator_id: &IndicatorId,
    ids: &dyn IdSource,
) -> FormDocument {
    let mut next = doc.clone();
    let id = fresh_id(|| FieldId::generate(ids), |id| doc.find_field(id).is_some());
    match indicator_mut(&mut next, section_id, indicator_id) {
        Some(indicator) => {
            let n = indicator.fields.len() + 1;
            indicator.fields.push(FormField::numbered_value(id, n));
        }
        None => debug!(%section_id, %indicator_id, "add_field: unknown indicator, ignoring"),
    }
    next
}

pub fn update_field(
    doc: &FormDocument,
    section_id: &SectionId,
    indicator_id: &IndicatorId,
    field_id: &FieldId,
    patch: FieldPatch,
) -> FormDocument {
    let mut next = doc.clone();
    let field = indicator_mut(&mut next, section_id, indicator_id)
        .and_then(|i| i.fields.iter_mut().find(|f| &f.id == field_id));
    match field {
        Some(field) => patch.apply(field),
        None => debug!(%indicator_id, %field_id, "update_field: unknown field, ignoring"),
    }
    next
}

pub fn delete_field(
    doc: &FormDocument,
    section_id: &SectionId,
    indicator_id: &IndicatorId,
    field_id: &FieldId,
) -> FormDocument {
    let mut next = doc.clone();
    let removed = match indicator_mut(&mut next, section_id, indicator_id) {
        Some(indicator) => {
            let before = indicator.fields.len();
            indicator.fields.retain(|f| &f.id != field_id);
            indicator.fields.len() != before
        }
        None => false,
    };
    if !removed {
        debug!(%indicator_id, %field_id, "delete_field: unknown field, ignoring");
    }
    next
}

/// Mint ids until one is not already taken. Loaded documents may carry ids
/// the session's source has handed out before.
fn fresh_id<T: fmt::Display>(mut mint: impl FnMut() -> T, taken: impl Fn(&T) -> bool) -> T {
    loop {
        let id = mint();
        if !taken(&id) {
            return id;
        }
        debug!(%id, "minted id already in use, minting another");
    }
}

fn section_mut<'a>(doc: &'a mut FormDocument, id: &SectionId) -> Option<&'a mut Section> {
    doc.sections.iter_mut().find(|s| &s.id == id)
}

fn indicator_mut<'a>(
    doc: &'a mut FormDocument,
    section_id: &SectionId,
    indicator_id: &IndicatorId,
) -> Option<&'a mut Indicator> {
    section_mut(doc, section_id)?
        .indicators
        .iter_mut()
        .find(|i| &i.id == indicator_id)
}
