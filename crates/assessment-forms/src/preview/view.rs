//! Preview view model
//!
//! Read-only projection of a document plus its preview state into what the
//! renderer draws. Borrows from both; build a fresh one after each change.

use super::{compute_progress, PreviewState};
use crate::domain::aggregates::{FormDocument, FormField, Indicator, Section};
use crate::domain::value_objects::FileDescriptor;

#[derive(Debug)]
pub struct PreviewView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// `None` when the progress bar is switched off in settings
    pub progress: Option<u8>,
    pub sections: Vec<SectionView<'a>>,
}

#[derive(Debug)]
pub struct SectionView<'a> {
    pub section: &'a Section,
    /// `"{position}. {title}"`, 1-based
    pub heading: String,
    pub expanded: bool,
    /// Empty while the section is collapsed
    pub indicators: Vec<IndicatorView<'a>>,
}

#[derive(Debug)]
pub struct IndicatorView<'a> {
    pub indicator: &'a Indicator,
    pub fields: Vec<FieldView<'a>>,
    /// Present when the indicator accepts documents at all
    pub upload: Option<UploadPanel<'a>>,
}

#[derive(Debug)]
pub struct FieldView<'a> {
    pub field: &'a FormField,
    pub value: Option<&'a str>,
}

#[derive(Debug)]
pub struct UploadPanel<'a> {
    /// Operator switch; the picker is only shown while on
    pub open: bool,
    pub required: bool,
    /// File-picker filter, e.g. `".pdf,.docx"`
    pub accept: String,
    pub files: &'a [FileDescriptor],
    pub remaining_slots: Option<usize>,
}

impl<'a> PreviewView<'a> {
    pub fn build(doc: &'a FormDocument, state: &'a PreviewState) -> Self {
        let progress = doc
            .settings()
            .show_progress_bar()
            .then(|| compute_progress(doc, state));

        let sections = doc
            .sections()
            .iter()
            .enumerate()
            .map(|(position, section)| SectionView::build(position, section, state))
            .collect();

        Self {
            title: doc.title(),
            description: doc.description(),
            progress,
            sections,
        }
    }
}

impl<'a> SectionView<'a> {
    fn build(position: usize, section: &'a Section, state: &'a PreviewState) -> Self {
        let expanded = state.is_section_expanded(section.id());
        let indicators = if expanded {
            section
                .indicators()
                .iter()
                .map(|indicator| IndicatorView::build(indicator, state))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            section,
            heading: format!("{}. {}", position + 1, section.title()),
            expanded,
            indicators,
        }
    }
}

impl<'a> IndicatorView<'a> {
    fn build(indicator: &'a Indicator, state: &'a PreviewState) -> Self {
        let fields = indicator
            .fields()
            .iter()
            .map(|field| FieldView {
                field,
                value: state.field_value(field.id()),
            })
            .collect();

        let policy = indicator.document_upload();
        let upload = policy.enabled.then(|| {
            let files = state.files(indicator.id());
            UploadPanel {
                open: state.is_upload_panel_open(indicator),
                required: policy.required,
                accept: policy.accept_attribute(),
                files,
                remaining_slots: policy.remaining_slots(files.len()),
            }
        });

        Self {
            indicator,
            fields,
            upload,
        }
    }
}
