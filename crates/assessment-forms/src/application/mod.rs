//! Application layer
//!
//! [`FormBuilderSession`] is the single-document session the UI talks to.
//! Authoring actions run through the pure tree editor and settings policy
//! and replace the current document; preview actions update the preview
//! state. Actions aimed at ids the document no longer has are dropped.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::BuilderConfig;
use crate::domain::aggregates::{DocumentUpload, FormDocument};
use crate::domain::events::{BuilderEvent, EventMetadata};
use crate::domain::services::editor::{
    self, DocumentPatch, FieldPatch, IndicatorPatch, SectionPatch,
};
use crate::domain::services::settings_policy::{self, SettingsPatch};
use crate::domain::value_objects::{FieldId, FileDescriptor, FormId, IdSource, IndicatorId, SectionId};
use crate::error::FormsResult;
use crate::export::{self, ExportPayload};
use crate::ports::outbound::FormRepository;
use crate::preview::{compute_progress, PreviewState, PreviewView};

pub struct FormBuilderSession {
    document: FormDocument,
    preview: PreviewState,
    ids: Arc<dyn IdSource>,
    repository: Arc<dyn FormRepository>,
    upload_defaults: DocumentUpload,
    events: Vec<BuilderEvent>,
}

impl FormBuilderSession {
    /// Start a session on a fresh, empty document built from config defaults
    pub fn new(
        config: &BuilderConfig,
        ids: Arc<dyn IdSource>,
        repository: Arc<dyn FormRepository>,
    ) -> Self {
        let mut document = FormDocument::new(
            FormId::generate(ids.as_ref()),
            config.document.title.clone(),
            config.document.description.clone(),
            config.form_settings(),
        );
        document.created_at = Some(Utc::now());
        let preview = PreviewState::for_document(&document);

        Self {
            document,
            preview,
            ids,
            repository,
            upload_defaults: config.indicator_upload(),
            events: Vec::new(),
        }
    }

    pub fn document(&self) -> &FormDocument { &self.document }
    pub fn preview(&self) -> &PreviewState { &self.preview }

    pub fn progress(&self) -> u8 {
        compute_progress(&self.document, &self.preview)
    }

    pub fn view(&self) -> PreviewView<'_> {
        PreviewView::build(&self.document, &self.preview)
    }

    /// Drain events raised since the last call
    pub fn take_events(&mut self) -> Vec<BuilderEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Document lifecycle
    // =========================================================================

    /// Replace the edited document; preview state starts over
    pub fn load_document(&mut self, document: FormDocument) {
        info!(form_id = %document.id(), "loading form document");
        self.preview.reload(&document);
        self.events.push(BuilderEvent::DocumentLoaded {
            metadata: EventMetadata::new(),
            form_id: document.id().clone(),
        });
        self.document = document;
    }

    /// Parse, validate and load an exported document
    pub fn import_json(&mut self, json: &str) -> FormsResult<()> {
        let document = export::from_json(json)?;
        self.load_document(document);
        Ok(())
    }

    /// Load a stored document; returns false if the store has no such id
    pub async fn open(&mut self, id: &FormId) -> FormsResult<bool> {
        match self.repository.load(id).await? {
            Some(document) => {
                self.load_document(document);
                Ok(true)
            }
            None => {
                debug!(form_id = %id, "open: no stored document");
                Ok(false)
            }
        }
    }

    /// Persist the current document through the repository port
    pub async fn save(&mut self) -> FormsResult<()> {
        let mut document = self.document.clone();
        document.updated_at = Some(Utc::now());
        self.repository.save(&document).await?;

        info!(form_id = %document.id(), sections = document.sections().len(), "form saved");
        self.events.push(BuilderEvent::FormSaved {
            metadata: EventMetadata::new(),
            form_id: document.id().clone(),
        });
        self.document = document;
        Ok(())
    }

    /// Build the export payload for the current document
    pub fn export(&mut self) -> FormsResult<ExportPayload> {
        let payload = ExportPayload::build(&self.document)?;
        info!(form_id = %self.document.id(), file_name = %payload.file_name, "form exported");
        self.events.push(BuilderEvent::FormExported {
            metadata: EventMetadata::new(),
            form_id: self.document.id().clone(),
            file_name: payload.file_name.clone(),
        });
        Ok(payload)
    }

    // =========================================================================
    // Authoring
    // =========================================================================

    pub fn update_document(&mut self, patch: DocumentPatch) {
        self.document = editor::update_document(&self.document, patch);
    }

    /// Returns the new section's id
    pub fn add_section(&mut self) -> Option<SectionId> {
        self.document = editor::add_section(&self.document, self.ids.as_ref());
        let section_id = self.document.sections().last()?.id().clone();

        self.events.push(BuilderEvent::SectionAdded {
            metadata: EventMetadata::new(),
            section_id: section_id.clone(),
        });
        Some(section_id)
    }

    pub fn update_section(&mut self, section_id: &SectionId, patch: SectionPatch) {
        self.document = editor::update_section(&self.document, section_id, patch);
    }

    pub fn delete_section(&mut self, section_id: &SectionId) {
        if self.document.section(section_id).is_none() {
            debug!(%section_id, "delete_section: unknown section, ignoring");
            return;
        }
        self.document = editor::delete_section(&self.document, section_id);
        self.events.push(BuilderEvent::SectionDeleted {
            metadata: EventMetadata::new(),
            section_id: section_id.clone(),
        });
    }

    /// Returns the new indicator's id, or `None` for an unknown section
    pub fn add_indicator(&mut self, section_id: &SectionId) -> Option<IndicatorId> {
        self.document.section(section_id)?;
        self.document = editor::add_indicator_with(
            &self.document,
            section_id,
            self.ids.as_ref(),
            &self.upload_defaults,
        );
        let indicator_id = self.document.section(section_id)?.indicators().last()?.id().clone();

        self.events.push(BuilderEvent::IndicatorAdded {
            metadata: EventMetadata::new(),
            section_id: section_id.clone(),
            indicator_id: indicator_id.clone(),
        });
        Some(indicator_id)
    }

    pub fn update_indicator(&mut self, section_id: &SectionId, indicator_id: &IndicatorId, patch: IndicatorPatch) {
        self.document = editor::update_indicator(&self.document, section_id, indicator_id, patch);
    }

    pub fn delete_indicator(&mut self, section_id: &SectionId, indicator_id: &IndicatorId) {
        if self.document.indicator(section_id, indicator_id).is_none() {
            debug!(%section_id, %indicator_id, "delete_indicator: unknown indicator, ignoring");
            return;
        }
        self.document = editor::delete_indicator(&self.document, section_id, indicator_id);
        self.events.push(BuilderEvent::IndicatorDeleted {
            metadata: EventMetadata::new(),
            section_id: section_id.clone(),
            indicator_id: indicator_id.clone(),
        });
    }

    /// Returns the new field's id, or `None` for an unknown indicator
    pub fn add_field(&mut self, section_id: &SectionId, indicator_id: &IndicatorId) -> Option<FieldId> {
        self.document.indicator(section_id, indicator_id)?;
        self.document = editor::add_field(&self.document, section_id, indicator_id, self.ids.as_ref());
        let field_id = self
            .document
            .indicator(section_id, indicator_id)?
            .fields()
            .last()?
            .id()
            .clone();

        self.events.push(BuilderEvent::FieldAdded {
            metadata: EventMetadata::new(),
            indicator_id: indicator_id.clone(),
            field_id: field_id.clone(),
        });
        Some(field_id)
    }

    pub fn update_field(
        &mut self,
        section_id: &SectionId,
        indicator_id: &IndicatorId,
        field_id: &FieldId,
        patch: FieldPatch,
    ) {
        self.document = editor::update_field(&self.document, section_id, indicator_id, field_id, patch);
    }

    pub fn delete_field(&mut self, section_id: &SectionId, indicator_id: &IndicatorId, field_id: &FieldId) {
        let exists = self
            .document
            .indicator(section_id, indicator_id)
            .and_then(|i| i.field(field_id))
            .is_some();
        if !exists {
            debug!(%indicator_id, %field_id, "delete_field: unknown field, ignoring");
            return;
        }
        self.document = editor::delete_field(&self.document, section_id, indicator_id, field_id);
        self.events.push(BuilderEvent::FieldDeleted {
            metadata: EventMetadata::new(),
            indicator_id: indicator_id.clone(),
            field_id: field_id.clone(),
        });
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn add_file_type(&mut self, ext: &str) {
        let settings = settings_policy::add_file_type(self.document.settings(), ext);
        self.document = editor::replace_settings(&self.document, settings);
    }

    pub fn remove_file_type(&mut self, ext: &str) {
        let settings = settings_policy::remove_file_type(self.document.settings(), ext);
        self.document = editor::replace_settings(&self.document, settings);
    }

    pub fn set_max_file_size(&mut self, size_mb: i64) {
        let settings = settings_policy::set_max_file_size(self.document.settings(), size_mb);
        self.document = editor::replace_settings(&self.document, settings);
    }

    pub fn set_max_file_size_from_input(&mut self, input: &str) {
        let settings = settings_policy::set_max_file_size_from_input(self.document.settings(), input);
        self.document = editor::replace_settings(&self.document, settings);
    }

    pub fn apply_settings_patch(&mut self, patch: SettingsPatch) {
        let settings = settings_policy::apply_settings_patch(self.document.settings(), patch);
        self.document = editor::replace_settings(&self.document, settings);
    }

    // =========================================================================
    // Preview
    // =========================================================================

    /// Enter the preview afresh: first section expanded, nothing captured
    pub fn restart_preview(&mut self) {
        self.preview.reload(&self.document);
    }

    pub fn toggle_section(&mut self, section_id: &SectionId) {
        if self.document.section(section_id).is_some() {
            self.preview.toggle_section(section_id);
        } else {
            debug!(%section_id, "toggle_section: unknown section, ignoring");
        }
    }

    pub fn set_field_value(&mut self, field_id: &FieldId, value: impl Into<String>) {
        if self.document.find_field(field_id).is_some() {
            self.preview.set_field_value(field_id, value);
        } else {
            debug!(%field_id, "set_field_value: unknown field, ignoring");
        }
    }

    pub fn toggle_document_upload(&mut self, indicator_id: &IndicatorId, enabled: bool) {
        if self.document.find_indicator(indicator_id).is_some() {
            self.preview.toggle_document_upload(indicator_id, enabled);
        } else {
            debug!(%indicator_id, "toggle_document_upload: unknown indicator, ignoring");
        }
    }

    pub fn attach_files<I>(&mut self, indicator_id: &IndicatorId, files: I)
    where
        I: IntoIterator<Item = FileDescriptor>,
    {
        if self.document.find_indicator(indicator_id).is_some() {
            self.preview.attach_files(indicator_id, files);
        } else {
            debug!(%indicator_id, "attach_files: unknown indicator, ignoring");
        }
    }

    pub fn remove_file(&mut self, indicator_id: &IndicatorId, index: usize) {
        self.preview.remove_file(indicator_id, index);
    }
}
