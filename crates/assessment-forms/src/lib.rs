//! Infrastructure Assessment Form Builder
//!
//! Authoring and preview engine for hierarchical assessment forms:
//! a document holds ordered sections, sections hold numbered indicators,
//! indicators hold typed input fields and an optional document-upload policy.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Form tree aggregates, id value objects, builder events,
//!   and the pure tree editor and settings policy services
//! - **Preview**: Ephemeral interaction state, completion progress, view model
//! - **Application Layer**: Single-document builder session
//! - **Ports Layer**: Save/load collaborator interface
//! - **Infrastructure Layer**: In-memory repository
//!
//! ## Features
//!
//! - Add, edit and cascade-delete sections, indicators and fields
//! - Document-level upload settings with extension normalisation
//! - Live preview with collapsible sections and a completion bar
//! - JSON export and validated import

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod infrastructure;
pub mod ports;
pub mod preview;
pub mod telemetry;

// Re-exports for convenience
pub use application::FormBuilderSession;
pub use config::BuilderConfig;
pub use domain::aggregates::{
    DocumentUpload, FieldKind, FieldValidation, FormDocument, FormField, FormSettings, Indicator,
    IndicatorStatus, Section, SelectOptions,
};
pub use domain::events::{BuilderEvent, Notice};
pub use domain::services::{
    DocumentPatch, FieldPatch, IndicatorPatch, SectionPatch, SettingsPatch, UploadPatch,
};
pub use domain::value_objects::{
    FieldId, FileDescriptor, FormId, IdSource, IndicatorId, SectionId, SequentialIdSource,
    TimestampIdSource,
};
pub use error::{FormsError, FormsResult};
pub use export::ExportPayload;
pub use infrastructure::InMemoryFormRepository;
pub use ports::outbound::{FormRepository, RepositoryError};
pub use preview::{compute_progress, PreviewState, PreviewView};
