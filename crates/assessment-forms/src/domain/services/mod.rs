//! Domain services
//!
//! Stateless operations over the form tree and its settings.

pub mod editor;
pub mod settings_policy;

pub use editor::{DocumentPatch, FieldPatch, IndicatorPatch, SectionPatch, UploadPatch};
pub use settings_policy::{SettingsPatch, COMMON_FILE_TYPES};
