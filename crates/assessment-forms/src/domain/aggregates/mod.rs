//! Aggregates module
//!
//! Form → Section → Indicator → Field. Fields are `pub(crate)`: outside the
//! crate the tree is read through getters and changed only through the
//! editor and settings policy.

pub mod field;
pub mod form;
pub mod indicator;
pub mod section;

pub use field::{FieldKind, FieldValidation, FormField, SelectOptions};
pub use form::{FormDocument, FormSettings};
pub use indicator::{DocumentUpload, Indicator, IndicatorStatus};
pub use section::Section;
