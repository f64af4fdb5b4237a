//! Domain module
//!
//! The form-definition tree, the pure services that edit it, and the events
//! raised around those edits.

pub mod aggregates;
pub mod events;
pub mod services;
pub mod value_objects;

pub use aggregates::*;
pub use events::*;
pub use value_objects::*;
