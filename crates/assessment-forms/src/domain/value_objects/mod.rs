//! Value Objects module
//!
//! Immutable identifiers for every node of the form tree, the id sources
//! that mint them, and attached-file descriptors.

pub mod file;
pub mod id_source;

pub use file::FileDescriptor;
pub use id_source::{IdSource, SequentialIdSource, TimestampIdSource};

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used when minting new ids of this kind
            pub const PREFIX: &'static str = $prefix;

            /// Mint a fresh id from an id source
            pub fn generate(ids: &dyn IdSource) -> Self {
                Self(ids.next_id(Self::PREFIX))
            }

            /// Wrap an existing id (imported documents, tests)
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

entity_id!(
    /// Form document identifier
    FormId,
    "form"
);

entity_id!(
    /// Section identifier, unique within a form document
    SectionId,
    "section"
);

entity_id!(
    /// Indicator identifier, unique within a section
    IndicatorId,
    "indicator"
);

entity_id!(
    /// Field identifier, unique within an indicator
    FieldId,
    "field"
);
