//! Field entity
//!
//! A single answerable question inside an indicator. `required`, the
//! placeholder and the validation bounds are declarative metadata for the
//! renderer; nothing in this crate enforces them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::FieldId;
use crate::error::{FormsError, FormsResult};

/// Form field (entity within the Indicator aggregate)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub(crate) id: FieldId,
    pub(crate) label: String,
    #[serde(flatten)]
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) validation: Option<FieldValidation>,
}

impl FormField {
    /// Create an optional field with no placeholder or validation
    pub fn new(id: FieldId, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            validation: None,
        }
    }

    /// Default numeric value field for position `n` (1-based):
    /// `"A{n} - Value {n}"`, required, placeholder `"Enter A{n} value"`
    pub fn numbered_value(id: FieldId, n: usize) -> Self {
        Self::new(id, format!("A{} - Value {}", n, n), FieldKind::Number)
            .with_required(true)
            .with_placeholder(format!("Enter A{} value", n))
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn id(&self) -> &FieldId { &self.id }
    pub fn label(&self) -> &str { &self.label }
    pub fn kind(&self) -> &FieldKind { &self.kind }
    pub fn is_required(&self) -> bool { self.required }
    pub fn placeholder(&self) -> Option<&str> { self.placeholder.as_deref() }
    pub fn validation(&self) -> Option<&FieldValidation> { self.validation.as_ref() }

    /// Select options, present only for select fields
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Select { options } => Some(options.as_slice()),
            _ => None,
        }
    }
}

/// Input type of a field
///
/// Serialized as a `"type"` tag on the field itself; a select additionally
/// carries its `"options"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Tel,
    Date,
    Select { options: SelectOptions },
}

impl FieldKind {
    /// Build a select kind; fails on an empty option list
    pub fn select<I, S>(options: I) -> FormsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = SelectOptions::new(options.into_iter().map(Into::into).collect())?;
        Ok(Self::Select { options })
    }

    /// Wire tag, as used in exported documents
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::Select { .. } => "select",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Non-empty list of select options (Value Object)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SelectOptions(Vec<String>);

impl SelectOptions {
    pub fn new(options: Vec<String>) -> FormsResult<Self> {
        if options.is_empty() {
            return Err(FormsError::EmptySelectOptions);
        }
        Ok(Self(options))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed value
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for SelectOptions {
    type Error = FormsError;

    fn try_from(options: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl From<SelectOptions> for Vec<String> {
    fn from(options: SelectOptions) -> Self {
        options.0
    }
}

/// Declarative validation bounds, consumed by the renderer
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}
