//! JSON export and import
//!
//! The export payload is the document tree itself, field for field, with no
//! wrapper. Writing it to disk is left to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::aggregates::FormDocument;
use crate::error::FormsResult;

/// What the export collaborator writes: a file name and its contents
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub file_name: String,
    pub json: String,
}

impl ExportPayload {
    pub fn build(doc: &FormDocument) -> FormsResult<Self> {
        Ok(Self {
            file_name: file_name(doc.title()),
            json: to_json(doc)?,
        })
    }
}

/// Pretty-printed JSON of the whole document tree
pub fn to_json(doc: &FormDocument) -> FormsResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse an exported document and check its structural invariants
pub fn from_json(json: &str) -> FormsResult<FormDocument> {
    let doc: FormDocument = serde_json::from_str(json)?;
    doc.validate()?;
    debug!(form_id = %doc.id(), sections = doc.sections().len(), "imported form document");
    Ok(doc)
}

/// Export file name for a title
///
/// Surrounding whitespace is dropped, the rest lowercased, every run of
/// whitespace becomes a single `-`, and `.json` is appended. A blank title
/// falls back to `form.json`.
pub fn file_name(title: &str) -> String {
    let stem = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    if stem.is_empty() {
        "form.json".to_string()
    } else {
        format!("{}.json", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{FieldKind, FormField, FormSettings, Indicator, Section};
    use crate::domain::value_objects::{FieldId, FormId, IndicatorId, SectionId};
    use crate::error::FormsError;
    use serde_json::{json, Value};

    fn sample() -> FormDocument {
        FormDocument::new(FormId::from("form-1"), "Q1  Report", "Quarterly", FormSettings::default())
            .with_section(
                Section::new(SectionId::from("s1"), "Energy").with_indicator(
                    Indicator::new(IndicatorId::from("i1"), "1.1", "Backup")
                        .with_field(FormField::new(FieldId::from("f1"), "Hours", FieldKind::Number))
                        .with_field(FormField::new(
                            FieldId::from("f2"),
                            "Fuel",
                            FieldKind::select(["Diesel", "Gas"]).unwrap(),
                        )),
                ),
            )
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("Q1  Report"), "q1-report.json");
        assert_eq!(file_name("Infrastructure Assessment Form"), "infrastructure-assessment-form.json");
        assert_eq!(file_name("Q1 Report "), "q1-report.json");
        assert_eq!(file_name("Tabs\tand\nlines"), "tabs-and-lines.json");
        assert_eq!(file_name("   "), "form.json");
    }

    #[test]
    fn test_payload_shape() {
        let payload = ExportPayload::build(&sample()).unwrap();
        assert_eq!(payload.file_name, "q1-report.json");

        let value: Value = serde_json::from_str(&payload.json).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 5);
        for key in ["id", "title", "description", "sections", "settings"] {
            assert!(keys.iter().any(|k| k == key), "missing {}", key);
        }

        let field = &value["sections"][0]["indicators"][0]["fields"][1];
        assert_eq!(field["type"], json!("select"));
        assert_eq!(field["options"], json!(["Diesel", "Gas"]));
        assert_eq!(value["settings"]["allowedFileTypes"][0], json!(".pdf"));
    }

    #[test]
    fn test_import_round_trip() {
        let doc = sample();
        let back = from_json(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_import_rejects_invalid() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["sections"][0]["indicators"][0]["fields"][1]["id"] = json!("f1");
        assert!(matches!(
            from_json(&value.to_string()),
            Err(FormsError::InvalidDocument(_))
        ));

        assert!(matches!(from_json("{not json"), Err(FormsError::Serialization(_))));
    }
}
