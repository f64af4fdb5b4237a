//! Section entity

use serde::{Deserialize, Serialize};

use super::field::FormField;
use super::indicator::Indicator;
use crate::domain::value_objects::{IndicatorId, SectionId};

/// Named, collapsible grouping of indicators (entity within FormDocument)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub(crate) id: SectionId,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) indicators: Vec<Indicator>,
    pub(crate) is_collapsible: bool,
    pub(crate) is_expanded: bool,
}

impl Section {
    /// Create an empty, collapsible, collapsed section
    pub fn new(id: SectionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            indicators: Vec::new(),
            is_collapsible: true,
            is_expanded: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicators.push(indicator);
        self
    }

    pub fn id(&self) -> &SectionId { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> &str { &self.description }
    pub fn indicators(&self) -> &[Indicator] { &self.indicators }
    pub fn is_collapsible(&self) -> bool { self.is_collapsible }
    pub fn is_expanded(&self) -> bool { self.is_expanded }

    pub fn indicator(&self, id: &IndicatorId) -> Option<&Indicator> {
        self.indicators.iter().find(|i| &i.id == id)
    }

    /// Total fields across all indicators of this section
    pub fn field_count(&self) -> usize {
        self.indicators.iter().map(|i| i.fields.len()).sum()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.indicators.iter().flat_map(|i| i.fields.iter())
    }
}
