use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category name -> (field label -> value), in page order.
pub type SpecSheet = IndexMap<String, IndexMap<String, String>>;

/// One scraped device page, as written to `raw_data/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub specs: SpecSheet,
}

impl RawRecord {
    /// Look up a single field, e.g. `field("BATTERY", "Type")`.
    pub fn field(&self, category: &str, label: &str) -> Option<&str> {
        self.specs
            .get(category)
            .and_then(|fields| fields.get(label))
            .map(String::as_str)
    }

    /// Number of label/value pairs across all categories.
    pub fn field_count(&self) -> usize {
        self.specs.values().map(IndexMap::len).sum()
    }
}

/// A device reshaped into the fixed section/field schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedRecord {
    pub sections: IndexMap<String, IndexMap<String, String>>,
}

impl FormattedRecord {
    pub fn get(&self, section: &str, field: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub(crate) fn set(&mut self, section: &str, field: &str, value: String) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }
}
