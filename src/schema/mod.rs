//! Content schema definitions for the CMS authoring tool
//!
//! These are plain data: the site never reads them at render time. The
//! `schema` command prints them as JSON for the studio to import.

mod divider;

use serde::Serialize;

pub use divider::divider;

/// A document or object type editors can create
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaType {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub fields: Vec<FieldDef>,
    pub preview: Preview,
}

/// One editable field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

impl FieldDef {
    pub fn string(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            kind: "string",
            description: None,
            initial_value: None,
            read_only: false,
        }
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn initial_value(mut self, value: &'static str) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// How an item is summarised in the studio's outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    /// Fixed values shown for every item of the type
    pub prepare: PreviewValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewValues {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
}

/// Every block schema this site defines
pub fn all() -> Vec<SchemaType> {
    vec![divider()]
}

/// All schemas as pretty JSON
pub fn to_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all())
}
