//! The divider block

use super::{FieldDef, Preview, PreviewValues, SchemaType};
use crate::content::ContentBlock;

const INFO: &str = "This block adds a divider line between the blocks around it. There is nothing to configure.";

pub fn divider() -> SchemaType {
    SchemaType {
        name: ContentBlock::DIVIDER,
        title: "Divider",
        kind: "object",
        fields: vec![FieldDef::string("info", "Info")
            .description(INFO)
            .initial_value(INFO)
            .read_only()],
        preview: Preview {
            prepare: PreviewValues {
                title: "Divider",
                subtitle: Some("Visual separator between blocks"),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_divider_schema() {
        let schema = divider();
        assert_eq!(schema.name, "divider");
        assert_eq!(schema.fields.len(), 1);
        assert!(schema.fields[0].read_only);
        assert_eq!(schema.fields[0].kind, "string");
    }

    #[test]
    fn test_divider_json_shape() {
        let value = serde_json::to_value(divider()).unwrap();
        assert_eq!(value["type"], "object");
        assert_eq!(value["fields"][0]["readOnly"], true);
        assert_eq!(value["fields"][0]["initialValue"], json!(INFO));
        assert_eq!(
            value["preview"],
            json!({ "prepare": { "title": "Divider", "subtitle": "Visual separator between blocks" } })
        );
    }
}
