//! Page content blocks, tagged by `_type`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::model::optional_image;
use super::{null_as_default, skip_invalid, Event, Image, PortableText, Post};

/// Thin horizontal separator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
}

/// Full-width banner with an optional call to action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    pub heading: String,
    #[serde(default)]
    pub subheading: Option<String>,
    #[serde(default, deserialize_with = "optional_image")]
    pub image: Option<Image>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_href: Option<String>,
}

/// Heading plus rich text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: PortableText,
}

/// Upcoming events, resolved inside the page query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventList {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub events: Vec<Event>,
}

/// Latest posts, resolved inside the page query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostList {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub posts: Vec<Post>,
}

/// One unit of page content.
///
/// Deserialization never fails: unrecognized tags, and recognized tags with a
/// payload that does not fit, become [`ContentBlock::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Divider(Divider),
    Hero(Hero),
    TextBlock(TextBlock),
    EventList(EventList),
    PostList(PostList),
    Unknown {
        type_name: String,
        key: Option<String>,
    },
}

impl ContentBlock {
    pub const DIVIDER: &'static str = "divider";
    pub const HERO: &'static str = "hero";
    pub const TEXT_BLOCK: &'static str = "textBlock";
    pub const EVENT_LIST: &'static str = "eventList";
    pub const POST_LIST: &'static str = "postList";

    /// The `_type` tag this block was authored with
    pub fn type_name(&self) -> &str {
        match self {
            ContentBlock::Divider(_) => Self::DIVIDER,
            ContentBlock::Hero(_) => Self::HERO,
            ContentBlock::TextBlock(_) => Self::TEXT_BLOCK,
            ContentBlock::EventList(_) => Self::EVENT_LIST,
            ContentBlock::PostList(_) => Self::POST_LIST,
            ContentBlock::Unknown { type_name, .. } => type_name,
        }
    }

    /// The array key assigned by the CMS
    pub fn key(&self) -> Option<&str> {
        match self {
            ContentBlock::Divider(b) => b.key.as_deref(),
            ContentBlock::Hero(b) => b.key.as_deref(),
            ContentBlock::TextBlock(b) => b.key.as_deref(),
            ContentBlock::EventList(b) => b.key.as_deref(),
            ContentBlock::PostList(b) => b.key.as_deref(),
            ContentBlock::Unknown { key, .. } => key.as_deref(),
        }
    }

    /// Payload as a template value; `None` for unknown blocks
    pub fn data(&self) -> Option<Value> {
        let value = match self {
            ContentBlock::Divider(b) => serde_json::to_value(b),
            ContentBlock::Hero(b) => serde_json::to_value(b),
            ContentBlock::TextBlock(b) => serde_json::to_value(b),
            ContentBlock::EventList(b) => serde_json::to_value(b),
            ContentBlock::PostList(b) => serde_json::to_value(b),
            ContentBlock::Unknown { .. } => return None,
        };
        value.ok()
    }

    /// Classify a raw block value by its `_type`
    pub fn from_value(value: Value) -> Self {
        let type_name = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let key = value
            .get("_key")
            .and_then(Value::as_str)
            .map(str::to_string);

        let parsed = match type_name.as_str() {
            Self::DIVIDER => decode(value, ContentBlock::Divider),
            Self::HERO => decode(value, ContentBlock::Hero),
            Self::TEXT_BLOCK => decode(value, ContentBlock::TextBlock),
            Self::EVENT_LIST => decode(value, ContentBlock::EventList),
            Self::POST_LIST => decode(value, ContentBlock::PostList),
            _ => None,
        };

        parsed.unwrap_or(ContentBlock::Unknown { type_name, key })
    }
}

fn decode<T: DeserializeOwned>(value: Value, wrap: fn(T) -> ContentBlock) -> Option<ContentBlock> {
    match serde_json::from_value::<T>(value) {
        Ok(block) => Some(wrap(block)),
        Err(e) => {
            tracing::warn!("Malformed content block: {}", e);
            None
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentBlock::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_blocks() {
        let hero = ContentBlock::from_value(json!({
            "_type": "hero",
            "_key": "k1",
            "heading": "New EP out now",
            "ctaLabel": "Listen",
            "ctaHref": "/posts/ep"
        }));
        match &hero {
            ContentBlock::Hero(h) => {
                assert_eq!(h.heading, "New EP out now");
                assert_eq!(h.cta_label.as_deref(), Some("Listen"));
            }
            other => panic!("expected hero, got {:?}", other),
        }
        assert_eq!(hero.key(), Some("k1"));

        let divider = ContentBlock::from_value(json!({ "_type": "divider" }));
        assert_eq!(divider, ContentBlock::Divider(Divider { key: None }));
    }

    #[test]
    fn test_unknown_tag() {
        let block = ContentBlock::from_value(json!({ "_type": "carousel", "_key": "x" }));
        assert_eq!(
            block,
            ContentBlock::Unknown {
                type_name: "carousel".to_string(),
                key: Some("x".to_string()),
            }
        );
        assert!(block.data().is_none());
    }

    #[test]
    fn test_malformed_known_block_degrades() {
        // hero without its required heading
        let block = ContentBlock::from_value(json!({ "_type": "hero", "_key": "h" }));
        assert_eq!(block.type_name(), "hero");
        assert!(matches!(block, ContentBlock::Unknown { .. }));
    }

    #[test]
    fn test_untagged_value() {
        let block = ContentBlock::from_value(json!(null));
        assert_eq!(block.type_name(), "");
    }

    #[test]
    fn test_null_lists_are_empty() {
        let block = ContentBlock::from_value(json!({
            "_type": "eventList",
            "heading": "Upcoming",
            "events": null
        }));
        match block {
            ContentBlock::EventList(list) => assert!(list.events.is_empty()),
            other => panic!("expected event list, got {:?}", other),
        }
    }

    #[test]
    fn test_list_block_keeps_good_items() {
        let block = ContentBlock::from_value(json!({
            "_type": "eventList",
            "_key": "e",
            "events": [
                { "_id": "e1", "title": "Launch night", "date": "2024-06-01T19:30:00Z" },
                { "_id": "e2", "title": "TBA gig", "date": null }
            ]
        }));
        match block {
            ContentBlock::EventList(list) => {
                assert_eq!(list.events.len(), 1);
                assert_eq!(list.events[0].title, "Launch night");
            }
            other => panic!("expected event list, got {:?}", other),
        }
    }

    #[test]
    fn test_data_uses_authored_field_names() {
        let block = ContentBlock::from_value(json!({
            "_type": "hero",
            "heading": "Hi",
            "ctaHref": "/events"
        }));
        let data = block.data().unwrap();
        assert_eq!(data["ctaHref"], "/events");
        assert_eq!(data["heading"], "Hi");
    }
}
