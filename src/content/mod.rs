//! Content module - CMS documents, page blocks and rich text

mod block;
mod model;
mod outcome;
pub mod portable_text;

pub use block::{ContentBlock, Divider, EventList, Hero, PostList, TextBlock};
pub use model::{Event, Favourite, Image, Page, Post, UNTITLED};
pub use outcome::Outcome;
pub use portable_text::{PortableText, TextNode};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// GROQ projections return explicit `null` for missing fields; treat it as empty
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode each item on its own, dropping (and logging) the ones that don't fit `T`
pub(crate) fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = item.get("_id").and_then(Value::as_str).unwrap_or("?").to_string();
            match serde_json::from_value(item) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!("Skipping malformed document {:?}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// A `null`-tolerant list whose malformed items are skipped
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items: Vec<Value> = null_as_default(deserializer)?;
    Ok(decode_items(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_items_skips_bad_records() {
        let events: Vec<Event> = decode_items(vec![
            json!({ "_id": "e1", "title": "Launch night", "date": "2024-06-01T19:30:00Z" }),
            json!({ "_id": "e2", "title": "TBA gig", "date": null }),
            json!("not an object"),
        ]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1");
    }
}
