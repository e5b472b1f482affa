//! CMS document models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use serde::Deserializer;

use super::{null_as_default, ContentBlock, PortableText};

/// Shown in place of a missing title
pub const UNTITLED: &str = "Untitled";

/// An image with its asset URL projected by the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// An image reference whose asset did not resolve to a URL is no image at all
pub(crate) fn optional_image<'de, D>(deserializer: D) -> Result<Option<Image>, D::Error>
where
    D: Deserializer<'de>,
{
    let image = Option::<Image>::deserialize(deserializer)?;
    Ok(image.filter(|image| !image.url.is_empty()))
}

fn title_or_untitled(title: &str) -> &str {
    if title.trim().is_empty() {
        UNTITLED
    } else {
        title
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,

    /// Unique, URL-friendly identifier
    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default, deserialize_with = "optional_image")]
    pub main_image: Option<Image>,

    /// Rich text body; list queries leave it out
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: PortableText,
}

impl Post {
    /// Site-relative URL path
    pub fn path(&self) -> String {
        format!("/posts/{}", self.slug)
    }

    /// Title for headings, `Untitled` when the CMS has none
    pub fn display_title(&self) -> &str {
        title_or_untitled(&self.title)
    }
}

/// A live event (gig, release party, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
    #[serde(default, deserialize_with = "optional_image")]
    pub image: Option<Image>,
}

impl Event {
    pub fn display_title(&self) -> &str {
        title_or_untitled(&self.title)
    }
}

/// A record or link the label recommends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favourite {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "optional_image")]
    pub image: Option<Image>,
}

impl Favourite {
    pub fn display_title(&self) -> &str {
        title_or_untitled(&self.title)
    }
}

/// A page composed of content blocks
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    #[serde(rename = "_id")]
    pub id: String,

    /// Document type discriminator
    #[serde(rename = "_type")]
    pub doc_type: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Ordered blocks; order is layout
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentBlock>,
}
