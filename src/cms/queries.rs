//! GROQ queries and the typed data-access functions built on them

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{CmsError, ContentSource, FetchContext, Query};
use crate::content::{decode_items, Event, Favourite, Page, Post};

pub const EVENTS_QUERY: &str = r#"*[_type == "event"] | order(date asc) {
  _id, title, date, venue, location, ticketUrl,
  "image": image{ "url": asset->url, alt }
}"#;

pub const FAVOURITES_QUERY: &str = r#"*[_type == "favourite"] | order(_createdAt desc) {
  _id, title, artist, link,
  "image": image{ "url": asset->url, alt }
}"#;

pub const POSTS_QUERY: &str = r#"*[_type == "post" && defined(slug.current)] | order(publishedAt desc) {
  _id, title, "slug": slug.current, publishedAt, excerpt,
  "mainImage": mainImage{ "url": asset->url, alt }
}"#;

pub const POST_BY_SLUG_QUERY: &str = r#"*[_type == "post" && slug.current == $slug][0] {
  _id, title, "slug": slug.current, publishedAt, excerpt,
  "mainImage": mainImage{ "url": asset->url, alt },
  body[]{ ..., _type == "image" => { "url": asset->url, alt } }
}"#;

pub const HOME_PAGE_QUERY: &str = r#"*[_type == "page" && slug.current == "home"][0] {
  _id, _type, title,
  content[]{
    ...,
    _type == "hero" => { "image": image{ "url": asset->url, alt } },
    _type == "eventList" => {
      "events": *[_type == "event" && date >= now()] | order(date asc)[0...6] {
        _id, title, date, venue, location, ticketUrl,
        "image": image{ "url": asset->url, alt }
      }
    },
    _type == "postList" => {
      "posts": *[_type == "post" && defined(slug.current)] | order(publishedAt desc)[0...3] {
        _id, title, "slug": slug.current, publishedAt, excerpt,
        "mainImage": mainImage{ "url": asset->url, alt }
      }
    }
  }
}"#;

/// All events, soonest first
pub async fn get_all_events<S: ContentSource>(
    source: &S,
    context: FetchContext,
) -> Result<Vec<Event>, CmsError> {
    fetch_list(source, &Query::new(EVENTS_QUERY), context).await
}

/// Favourites, newest first
pub async fn get_favourites<S: ContentSource>(
    source: &S,
    context: FetchContext,
) -> Result<Vec<Favourite>, CmsError> {
    fetch_list(source, &Query::new(FAVOURITES_QUERY), context).await
}

/// Post summaries (no body), newest first
pub async fn get_all_posts<S: ContentSource>(
    source: &S,
    context: FetchContext,
) -> Result<Vec<Post>, CmsError> {
    fetch_list(source, &Query::new(POSTS_QUERY), context).await
}

/// A single post with its body, if the slug exists
pub async fn get_post_by_slug<S: ContentSource>(
    source: &S,
    slug: &str,
    context: FetchContext,
) -> Result<Option<Post>, CmsError> {
    let query = Query::new(POST_BY_SLUG_QUERY).bind("slug", slug);
    fetch_one(source, &query, context).await
}

/// The home page document and its blocks
pub async fn get_home_page<S: ContentSource>(
    source: &S,
    context: FetchContext,
) -> Result<Option<Page>, CmsError> {
    fetch_one(source, &Query::new(HOME_PAGE_QUERY), context).await
}

async fn fetch_list<S, T>(source: &S, query: &Query, context: FetchContext) -> Result<Vec<T>, CmsError>
where
    S: ContentSource,
    T: DeserializeOwned,
{
    let value = source.fetch(query, context).await?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    let items: Vec<Value> = serde_json::from_value(value)?;
    Ok(decode_items(items))
}

async fn fetch_one<S, T>(source: &S, query: &Query, context: FetchContext) -> Result<Option<T>, CmsError>
where
    S: ContentSource,
    T: DeserializeOwned,
{
    let value = source.fetch(query, context).await?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}
