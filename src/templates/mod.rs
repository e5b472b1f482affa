//! Built-in site templates using the Tera template engine
//!
//! Every template is embedded in the binary. Autoescaping stays on for
//! `.html`/`.xml`; rendered rich text is passed through `| safe`.

use anyhow::Result;
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{portable_text, PortableText};
use crate::helpers;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer; dates are shown in `tz`
    pub fn new(tz: Tz) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("posts.html", include_str!("site/posts.html")),
            ("post.html", include_str!("site/post.html")),
            ("events.html", include_str!("site/events.html")),
            ("favourites.html", include_str!("site/favourites.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("error.html", include_str!("site/error.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/scroll_lock.html",
                include_str!("site/partials/scroll_lock.html"),
            ),
            (
                "partials/scroll_to_top.html",
                include_str!("site/partials/scroll_to_top.html"),
            ),
            (
                "partials/event_card.html",
                include_str!("site/partials/event_card.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
            // Content blocks
            ("blocks/divider.html", include_str!("site/blocks/divider.html")),
            ("blocks/hero.html", include_str!("site/blocks/hero.html")),
            (
                "blocks/text_block.html",
                include_str!("site/blocks/text_block.html"),
            ),
            (
                "blocks/event_list.html",
                include_str!("site/blocks/event_list.html"),
            ),
            (
                "blocks/post_list.html",
                include_str!("site/blocks/post_list.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("portable_text", portable_text_filter);
        tera.register_filter("plain_text", plain_text_filter);
        tera.register_filter(
            "date_format",
            move |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                date_format_filter(value, args, tz)
            },
        );
        tera.register_tester("external", external_tester);
        tera.register_function("container", container_function);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Whether a template is registered
    pub fn has_template(&self, template_name: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template_name)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(helpers::truncate(
        &s,
        length,
        Some(&omission),
    )))
}

/// Tera filter: Portable Text array to HTML (pipe through `safe`)
fn portable_text_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(tera::Value::String(String::new()));
    }
    let nodes = tera::try_get_value!("portable_text", "value", PortableText, value);
    Ok(tera::Value::String(portable_text::to_html(&nodes)))
}

/// Tera filter: Portable Text array to plain text
fn plain_text_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(tera::Value::String(String::new()));
    }
    let nodes = tera::try_get_value!("plain_text", "value", PortableText, value);
    Ok(tera::Value::String(portable_text::to_plain_text(&nodes)))
}

/// Tera filter: format an RFC 3339 date in the site timezone
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
    tz: Tz,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "DD MMMM YYYY".to_string(),
    };

    match helpers::parse_cms_date(&s) {
        Some(date) => Ok(tera::Value::String(helpers::format_in_tz(
            &date, tz, &format,
        ))),
        // Leave unparseable dates as authored
        None => Ok(tera::Value::String(s)),
    }
}

/// Layout container classes
const CONTAINER_CLASSES: &str = "mx-auto w-full max-w-6xl px-4 sm:px-6 lg:px-8";

/// Tera function: `container(extra="...")` gives the layout container classes
fn container_function(args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    let classes = match args.get("extra").and_then(tera::Value::as_str) {
        Some(extra) if !extra.trim().is_empty() => {
            format!("{} {}", CONTAINER_CLASSES, extra.trim())
        }
        _ => CONTAINER_CLASSES.to_string(),
    };
    Ok(tera::Value::String(classes))
}

/// Tera tester: `is external` for links leaving the site
fn external_tester(value: Option<&tera::Value>, _args: &[tera::Value]) -> tera::Result<bool> {
    Ok(value
        .and_then(tera::Value::as_str)
        .map(helpers::is_external)
        .unwrap_or(false))
}

/// Site-wide values every page template receives as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub menu: Vec<MenuItem>,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            base_url: config.base_url().to_string(),
            menu: vec![
                MenuItem::new("Home", "/"),
                MenuItem::new("News", "/posts"),
                MenuItem::new("Events", "/events"),
                MenuItem::new("Favourites", "/favourites"),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

impl MenuItem {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new(chrono_tz::Europe::London).unwrap()
    }

    fn page_context(path: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&SiteConfig::default()));
        context.insert("page_title", "Test");
        context.insert("path", path);
        context
    }

    #[test]
    fn test_all_templates_parse() {
        let renderer = renderer();
        assert!(renderer.has_template("layout.html"));
        assert!(renderer.has_template("blocks/divider.html"));
        assert!(!renderer.has_template("blocks/carousel.html"));
    }

    #[test]
    fn test_not_found_page() {
        let html = renderer()
            .render("not_found.html", &page_context("/posts/missing"))
            .unwrap();
        assert!(html.contains("<html"));
        assert!(html.contains("Page not found"));
        assert!(html.contains("scrollToTop"));
        assert!(html.contains("lockScroll"));
    }

    #[test]
    fn test_post_page_escapes_title_and_renders_body() {
        let mut context = page_context("/posts/a");
        context.insert(
            "post",
            &json!({
                "_id": "p",
                "slug": "a",
                "title": "Rock & Roll <live>",
                "publishedAt": "2024-06-01T23:30:00Z",
                "excerpt": null,
                "mainImage": null,
                "body": [{ "_type": "block", "children": [{ "text": "Loud" }] }]
            }),
        );
        let html = renderer().render("post.html", &context).unwrap();
        assert!(html.contains("Rock &amp; Roll &lt;live&gt;"));
        assert!(html.contains("<p>Loud</p>"));
        // 23:30 UTC is already the next day in London during BST
        assert!(html.contains("02 June 2024"));
    }

    #[test]
    fn test_date_filter_passes_through_unparseable() {
        let args = HashMap::new();
        let value = date_format_filter(&json!("TBC"), &args, chrono_tz::UTC).unwrap();
        assert_eq!(value, json!("TBC"));
    }

    #[test]
    fn test_container_function() {
        let mut args = HashMap::new();
        assert_eq!(container_function(&args).unwrap(), json!(CONTAINER_CLASSES));

        args.insert("extra".to_string(), json!("py-8"));
        let classes = container_function(&args).unwrap();
        assert!(classes.as_str().unwrap().ends_with(" py-8"));
    }

    #[test]
    fn test_truncate_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), json!(8));
        let value = truncate_chars_filter(&json!("Hello World"), &args).unwrap();
        assert_eq!(value, json!("Hello..."));
    }
}
