//! Portable Text (the CMS rich text format) to HTML

use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::helpers::html_escape;

/// A rich text document
pub type PortableText = Vec<TextNode>;

/// One top-level node: a text block, an inline image, or something we skip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextNode {
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub style: Option<String>,
    pub list_item: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<Span>,
    #[serde(deserialize_with = "null_as_default")]
    pub mark_defs: Vec<MarkDef>,
    /// Image URL projected from the asset
    pub url: Option<String>,
    pub alt: Option<String>,
}

/// A run of text with marks (decorators or markDef keys)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Span {
    #[serde(rename = "_type")]
    pub kind: String,
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
}

/// Annotation referenced from span marks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    pub href: Option<String>,
}

/// Render a document to HTML. Unknown node types are dropped.
pub fn to_html(nodes: &[TextNode]) -> String {
    let mut out = String::new();
    let mut open_list: Option<&'static str> = None;

    for node in nodes {
        let list_tag = match node.list_item.as_deref() {
            Some("number") => Some("ol"),
            Some(_) => Some("ul"),
            None => None,
        }
        .filter(|_| node.kind == "block");

        if open_list != list_tag {
            if let Some(tag) = open_list {
                out.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list_tag {
                out.push_str(&format!("<{}>", tag));
            }
            open_list = list_tag;
        }

        match node.kind.as_str() {
            "block" if list_tag.is_some() => {
                out.push_str("<li>");
                out.push_str(&render_spans(node));
                out.push_str("</li>");
            }
            "block" => {
                let tag = block_tag(node.style.as_deref());
                out.push_str(&format!("<{}>{}</{}>", tag, render_spans(node), tag));
            }
            "image" => {
                if let Some(url) = &node.url {
                    out.push_str(&format!(
                        r#"<figure><img src="{}" alt="{}" loading="lazy"></figure>"#,
                        html_escape(url),
                        html_escape(node.alt.as_deref().unwrap_or(""))
                    ));
                }
            }
            other => {
                tracing::debug!("Skipping portable text node {:?}", other);
            }
        }
    }

    if let Some(tag) = open_list {
        out.push_str(&format!("</{}>", tag));
    }

    out
}

/// Plain text of a document, for excerpts and meta descriptions
pub fn to_plain_text(nodes: &[TextNode]) -> String {
    nodes
        .iter()
        .filter(|node| node.kind == "block")
        .map(|node| {
            node.children
                .iter()
                .map(|span| span.text.as_str())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_tag(style: Option<&str>) -> &'static str {
    match style {
        Some("h1") => "h1",
        Some("h2") => "h2",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("h5") => "h5",
        Some("h6") => "h6",
        Some("blockquote") => "blockquote",
        _ => "p",
    }
}

fn render_spans(node: &TextNode) -> String {
    let mut out = String::new();

    for span in &node.children {
        let mut html = html_escape(&span.text).replace('\n', "<br>");

        for mark in &span.marks {
            html = match mark.as_str() {
                "strong" => format!("<strong>{}</strong>", html),
                "em" => format!("<em>{}</em>", html),
                "code" => format!("<code>{}</code>", html),
                "underline" => format!("<u>{}</u>", html),
                "strike-through" => format!("<s>{}</s>", html),
                key => match node.mark_defs.iter().find(|def| def.key == key) {
                    Some(MarkDef {
                        kind,
                        href: Some(href),
                        ..
                    }) if kind == "link" => {
                        let external = href.starts_with("http://") || href.starts_with("https://");
                        if external {
                            format!(
                                r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                                html_escape(href),
                                html
                            )
                        } else {
                            format!(r#"<a href="{}">{}</a>"#, html_escape(href), html)
                        }
                    }
                    _ => html,
                },
            };
        }

        out.push_str(&html);
    }

    out
}
