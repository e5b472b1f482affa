//! Page builder - renders a page's ordered content blocks
//!
//! Each block is dispatched on its `_type` tag to a registered
//! [`BlockRenderer`]. Tags without a renderer are skipped, and a renderer
//! that fails only loses its own block.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tera::Context;

use crate::content::ContentBlock;
use crate::helpers::html_escape;
use crate::templates::TemplateRenderer;

/// Where a block is being rendered
#[derive(Debug, Clone, Copy)]
pub struct BlockContext<'a> {
    /// Id of the owning document
    pub document_id: &'a str,
    /// Type of the owning document
    pub document_type: &'a str,
    /// Position of the block in the page
    pub index: usize,
}

/// Renders one kind of content block to HTML
pub trait BlockRenderer: Send + Sync {
    fn render(&self, block: &ContentBlock, context: &BlockContext<'_>) -> Result<String>;
}

impl<F> BlockRenderer for F
where
    F: Fn(&ContentBlock, &BlockContext<'_>) -> Result<String> + Send + Sync,
{
    fn render(&self, block: &ContentBlock, context: &BlockContext<'_>) -> Result<String> {
        self(block, context)
    }
}

/// Renders a block through a Tera template; the payload is available as `data`
pub struct TemplateBlock {
    templates: Arc<TemplateRenderer>,
    template: String,
}

impl TemplateBlock {
    pub fn new(templates: Arc<TemplateRenderer>, template: &str) -> Self {
        Self {
            templates,
            template: template.to_string(),
        }
    }
}

impl BlockRenderer for TemplateBlock {
    fn render(&self, block: &ContentBlock, context: &BlockContext<'_>) -> Result<String> {
        let data = block
            .data()
            .ok_or_else(|| anyhow::anyhow!("block {:?} has no data", block.type_name()))?;

        let mut ctx = Context::new();
        ctx.insert("data", &data);
        ctx.insert("document_id", context.document_id);
        ctx.insert("document_type", context.document_type);
        ctx.insert("index", &context.index);

        self.templates.render(&self.template, &ctx)
    }
}

/// Registry of block renderers keyed by type tag
#[derive(Default)]
pub struct PageBuilder {
    renderers: HashMap<String, Box<dyn BlockRenderer>>,
}

impl PageBuilder {
    /// An empty builder; every block is skipped until renderers are registered
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder with template renderers for every built-in block kind
    pub fn with_defaults(templates: Arc<TemplateRenderer>) -> Self {
        let mut builder = Self::new();
        for (tag, template) in [
            (ContentBlock::DIVIDER, "blocks/divider.html"),
            (ContentBlock::HERO, "blocks/hero.html"),
            (ContentBlock::TEXT_BLOCK, "blocks/text_block.html"),
            (ContentBlock::EVENT_LIST, "blocks/event_list.html"),
            (ContentBlock::POST_LIST, "blocks/post_list.html"),
        ] {
            builder.register(tag, TemplateBlock::new(templates.clone(), template));
        }
        builder
    }

    /// Register (or replace) the renderer for a tag, returning the previous one
    pub fn register<R>(&mut self, tag: &str, renderer: R) -> Option<Box<dyn BlockRenderer>>
    where
        R: BlockRenderer + 'static,
    {
        self.renderers.insert(tag.to_string(), Box::new(renderer))
    }

    /// Render blocks in sequence order
    pub fn render(&self, document_id: &str, document_type: &str, blocks: &[ContentBlock]) -> String {
        let mut out = String::new();

        for (index, block) in blocks.iter().enumerate() {
            let tag = block.type_name();
            let Some(renderer) = self.renderers.get(tag) else {
                tracing::debug!(
                    "No renderer for block {:?} at {} in {}",
                    tag,
                    index,
                    document_id
                );
                continue;
            };

            let context = BlockContext {
                document_id,
                document_type,
                index,
            };

            match renderer.render(block, &context) {
                Ok(html) => {
                    out.push_str(&format!(
                        r#"<section data-block-type="{}" data-block-key="{}">"#,
                        html_escape(tag),
                        html_escape(block.key().unwrap_or_default())
                    ));
                    out.push_str(&html);
                    out.push_str("</section>\n");
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to render block {:?} at {} in {}: {}",
                        tag,
                        index,
                        document_id,
                        e
                    );
                }
            }
        }

        out
    }
}
