//! HTTP server rendering CMS content

mod seo;

pub use seo::{robots_txt, sitemap_xml};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::builder::PageBuilder;
use crate::cms::{self, ContentSource, FetchContext};
use crate::config::SiteConfig;
use crate::content::{Event, Favourite, Outcome, Page, Post};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Site;

/// Shared, read-only state behind every handler
pub struct AppState<S> {
    pub config: SiteConfig,
    pub source: S,
    pub templates: Arc<TemplateRenderer>,
    pub builder: PageBuilder,
}

impl<S: ContentSource> AppState<S> {
    /// Build state with the default block renderers
    pub fn new(config: SiteConfig, source: S) -> Result<Self> {
        let templates = Arc::new(TemplateRenderer::new(config.tz())?);
        let builder = PageBuilder::with_defaults(templates.clone());
        Ok(Self {
            config,
            source,
            templates,
            builder,
        })
    }

    fn base_context(&self, page_title: &str, path: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.config));
        context.insert("page_title", page_title);
        context.insert("path", path);
        context
    }

    /// Render a full page; template failures become a bare 500
    fn page(&self, template: &str, context: &Context, status: StatusCode) -> Response {
        match self.templates.render(template, context) {
            Ok(html) => {
                let cache = if status.is_success() {
                    FetchContext::Live.cache_control(self.config.sanity.revalidate_secs)
                } else {
                    "no-store".to_string()
                };
                (status, [(header::CACHE_CONTROL, cache)], Html(html)).into_response()
            }
            Err(e) => {
                tracing::error!("Failed to render {}: {:#}", template, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }

    fn not_found(&self, path: &str) -> Response {
        let context = self.base_context("Not found", path);
        self.page("not_found.html", &context, StatusCode::NOT_FOUND)
    }

    fn failed(&self, path: &str, error: &cms::CmsError) -> Response {
        tracing::error!("CMS fetch for {} failed: {}", path, error);
        let context = self.base_context("Error", path);
        self.page("error.html", &context, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Map a fetch outcome to a response, rendering `template` with `key` on success
    fn respond<T: Serialize>(
        &self,
        outcome: Outcome<T>,
        template: &str,
        key: &str,
        page_title: &str,
        path: &str,
    ) -> Response {
        match outcome {
            Outcome::Found(value) => {
                let mut context = self.base_context(page_title, path);
                context.insert(key, &value);
                self.page(template, &context, StatusCode::OK)
            }
            Outcome::NotFound => self.not_found(path),
            Outcome::Failed(e) => self.failed(path, &e),
        }
    }
}

/// Build the site router
pub fn router<S: ContentSource + 'static>(state: Arc<AppState<S>>) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(home::<S>))
        .route("/posts", get(posts_index::<S>))
        .route("/posts/:slug", get(post_page::<S>))
        .route("/events", get(events::<S>))
        .route("/favourites", get(favourites::<S>))
        .route("/robots.txt", get(robots::<S>))
        .route("/sitemap.xml", get(sitemap::<S>))
        .nest_service("/static", static_dir)
        .fallback(fallback::<S>)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server against the live CMS
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let client = site.client()?;
    let state = Arc::new(AppState::new(site.config.clone(), client)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

async fn home<S: ContentSource + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    let outcome: Outcome<Page> = cms::get_home_page(&state.source, FetchContext::Live)
        .await
        .into();

    match outcome {
        Outcome::Found(page) => {
            let blocks = state.builder.render(&page.id, &page.doc_type, &page.content);
            let title = page.title.as_deref().unwrap_or("Home");
            let mut context = state.base_context(title, "/");
            context.insert("blocks", &blocks);
            context.insert("document_id", &page.id);
            context.insert("document_type", &page.doc_type);
            state.page("home.html", &context, StatusCode::OK)
        }
        Outcome::NotFound => state.not_found("/"),
        Outcome::Failed(e) => state.failed("/", &e),
    }
}

async fn posts_index<S: ContentSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Response {
    let outcome: Outcome<Vec<Post>> = cms::get_all_posts(&state.source, FetchContext::Live)
        .await
        .into();
    state.respond(outcome, "posts.html", "posts", "News", "/posts")
}

async fn post_page<S: ContentSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(slug): Path<String>,
) -> Response {
    let path = format!("/posts/{}", slug);
    let outcome: Outcome<Post> = cms::get_post_by_slug(&state.source, &slug, FetchContext::Live)
        .await
        .into();

    let title = match &outcome {
        Outcome::Found(post) => post.display_title().to_string(),
        _ => String::new(),
    };
    state.respond(outcome, "post.html", "post", &title, &path)
}

async fn events<S: ContentSource + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    let outcome: Outcome<Vec<Event>> = cms::get_all_events(&state.source, FetchContext::Live)
        .await
        .into();
    state.respond(outcome, "events.html", "events", "Events", "/events")
}

async fn favourites<S: ContentSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Response {
    let outcome: Outcome<Vec<Favourite>> = cms::get_favourites(&state.source, FetchContext::Live)
        .await
        .into();
    state.respond(
        outcome,
        "favourites.html",
        "favourites",
        "Favourites",
        "/favourites",
    )
}

async fn robots<S: ContentSource + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        robots_txt(state.config.base_url()),
    )
        .into_response()
}

async fn sitemap<S: ContentSource + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    match cms::get_all_posts(&state.source, FetchContext::Live).await {
        Ok(posts) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/xml")],
            sitemap_xml(state.config.base_url(), &posts),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("CMS fetch for /sitemap.xml failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

async fn fallback<S: ContentSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    uri: Uri,
) -> Response {
    state.not_found(uri.path())
}
