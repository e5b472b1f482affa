//! Sanity query API client

use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use super::CmsError;
use crate::config::SanityConfig;

/// Where a fetch runs, which decides the host, credentials and caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchContext {
    /// Server-side render against the uncached API, revalidated after a window
    Live,
    /// Client-style fetch through the CDN, never revalidated
    Client,
}

impl FetchContext {
    /// API host suffix after the project id
    pub fn api_host(self) -> &'static str {
        match self {
            FetchContext::Live => "api.sanity.io",
            FetchContext::Client => "apicdn.sanity.io",
        }
    }

    /// Whether the read token is attached
    pub fn sends_token(self) -> bool {
        matches!(self, FetchContext::Live)
    }

    /// `Cache-Control` value for a successful response built from this context
    pub fn cache_control(self, revalidate_secs: u64) -> String {
        match self {
            FetchContext::Live => format!(
                "public, s-maxage={}, stale-while-revalidate",
                revalidate_secs
            ),
            FetchContext::Client => "no-store".to_string(),
        }
    }
}

/// A GROQ query with its named parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub groq: &'static str,
    pub params: Vec<(String, Value)>,
}

impl Query {
    pub fn new(groq: &'static str) -> Self {
        Self {
            groq,
            params: Vec::new(),
        }
    }

    /// Bind `$name` to a JSON value
    pub fn bind(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    /// Look up a bound parameter
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// URL query pairs: the GROQ text followed by JSON-encoded `$params`
    pub fn url_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("query".to_string(), self.groq.to_string())];
        for (name, value) in &self.params {
            pairs.push((format!("${}", name), value.to_string()));
        }
        pairs
    }
}

/// The seam between data access and the CMS transport
pub trait ContentSource: Send + Sync {
    /// Run a query and return the raw `result` value (`null` when nothing matched)
    fn fetch(
        &self,
        query: &Query,
        context: FetchContext,
    ) -> impl Future<Output = Result<Value, CmsError>> + Send;
}

/// Body of a successful query response
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// HTTP client for the Sanity query API
#[derive(Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    config: SanityConfig,
}

impl SanityClient {
    /// Build a client; fails if no project id is configured
    pub fn new(config: &SanityConfig) -> Result<Self, CmsError> {
        if config.project_id.trim().is_empty() {
            return Err(CmsError::Config(
                "sanity.project_id (or SANITY_PROJECT_ID) is required".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("records-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Query endpoint for a fetch context
    pub fn endpoint(&self, context: FetchContext) -> String {
        format!(
            "https://{}.{}/v{}/data/query/{}",
            self.config.project_id,
            context.api_host(),
            self.config.api_version.trim_start_matches('v'),
            self.config.dataset
        )
    }
}

impl ContentSource for SanityClient {
    async fn fetch(&self, query: &Query, context: FetchContext) -> Result<Value, CmsError> {
        let url = self.endpoint(context);
        let mut pairs = query.url_pairs();
        pairs.push(("perspective".to_string(), "published".to_string()));

        let mut request = self.http.get(&url).query(&pairs);
        if context.sends_token() {
            if let Some(token) = &self.config.token {
                request = request.bearer_auth(token);
            }
        }

        tracing::debug!("CMS fetch ({:?}) {}", context, query.groq);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: QueryResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> SanityClient {
        let config = SanityConfig {
            project_id: "abc123".to_string(),
            ..SanityConfig::default()
        };
        SanityClient::new(&config).unwrap()
    }

    #[test]
    fn test_requires_project_id() {
        let err = SanityClient::new(&SanityConfig::default()).err().unwrap();
        assert!(matches!(err, CmsError::Config(_)));
    }

    #[test]
    fn test_context_hosts() {
        let client = client();
        assert_eq!(
            client.endpoint(FetchContext::Live),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
        assert_eq!(
            client.endpoint(FetchContext::Client),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn test_only_live_sends_token() {
        assert!(FetchContext::Live.sends_token());
        assert!(!FetchContext::Client.sends_token());
    }

    #[test]
    fn test_cache_control() {
        assert_eq!(
            FetchContext::Live.cache_control(60),
            "public, s-maxage=60, stale-while-revalidate"
        );
        assert_eq!(FetchContext::Client.cache_control(60), "no-store");
    }

    #[test]
    fn test_params_are_json_encoded() {
        let query = Query::new("*[slug.current == $slug][0]").bind("slug", "first-post");
        let pairs = query.url_pairs();
        assert_eq!(pairs[0].0, "query");
        assert_eq!(pairs[1], ("$slug".to_string(), "\"first-post\"".to_string()));
        assert_eq!(query.param("slug"), Some(&json!("first-post")));
        assert_eq!(query.param("missing"), None);
    }

    #[test]
    fn test_missing_result_is_null() {
        let parsed: QueryResponse = serde_json::from_str(r#"{"ms": 3}"#).unwrap();
        assert!(parsed.result.is_null());
    }
}
