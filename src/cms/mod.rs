//! CMS access: client, fetch contexts and queries

mod client;
mod error;
pub mod queries;

pub use client::{ContentSource, FetchContext, Query, SanityClient};
pub use error::CmsError;
pub use queries::{get_all_events, get_all_posts, get_favourites, get_home_page, get_post_by_slug};

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory content source for tests

    use super::{CmsError, ContentSource, FetchContext, Query};
    use serde_json::Value;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&Query, FetchContext) -> Result<Value, CmsError> + Send + Sync>;

    pub struct StaticSource {
        respond: Responder,
        calls: Mutex<Vec<(&'static str, FetchContext)>>,
    }

    impl StaticSource {
        pub fn new<F>(respond: F) -> Self
        where
            F: Fn(&Query, FetchContext) -> Result<Value, CmsError> + Send + Sync + 'static,
        {
            Self {
                respond: Box::new(respond),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// A source whose every fetch fails like an unavailable service
        pub fn failing() -> Self {
            Self::new(|_, _| {
                Err(CmsError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                })
            })
        }

        pub fn calls(&self) -> Vec<(&'static str, FetchContext)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ContentSource for StaticSource {
        async fn fetch(&self, query: &Query, context: FetchContext) -> Result<Value, CmsError> {
            self.calls.lock().unwrap().push((query.groq, context));
            (self.respond)(query, context)
        }
    }
}
