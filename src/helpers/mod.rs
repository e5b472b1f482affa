//! Helper functions shared by templates, the server and the renderers

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
