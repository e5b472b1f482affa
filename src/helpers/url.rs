//! URL helper functions

/// Join a base URL and a site path without doubling slashes
///
/// # Examples
/// ```ignore
/// absolute_url("https://0717records.com/", "/posts/x") // -> "https://0717records.com/posts/x"
/// ```
pub fn absolute_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Whether a link leaves the site
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}
