//! robots.txt and sitemap.xml

use crate::content::Post;
use crate::helpers::{absolute_url, escape_xml};

/// Paths crawlers are asked to skip
const DISALLOWED: [&str; 4] = ["/admin/", "/api/", "/draft/", "/studio/"];

/// Static site sections listed in the sitemap
const SECTIONS: [&str; 4] = ["/", "/posts", "/events", "/favourites"];

/// Body of `/robots.txt`
pub fn robots_txt(base_url: &str) -> String {
    let mut body = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED {
        body.push_str(&format!("Disallow: {}\n", path));
    }
    body.push_str(&format!(
        "\nSitemap: {}\n",
        absolute_url(base_url, "sitemap.xml")
    ));
    body
}

/// Body of `/sitemap.xml`
pub fn sitemap_xml(base_url: &str, posts: &[Post]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for section in SECTIONS {
        xml.push_str(&format!(
            "  <url><loc>{}</loc></url>\n",
            escape_xml(&absolute_url(base_url, section))
        ));
    }

    for post in posts {
        xml.push_str("  <url>");
        xml.push_str(&format!(
            "<loc>{}</loc>",
            escape_xml(&absolute_url(base_url, &post.path()))
        ));
        if let Some(published) = post.published_at {
            xml.push_str(&format!(
                "<lastmod>{}</lastmod>",
                published.format("%Y-%m-%d")
            ));
        }
        xml.push_str("</url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use chrono::{TimeZone, Utc};

    fn post(slug: &str) -> Post {
        Post {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap()),
            excerpt: None,
            main_image: None,
            body: Vec::new(),
        }
    }

    #[test]
    fn test_robots_exact_body() {
        assert_eq!(
            robots_txt(DEFAULT_BASE_URL),
            "User-agent: *\n\
             Allow: /\n\
             Disallow: /admin/\n\
             Disallow: /api/\n\
             Disallow: /draft/\n\
             Disallow: /studio/\n\
             \n\
             Sitemap: https://0717records.com/sitemap.xml\n"
        );
    }

    #[test]
    fn test_robots_trims_trailing_slash() {
        let body = robots_txt("https://preview.example.com/");
        assert!(body
            .lines()
            .any(|l| l == "Sitemap: https://preview.example.com/sitemap.xml"));
    }

    #[test]
    fn test_sitemap_lists_every_post() {
        let xml = sitemap_xml(DEFAULT_BASE_URL, &[post("a"), post("b&c")]);
        assert_eq!(xml.matches("<loc>").count(), SECTIONS.len() + 2);
        assert!(xml.contains("<loc>https://0717records.com/posts/a</loc><lastmod>2024-05-04</lastmod>"));
        assert!(xml.contains("https://0717records.com/posts/b&amp;c"));
    }
}
