//! List CMS content

use anyhow::Result;

use crate::cms::{self, FetchContext};
use crate::helpers::format_in_tz;
use crate::Site;

/// List site content by type, read through the CDN
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    let client = site.client()?;
    let tz = site.config.tz();
    let context = FetchContext::Client;

    match content_type {
        "post" | "posts" => {
            let posts = cms::get_all_posts(&client, context).await?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .published_at
                    .map(|d| format_in_tz(&d, tz, "YYYY-MM-DD"))
                    .unwrap_or_else(|| "unpublished".to_string());
                println!("  {} - {} [{}]", date, post.display_title(), post.path());
            }
        }
        "event" | "events" => {
            let events = cms::get_all_events(&client, context).await?;
            println!("Events ({}):", events.len());
            for event in events {
                println!(
                    "  {} - {} @ {}",
                    format_in_tz(&event.date, tz, "YYYY-MM-DD HH:mm"),
                    event.display_title(),
                    event.venue.as_deref().unwrap_or("TBA")
                );
            }
        }
        "favourite" | "favourites" => {
            let favourites = cms::get_favourites(&client, context).await?;
            println!("Favourites ({}):", favourites.len());
            for favourite in favourites {
                match &favourite.artist {
                    Some(artist) => println!("  {} - {}", artist, favourite.display_title()),
                    None => println!("  {}", favourite.display_title()),
                }
            }
        }
        "home" | "page" => match cms::get_home_page(&client, context).await? {
            Some(page) => {
                println!("Home page {} ({} blocks):", page.id, page.content.len());
                for (i, block) in page.content.iter().enumerate() {
                    println!(
                        "  {:>2}. {} [{}]",
                        i + 1,
                        block.type_name(),
                        block.key().unwrap_or("-")
                    );
                }
            }
            None => println!("No home page document found"),
        },
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, events, favourites, home",
                content_type
            );
        }
    }

    Ok(())
}
