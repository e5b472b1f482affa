//! CLI entry point for records-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "records-site")]
#[command(version)]
#[command(about = "Server-rendered website for 0717 Records", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to server.port in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip in _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List CMS content
    List {
        /// Type of content to list (posts, events, favourites, home)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Print block schemas for the authoring tool
    Schema {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print robots.txt for the configured base URL
    Robots,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "records_site=debug,tower_http=debug,info"
    } else {
        "records_site=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Server { port, ip } => {
            let site = records_site::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            site.serve(&ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = records_site::Site::new(&base_dir)?;
            records_site::commands::list::run(&site, &r#type).await?;
        }

        Commands::Schema { out } => {
            records_site::commands::schema::run(out.as_deref())?;
        }

        Commands::Robots => {
            let site = records_site::Site::new(&base_dir)?;
            print!("{}", records_site::server::robots_txt(site.config.base_url()));
        }

        Commands::Version => {
            println!("records-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
