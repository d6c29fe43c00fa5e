//! CLI entry point for homepage-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "homepage-rs")]
#[command(version)]
#[command(about = "A personal homepage and blog server for Markdown posts", long_about = None)]
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
    /// Serve the site
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// List posts, newest first
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "homepage_rs=debug,info"
    } else {
        "homepage_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine site directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Server { port, ip } => {
            let site = homepage_rs::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            homepage_rs::server::start(&site, &ip, port).await?;
        }

        Commands::New { title } => {
            let site = homepage_rs::Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            homepage_rs::commands::new::run(&site, &title)?;
        }

        Commands::List => {
            let site = homepage_rs::Site::new(&base_dir)?;
            homepage_rs::commands::list::run(&site)?;
        }

        Commands::Version => {
            println!("homepage-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
