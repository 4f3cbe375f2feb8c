use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use lanyard::config::Config;
use lanyard::service::{FeedService, FeedView};

/// Get the config file path (~/.config/lanyard/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("lanyard")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "lanyard", about = "Conference companion feed engine")]
struct Args {
    /// Path to config file (default: ~/.config/lanyard/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Feed category to refresh
    #[arg(long, default_value = "news")]
    category: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let service = FeedService::new(config)?;
    if service.category_url(&args.category).is_none() {
        eprintln!("Error: no feed configured for category '{}'", args.category);
        eprintln!();
        eprintln!("Add one to {}:", config_path.display());
        eprintln!("  [feeds]");
        eprintln!("  {} = \"https://example.org/feed/\"", args.category);
        std::process::exit(1);
    }

    let mut view = FeedView::default();
    let count = service.refresh(&mut view, &args.category).await;

    if view.posts.is_empty() {
        // Fetch/parse failures surface as an empty list; details are in the logs
        println!("No posts.");
        return Ok(());
    }

    println!("{} posts in '{}':", count, args.category);
    println!();
    for post in &view.posts {
        println!("[{}] {}", post.author, post.timestamp);
        println!("  {}", post.item.title);
        if !post.item.link.is_empty() {
            println!("  {}", post.item.link);
        }
        println!();
    }

    Ok(())
}
