//! CLI entry point for juno-blog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "juno-blog")]
#[command(version)]
#[command(about = "Build a static blog from a directory of Markdown posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Generate the static site
    #[command(alias = "b")]
    Build,

    /// List posts, newest first
    List,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name (without .md) for the post; defaults to the slugified title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Remove the output directory
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "juno_blog=debug,info"
    } else {
        "juno_blog=info"
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
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Build => {
            let blog = juno_blog::Blog::new(&base_dir)?;
            tracing::info!("Building site from {:?}", blog.posts_dir);
            blog.build()?;
            println!("Built successfully!");
        }

        Commands::List => {
            let blog = juno_blog::Blog::new(&base_dir)?;
            juno_blog::commands::list::run(&blog)?;
        }

        Commands::New { title, slug } => {
            let blog = juno_blog::Blog::new(&base_dir)?;
            let path = blog.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Clean => {
            let blog = juno_blog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("juno-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
