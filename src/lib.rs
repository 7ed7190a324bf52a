//! juno-blog: a small static blog generator
//!
//! Markdown posts with YAML front-matter are loaded from a directory,
//! indexed by date and rendered to static HTML with embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod routes;
pub mod templates;

pub use error::BlogError;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Markdown posts directory
    pub posts_dir: PathBuf,
    /// Static assets copied verbatim
    pub public_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref();
        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            posts_dir,
            public_dir,
            output_dir,
        }
    }

    /// Generate the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
