//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    pub intro: String,
    pub profile_image: String,
    /// Link target for the sample-site note under the intro; empty hides it
    pub tutorial_url: String,
    /// Logo overlaid on the generated social preview image; empty for none
    pub og_logo: String,
    pub date_format: String,

    // URL
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub output_dir: String,

    // Writing
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My First Next.js Site!".to_string(),
            author: "Juno Tesoro".to_string(),
            description: "Learn how to build a personal website using Next.js".to_string(),
            intro: "I'm Juno. I'm a software developer and a purveyor of miseries and platitudes."
                .to_string(),
            profile_image: "/images/profile.jpeg".to_string(),
            tutorial_url: "https://nextjs.org/learn".to_string(),
            og_logo: "https://assets.vercel.com/image/upload/front/assets/design/nextjs-black-logo.svg"
                .to_string(),
            date_format: "LLLL d, yyyy".to_string(),

            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            output_dir: "out".to_string(),

            markdown: MarkdownConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Site-relative URL for a path under `root`
    pub fn url_for(&self, path: &str) -> String {
        let root = self.root.trim_end_matches('/');
        let path = path.trim_start_matches('/');

        if path.is_empty() {
            format!("{}/", root)
        } else {
            format!("{}/{}", root, path)
        }
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub highlight: bool,
    pub line_number: bool,
    pub theme: String,
    pub sanitize: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            line_number: false,
            theme: "InspiredGitHub".to_string(),
            sanitize: true,
        }
    }
}
