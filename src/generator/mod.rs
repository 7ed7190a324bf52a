//! Generator module - writes static HTML files for every route

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::PostStore;
use crate::routes::{self, HomeRoute, PostRoute};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Blog;

/// What a generation pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Number of post pages written
    pub posts: usize,
    /// Number of static assets copied
    pub assets: usize,
}

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    store: PostStore,
    renderer: TemplateRenderer,
    site: SiteData,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new(&blog.config)?;

        Ok(Self {
            blog: blog.clone(),
            store: PostStore::for_blog(blog),
            renderer,
            site: SiteData::from_config(&blog.config),
        })
    }

    /// Generate the entire site.
    ///
    /// Post pages from earlier builds are removed first, so only enumerated ids ship.
    pub fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.blog.output_dir)?;

        let posts_out = self.blog.output_dir.join("posts");
        if posts_out.exists() {
            fs::remove_dir_all(&posts_out)
                .with_context(|| format!("Failed to clear {:?}", posts_out))?;
        }

        let assets = self.copy_public_assets()?;

        self.generate_home_page()?;
        let posts = self.generate_post_pages()?;
        self.generate_api()?;

        Ok(GenerateReport { posts, assets })
    }

    /// Generate `/index.html`
    fn generate_home_page(&self) -> Result<()> {
        let props = HomeRoute::new(&self.store)
            .props()
            .context("Failed to load posts for the home page")?;

        let html = self.renderer.render_home(&self.site, &props)?;
        self.write_file("index.html", &html)?;

        tracing::debug!("Generated home page with {} posts", props.all_posts_data.len());
        Ok(())
    }

    /// Generate `/posts/<id>/index.html` for every enumerated path
    fn generate_post_pages(&self) -> Result<usize> {
        let route = PostRoute::new(&self.store);
        let static_paths = route.paths()?;

        for path in &static_paths.paths {
            let props = route
                .props(path)
                .with_context(|| format!("Failed to generate post '{}'", path.id()))?;

            let html = self.renderer.render_post(&self.site, &props)?;
            self.write_file(&format!("posts/{}/index.html", path.id()), &html)?;

            tracing::debug!("Generated post: {}", path.id());
        }

        Ok(static_paths.paths.len())
    }

    /// Write the static `/api/hello` payload
    fn generate_api(&self) -> Result<()> {
        let json = serde_json::to_string(&routes::hello())?;
        self.write_file("api/hello.json", &json)
    }

    /// Copy everything under the public directory into the output directory
    fn copy_public_assets(&self) -> Result<usize> {
        let public_dir = &self.blog.public_dir;
        if !public_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(public_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = path.strip_prefix(public_dir)?;
            let dest = self.blog.output_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static assets", copied);
        Ok(copied)
    }

    /// Write a file relative to the output directory
    fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.blog.output_dir.join(relative);
        write_creating_parents(&path, content)
    }
}

fn write_creating_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
