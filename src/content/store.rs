//! Markdown post store - reads posts from the posts directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post, PostMeta};
use crate::error::{BlogError, Result};
use crate::Blog;

/// Extension a file needs to count as a post
const POST_EXTENSION: &str = "md";

/// Reads posts from a directory of Markdown files.
///
/// Nothing is cached: every call goes back to disk.
pub struct PostStore {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostStore {
    /// Create a store over `posts_dir`
    pub fn new<P: Into<PathBuf>>(posts_dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer,
        }
    }

    /// Create the store configured for a site
    pub fn for_blog(blog: &Blog) -> Self {
        Self::new(
            blog.posts_dir.clone(),
            MarkdownRenderer::with_config(&blog.config.markdown),
        )
    }

    /// List the ids of all posts, in file-name order
    pub fn ids(&self) -> Result<Vec<String>> {
        if !self.posts_dir.is_dir() {
            return Err(BlogError::DirectoryNotFound(self.posts_dir.clone()));
        }

        let mut ids = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            let path = entry.path();

            if !entry.file_type().is_file() || !is_post_file(path) {
                tracing::debug!("Skipping non-post entry {:?}", path);
                continue;
            }

            match path.file_stem().and_then(|s| s.to_str()) {
                Some(id) => ids.push(id.to_string()),
                None => tracing::warn!("Skipping post with non UTF-8 file name {:?}", path),
            }
        }

        Ok(ids)
    }

    /// Load one post, rendering its body
    pub fn read(&self, id: &str) -> Result<Post> {
        let source = self.read_source(id)?;
        parse_post(id, &source, &self.renderer)
    }

    /// Load only the metadata of one post; the body is not rendered
    pub fn read_meta(&self, id: &str) -> Result<PostMeta> {
        let source = self.read_source(id)?;
        parse_meta(id, &source)
    }

    /// Path of the source file backing `id`
    pub fn path_for(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| self.posts_dir.join(format!("{}.{}", id, POST_EXTENSION)))
    }

    fn read_source(&self, id: &str) -> Result<String> {
        let path = self
            .path_for(id)
            .ok_or_else(|| BlogError::PostNotFound(id.to_string()))?;

        // ids() only lists regular files; anything else is not a post
        if !path.is_file() {
            return Err(BlogError::PostNotFound(id.to_string()));
        }

        tracing::debug!("Reading post {:?}", path);

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BlogError::PostNotFound(id.to_string()),
            io::ErrorKind::InvalidData => BlogError::parse(id, "file is not valid UTF-8"),
            _ => BlogError::Io(e),
        })
    }
}

/// Parse the raw content of a post into its metadata
pub fn parse_meta(id: &str, source: &str) -> Result<PostMeta> {
    let (fm, _) = FrontMatter::parse(id, source)?;
    PostMeta::from_front_matter(id, fm)
}

/// Parse the raw content of a post and render its body
pub fn parse_post(id: &str, source: &str, renderer: &MarkdownRenderer) -> Result<Post> {
    let (fm, body) = FrontMatter::parse(id, source)?;
    let meta = PostMeta::from_front_matter(id, fm)?;

    Ok(Post {
        id: id.to_string(),
        meta,
        content_html: renderer.render(body),
    })
}

/// Check if a file is a post file
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == POST_EXTENSION)
        .unwrap_or(false)
}

/// Ids name a file directly inside the posts directory
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
}
