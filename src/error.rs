//! Error types for loading and rendering posts

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading posts and producing pages
#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Posts directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Failed to parse post '{id}': {reason}")]
    Parse { id: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlogError {
    pub(crate) fn parse(id: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// True for a missing posts directory or a missing post
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DirectoryNotFound(_) | Self::PostNotFound(_))
    }

    /// True for malformed front-matter or a bad date
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<tera::Error> for BlogError {
    fn from(e: tera::Error) -> Self {
        // tera nests the useful message in its source chain
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Self::Render(message)
    }
}

pub type Result<T, E = BlogError> = std::result::Result<T, E>;
