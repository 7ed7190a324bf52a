//! Post models

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use super::FrontMatter;
use crate::error::Result;

/// Parsed front-matter of one post, with its date validated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMeta {
    /// Post title, falls back to the id when the front-matter has none
    pub title: String,

    /// Date exactly as written in the front-matter
    pub date: String,

    /// Parsed `date`, used for ordering
    #[serde(skip)]
    pub published: NaiveDateTime,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PostMeta {
    /// Validate front-matter for the post `id`
    pub fn from_front_matter(id: &str, fm: FrontMatter) -> Result<Self> {
        let (date, published) = fm.require_date(id)?;
        Ok(Self {
            title: fm.title.unwrap_or_else(|| id.to_string()),
            date,
            published,
            extra: fm.extra,
        })
    }
}

/// A blog post: metadata plus the rendered body
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub meta: PostMeta,
    /// Body rendered to sanitized HTML
    pub content_html: String,
}

impl Post {
    /// Props handed to the post detail page
    pub fn to_data(&self) -> PostData {
        PostData {
            id: self.id.clone(),
            title: self.meta.title.clone(),
            date: self.meta.date.clone(),
            content_html: self.content_html.clone(),
        }
    }
}

/// Summary of a post for listing views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(skip)]
    pub published: NaiveDateTime,
}

impl PostSummary {
    pub fn new(id: String, meta: PostMeta) -> Self {
        Self {
            id,
            title: meta.title,
            date: meta.date,
            published: meta.published,
        }
    }
}

/// Everything the post detail page needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub id: String,
    pub title: String,
    pub date: String,
    pub content_html: String,
}
