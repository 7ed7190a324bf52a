//! Post index - route enumeration and the date-sorted post listing

use serde::Serialize;

use super::{PostStore, PostSummary};
use crate::error::Result;

/// Route parameters of a post page (`/posts/:id`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostParams {
    pub id: String,
}

/// One statically generated post route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPath {
    pub params: PostParams,
}

impl PostPath {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            params: PostParams { id: id.into() },
        }
    }

    pub fn id(&self) -> &str {
        &self.params.id
    }
}

/// Aggregates metadata over every post in a store
pub struct PostIndex<'a> {
    store: &'a PostStore,
}

impl<'a> PostIndex<'a> {
    pub fn new(store: &'a PostStore) -> Self {
        Self { store }
    }

    /// One route per post
    pub fn all_ids_for_routing(&self) -> Result<Vec<PostPath>> {
        Ok(self.store.ids()?.into_iter().map(PostPath::new).collect())
    }

    /// Summaries of all posts, newest first.
    ///
    /// The first post with a missing or invalid date fails the whole listing.
    /// Bad posts are never skipped.
    pub fn all_posts_sorted_by_date_desc(&self) -> Result<Vec<PostSummary>> {
        let mut posts = Vec::new();

        for id in self.store.ids()? {
            let meta = self.store.read_meta(&id)?;
            posts.push(PostSummary::new(id, meta));
        }

        sort_by_date_desc(&mut posts);

        tracing::debug!("Indexed {} posts", posts.len());
        Ok(posts)
    }
}

/// Sort by date descending; equal dates keep their current order
pub fn sort_by_date_desc(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| b.published.cmp(&a.published));
}
