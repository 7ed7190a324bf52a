//! Static routes: enumerate paths first, then resolve props per path.
//!
//! Both phases are plain function calls, so pages can be generated and
//! tested without anything listening on a socket.

use serde::Serialize;

use crate::content::{PostData, PostIndex, PostPath, PostStore, PostSummary};
use crate::error::{BlogError, Result};

/// Result of path enumeration for a dynamic page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticPaths {
    pub paths: Vec<PostPath>,
    /// Paths outside `paths` are 404s; nothing is generated on demand
    pub fallback: bool,
}

impl StaticPaths {
    pub fn contains(&self, id: &str) -> bool {
        self.paths.iter().any(|p| p.id() == id)
    }
}

/// Props of the home page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeProps {
    pub all_posts_data: Vec<PostSummary>,
}

/// Props of a post detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProps {
    pub post_data: PostData,
}

/// Payload of the `/api/hello` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelloResponse {
    pub text: String,
}

/// Home page (`/`)
pub struct HomeRoute<'a> {
    store: &'a PostStore,
}

impl<'a> HomeRoute<'a> {
    pub fn new(store: &'a PostStore) -> Self {
        Self { store }
    }

    pub fn props(&self) -> Result<HomeProps> {
        let all_posts_data = PostIndex::new(self.store).all_posts_sorted_by_date_desc()?;
        Ok(HomeProps { all_posts_data })
    }
}

/// Post detail page (`/posts/:id`)
pub struct PostRoute<'a> {
    store: &'a PostStore,
}

impl<'a> PostRoute<'a> {
    pub fn new(store: &'a PostStore) -> Self {
        Self { store }
    }

    pub fn paths(&self) -> Result<StaticPaths> {
        Ok(StaticPaths {
            paths: PostIndex::new(self.store).all_ids_for_routing()?,
            fallback: false,
        })
    }

    /// Resolve props for one enumerated path
    pub fn props(&self, path: &PostPath) -> Result<PostProps> {
        let post = self.store.read(path.id())?;
        Ok(PostProps {
            post_data: post.to_data(),
        })
    }

    /// Resolve props for an arbitrary id, enforcing `fallback: false`
    pub fn props_for_id(&self, id: &str) -> Result<PostProps> {
        let paths = self.paths()?;
        if !paths.contains(id) {
            return Err(BlogError::PostNotFound(id.to_string()));
        }
        self.props(&PostPath::new(id))
    }
}

/// The `/api/hello` stub
pub fn hello() -> HelloResponse {
    HelloResponse {
        text: "Hello".to_string(),
    }
}
