//! Content module - posts, front-matter and Markdown processing

mod frontmatter;
pub mod index;
mod markdown;
mod post;
pub mod store;

pub use frontmatter::FrontMatter;
pub use index::{PostIndex, PostParams, PostPath};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostData, PostMeta, PostSummary};
pub use store::PostStore;
