//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create `<posts_dir>/<slug>.md` with a front-matter scaffold.
///
/// The slug defaults to the slugified title.
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };

    if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
        anyhow::bail!("Invalid post slug: {:?}", slug);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    let file_path = blog.posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(&file_path, scaffold(title, &today))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Front-matter for a fresh post; values are single-quoted YAML scalars
fn scaffold(title: &str, date: &str) -> String {
    format!(
        "---\ntitle: '{}'\ndate: '{}'\n---\n\n",
        title.replace('\'', "''"),
        date
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::PostStore;
    use tempfile::TempDir;

    #[test]
    fn test_scaffold_quotes_title() {
        assert_eq!(
            scaffold("It's: here", "2023-06-15"),
            "---\ntitle: 'It''s: here'\ndate: '2023-06-15'\n---\n\n"
        );
    }

    #[test]
    fn test_created_post_is_readable() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());

        let path = create_post(&blog, "It's a New Post", None).unwrap();
        assert_eq!(path, blog.posts_dir.join("it-s-a-new-post.md"));

        let store = PostStore::for_blog(&blog);
        let post = store.read("it-s-a-new-post").unwrap();
        assert_eq!(post.meta.title, "It's a New Post");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());

        create_post(&blog, "Hello", Some("hello")).unwrap();
        let err = create_post(&blog, "Hello again", Some("hello")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_rejects_bad_slug() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());
        assert!(create_post(&blog, "x", Some("../escape")).is_err());
        assert!(create_post(&blog, "!!!", None).is_err());
    }
}
