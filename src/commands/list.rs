//! List posts

use anyhow::Result;

use crate::content::{PostIndex, PostStore};
use crate::Blog;

/// Print every post, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let store = PostStore::for_blog(blog);
    let posts = PostIndex::new(&store).all_posts_sorted_by_date_desc()?;

    println!("Posts ({}):", posts.len());
    for line in format_lines(&posts) {
        println!("{}", line);
    }

    Ok(())
}

fn format_lines(posts: &[crate::content::PostSummary]) -> Vec<String> {
    posts
        .iter()
        .map(|post| format!("  {} - {} [{}]", post.date, post.title, post.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostSummary;
    use crate::helpers::date::parse_date;

    #[test]
    fn test_format_lines() {
        let posts = vec![PostSummary {
            id: "ssg-ssr".to_string(),
            title: "SSG vs SSR".to_string(),
            date: "2020-01-02".to_string(),
            published: parse_date("2020-01-02").unwrap(),
        }];
        assert_eq!(format_lines(&posts), vec!["  2020-01-02 - SSG vs SSR [ssg-ssr]"]);
    }
}
