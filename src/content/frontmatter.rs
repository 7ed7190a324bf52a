//! Front-matter parsing

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::{BlogError, Result};
use crate::helpers::date::parse_date;

lazy_static! {
    /// A `---` line, optionally followed by trailing blanks
    static ref DELIMITER: Regex = Regex::new(r"(?m)^---[ \t]*\r?$").unwrap();

    /// A top-level `key: value` line, without any trailing comment
    static ref TOP_LEVEL_ENTRY: Regex =
        Regex::new(r"(?m)^([A-Za-z_][\w-]*):[ \t]+(.*?)[ \t]*(?:[ \t]#.*)?\r?$").unwrap();
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,

    /// Any other keys, in the order they were written
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from the content of the post `id`.
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(id: &str, content: &'a str) -> Result<(Self, &'a str)> {
        match split(content) {
            Ok(Some((yaml, body))) => Ok((Self::parse_yaml(id, yaml)?, body)),
            Ok(None) => Ok((FrontMatter::default(), strip_bom(content))),
            Err(reason) => Err(BlogError::parse(id, reason)),
        }
    }

    fn parse_yaml(id: &str, yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let mapping: Option<IndexMap<String, serde_yaml::Value>> = serde_yaml::from_str(yaml)
            .map_err(|e| BlogError::parse(id, format!("invalid front-matter: {}", e)))?;
        let mut extra = mapping.unwrap_or_default();

        let title = take_scalar(id, yaml, &mut extra, "title")?;
        let date = take_scalar(id, yaml, &mut extra, "date")?;

        Ok(Self { title, date, extra })
    }

    /// The literal `date` value together with the instant it denotes.
    ///
    /// Fails when the key is missing or does not parse as a calendar date.
    pub fn require_date(&self, id: &str) -> Result<(String, NaiveDateTime)> {
        let raw = self
            .date
            .as_deref()
            .ok_or_else(|| BlogError::parse(id, "missing `date` in front-matter"))?;

        let parsed = parse_date(raw)
            .ok_or_else(|| BlogError::parse(id, format!("invalid date '{}'", raw)))?;

        Ok((raw.to_string(), parsed))
    }
}

/// Split content into the front-matter block and the body.
///
/// `Ok(None)` when the file does not open with a delimiter line.
fn split(content: &str) -> std::result::Result<Option<(&str, &str)>, &'static str> {
    let content = strip_bom(content);

    let opening = match DELIMITER.find(content) {
        Some(m) if m.start() == 0 => m,
        _ => return Ok(None),
    };

    let rest = skip_newline(&content[opening.end()..]);
    match DELIMITER.find(rest) {
        Some(closing) => {
            let yaml = &rest[..closing.start()];
            let body = skip_newline(&rest[closing.end()..]);
            Ok(Some((yaml, body)))
        }
        None => Err("front-matter block is not closed"),
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

fn skip_newline(s: &str) -> &str {
    s.strip_prefix('\n').unwrap_or(s)
}

/// Remove `key` from the mapping, accepting strings and other plain scalars.
///
/// Numbers and booleans keep the text they were written as (`0x10`, `1.50`).
fn take_scalar(
    id: &str,
    yaml: &str,
    map: &mut IndexMap<String, serde_yaml::Value>,
    key: &str,
) -> Result<Option<String>> {
    match map.shift_remove(key) {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(
            literal_text(yaml, key).unwrap_or_else(|| n.to_string()),
        )),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(
            literal_text(yaml, key).unwrap_or_else(|| b.to_string()),
        )),
        Some(_) => Err(BlogError::parse(id, format!("`{}` must be a string", key))),
    }
}

/// Source text of a single-line top-level entry
fn literal_text(yaml: &str, key: &str) -> Option<String> {
    TOP_LEVEL_ENTRY
        .captures_iter(yaml)
        .find(|caps| &caps[1] == key)
        .map(|caps| caps[2].to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: 'Two Forms of Pre-rendering'
date: '2020-01-01'
draft: false
---

Next.js has two forms of pre-rendering.
"#;

        let (fm, body) = FrontMatter::parse("pre-rendering", content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Two Forms of Pre-rendering"));
        assert_eq!(fm.date.as_deref(), Some("2020-01-01"));
        assert_eq!(fm.extra.get("draft"), Some(&serde_yaml::Value::Bool(false)));
        assert_eq!(body, "\nNext.js has two forms of pre-rendering.\n");
    }

    #[test]
    fn test_unquoted_date_stays_literal() {
        let content = "---\ntitle: Hello\ndate: 2023-06-15\n---\nBody\n";
        let (fm, body) = FrontMatter::parse("hello", content).unwrap();
        assert_eq!(fm.date.as_deref(), Some("2023-06-15"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a heading\n\nSome text.\n";
        let (fm, body) = FrontMatter::parse("plain", content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = FrontMatter::parse("empty", "---\n---\nBody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_body_separator_is_not_frontmatter() {
        let content = "Intro\n\n---\n\ntitle: not metadata\n";
        let (fm, body) = FrontMatter::parse("rule", content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_frontmatter_is_parse_error() {
        let err = FrontMatter::parse("broken", "---\ntitle: Oops\n\nBody\n").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = FrontMatter::parse("bad", "---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_non_mapping_is_parse_error() {
        let err = FrontMatter::parse("list", "---\n- a\n- b\n---\n").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_nested_title_is_parse_error() {
        let err = FrontMatter::parse("nested", "---\ntitle:\n  en: Hi\n---\n").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_plain_scalars_keep_source_text() {
        let content = "---\ntitle: 0x10\ndate: 2023-06-15\n---\n";
        let (fm, _) = FrontMatter::parse("hex", content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("0x10"));

        let content = "---\ntitle: 1.50   # price\ndate: 2023-06-15\n---\n";
        let (fm, _) = FrontMatter::parse("float", content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("1.50"));

        let content = "---\r\ntitle: true\r\n---\r\n";
        let (fm, _) = FrontMatter::parse("flag", content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("true"));
    }

    #[test]
    fn test_flow_mapping_scalar_falls_back_to_value() {
        let (fm, _) = FrontMatter::parse("flow", "---\n{title: 42}\n---\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("42"));
    }

    #[test]
    fn test_require_date() {
        let fm = FrontMatter {
            date: Some("2023-01-01".to_string()),
            ..Default::default()
        };
        let (raw, parsed) = fm.require_date("a").unwrap();
        assert_eq!(raw, "2023-01-01");
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2023-01-01");

        let missing = FrontMatter::default().require_date("a").unwrap_err();
        assert!(missing.is_parse());
        assert!(missing.to_string().contains("missing `date`"));

        let invalid = FrontMatter {
            date: Some("2023-02-30".to_string()),
            ..Default::default()
        };
        assert!(invalid.require_date("a").unwrap_err().is_parse());
    }

    #[test]
    fn test_crlf_frontmatter() {
        let content = "---\r\ntitle: Windows\r\ndate: 2022-03-04\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse("crlf", content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(fm.date.as_deref(), Some("2022-03-04"));
        assert_eq!(body, "Body\r\n");
    }
}
