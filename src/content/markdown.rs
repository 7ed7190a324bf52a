//! Markdown rendering with syntax highlighting and sanitizing

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::MarkdownConfig;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
    sanitizer: Option<ammonia::Builder<'static>>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_config(&MarkdownConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(config: &MarkdownConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.highlight,
            line_numbers: config.line_number,
            sanitizer: config.sanitize.then(sanitizer),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off beforehand, so no metadata block option here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.highlight => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang
                            .split_whitespace()
                            .next()
                            .map(|l| l.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) if in_code_block => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        match &self.sanitizer {
            Some(builder) => builder.clean(&html_output).to_string(),
            None => html_output,
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) => {
                // syntect wraps its output in a styled <pre>; keep only the spans
                let inner = strip_pre(&highlighted);
                if self.line_numbers {
                    self.add_line_numbers(inner, lang)
                } else {
                    format!(
                        r#"<pre class="highlight"><code class="language-{}">{}</code></pre>"#,
                        lang, inner
                    )
                }
            }
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitizer that drops scripts and unsafe URLs but keeps highlight markup
/// and task list checkboxes
fn sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tags(["input"])
        .add_generic_attributes(["class", "id"])
        .add_tag_attributes("span", ["style"])
        .add_tag_attributes("pre", ["style"])
        .add_tag_attributes("input", ["checked", "disabled"])
        .set_tag_attribute_value("input", "type", "checkbox");
    builder
}

/// Strip the outer `<pre ...>` / `</pre>` emitted by syntect
fn strip_pre(html: &str) -> &str {
    let inner = match html.find('>') {
        Some(pos) if html.starts_with("<pre") => &html[pos + 1..],
        _ => html,
    };
    inner
        .trim_end()
        .strip_suffix("</pre>")
        .unwrap_or(inner)
        .trim_matches('\n')
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is *a* test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is <em>a</em> test.</p>"));
    }

    #[test]
    fn test_render_link() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[Next.js](https://nextjs.org)");
        assert!(html.contains(r#"href="https://nextjs.org""#));
        assert!(html.contains(">Next.js</a>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"class="highlight""#));
        assert!(html.contains("language-rust"));
        assert!(html.contains("<span"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_render_code_block_with_line_numbers() {
        let config = MarkdownConfig {
            line_number: true,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::with_config(&config);
        let html = renderer.render("```js\nlet a = 1;\nlet b = 2;\n```");
        assert!(html.contains(r#"<span class="line-number">1</span>"#));
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_render_code_block_without_highlight() {
        let config = MarkdownConfig {
            highlight: false,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::with_config(&config);
        let html = renderer.render("```\na < b\n```");
        assert!(html.contains("<pre><code>a &lt; b\n</code></pre>"));
    }

    #[test]
    fn test_sanitize_strips_script() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(
            "Hi<script>alert(1)</script>\n\n<a href=\"javascript:alert(1)\" onclick=\"x()\">x</a>",
        );
        assert!(!html.contains("<script"));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("onclick"));
        assert!(html.contains("Hi"));
    }

    #[test]
    fn test_task_list_checkboxes_survive_sanitizing() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- [x] done\n- [ ] todo\n");
        assert_eq!(html.matches("<input").count(), 2);
        assert_eq!(html.matches(r#"type="checkbox""#).count(), 2);
        assert_eq!(html.matches("checked").count(), 1);
        assert!(html.find("checked").unwrap() < html.find("done").unwrap());
    }

    #[test]
    fn test_sanitize_forces_input_to_checkbox() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(r#"<input type="password" onfocus="x()">"#);
        assert!(html.contains(r#"type="checkbox""#));
        assert!(!html.contains("password"));
        assert!(!html.contains("onfocus"));
    }

    #[test]
    fn test_sanitize_can_be_disabled() {
        let config = MarkdownConfig {
            sanitize: false,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::with_config(&config);
        let html = renderer.render("<div onclick=\"x()\">raw</div>");
        assert!(html.contains("onclick"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let md = "# Title\n\n```python\nprint('hi')\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert_eq!(renderer.render(md), renderer.render(md));
    }

    #[test]
    fn test_strip_pre() {
        let html = "<pre style=\"background-color:#fff;\">\n<span>x</span>\n</pre>\n";
        assert_eq!(strip_pre(html), "<span>x</span>");
    }
}
