//! Built-in blog templates using the Tera template engine
//!
//! Templates are embedded in the binary; site values reach them through
//! `SiteData`, never through globals.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::helpers::date::display_date;
use crate::routes::{HomeProps, PostProps};

/// Characters `encodeURI` leaves alone
const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescape stays on; only the escaping of '/' is dropped so URLs read normally
        tera.set_escape_fn(escape_html);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
        ])?;

        let date_format = config.date_format.clone();
        tera.register_filter(
            "display_date",
            move |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                display_date_filter(value, args, &date_format)
            },
        );

        Ok(Self { tera })
    }

    /// Render the home page
    pub fn render_home(&self, site: &SiteData, props: &HomeProps) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("home", &true);
        context.insert("all_posts_data", &props.all_posts_data);
        self.render("index.html", &context)
    }

    /// Render a post detail page
    pub fn render_post(&self, site: &SiteData, props: &PostProps) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("home", &false);
        context.insert("post_data", &props.post_data);
        self.render("post.html", &context)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: the date display component.
///
/// `{{ date | display_date }}` or `{{ date | display_date(format="yyyy-MM-dd") }}`
fn display_date_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
    default_format: &str,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("display_date", "format", String, val),
        None => default_format.to_string(),
    };

    Ok(tera::Value::String(display_date(&s, &format)))
}

/// HTML escaping for text and attribute values
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Site-wide values for templates
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub author: String,
    pub description: String,
    pub intro: String,
    pub tutorial_url: String,
    pub profile_image: String,
    pub og_image: String,
    pub root: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            author: config.author.clone(),
            description: config.description.clone(),
            intro: config.intro.clone(),
            tutorial_url: config.tutorial_url.clone(),
            profile_image: config.profile_image.clone(),
            og_image: og_image_url(&config.title, &config.og_logo),
            root: config.url_for(""),
        }
    }
}

/// Social preview image generated from the site title
fn og_image_url(title: &str, logo: &str) -> String {
    let mut url = format!(
        "https://og-image.now.sh/{}.png?theme=light&md=0&fontSize=75px",
        utf8_percent_encode(title, URI)
    );
    if !logo.is_empty() {
        url.push_str("&images=");
        url.extend(utf8_percent_encode(logo, URI_COMPONENT));
    }
    url
}
