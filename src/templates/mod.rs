//! Embedded HTML shells rendered with the Tera template engine
//!
//! All templates are compiled into the binary; there is no theme
//! directory to configure or load at runtime.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{CompiledContent, ListingEntry};
use crate::helpers::date::format_date_string;

/// Site fields exposed to every template.
#[derive(Debug, Serialize)]
struct SiteData {
    title: String,
    description: String,
    author: String,
    date_format: String,
}

impl SiteData {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

/// One row of the listing page.
#[derive(Debug, Serialize)]
struct ListingItem<'a> {
    slug: &'a str,
    title: &'a str,
    description: Option<&'a str>,
}

/// A compiled article handed to the article shell.
#[derive(Debug, Serialize)]
struct ArticleData<'a> {
    title: &'a str,
    description: Option<&'a str>,
    date: Option<&'a str>,
    body: &'a str,
}

/// Template renderer with the embedded shells loaded.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The article body is already HTML; autoescaping would mangle it
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("shell/layout.html")),
            ("index.html", include_str!("shell/index.html")),
            ("article.html", include_str!("shell/article.html")),
            ("not_found.html", include_str!("shell/not_found.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render the listing page.
    pub fn render_index(&self, config: &SiteConfig, entries: &[ListingEntry]) -> Result<String> {
        let items: Vec<ListingItem> = entries
            .iter()
            .map(|e| ListingItem {
                slug: &e.slug,
                title: &e.content.title,
                description: e.content.description.as_deref(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("meta_description", &config.description);
        context.insert("posts", &items);
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render one compiled article (post or page).
    pub fn render_article(&self, config: &SiteConfig, content: &CompiledContent) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert(
            "meta_description",
            content.description.as_deref().unwrap_or_default(),
        );
        context.insert(
            "article",
            &ArticleData {
                title: &content.title,
                description: content.description.as_deref(),
                date: content.date.as_deref(),
                body: &content.body_html,
            },
        );
        Ok(self.tera.render("article.html", &context)?)
    }

    /// Render the not-found page.
    pub fn render_not_found(&self, config: &SiteConfig) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("meta_description", "");
        Ok(self.tera.render("not_found.html", &context)?)
    }
}

/// Tera filter: format a front-matter date string for display
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%B %-d, %Y".to_string(),
    };
    Ok(tera::Value::String(format_date_string(&s, &format)))
}
