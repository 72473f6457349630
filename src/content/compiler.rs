//! MDX compiler adapter - front-matter plus body rendering with
//! presentation overrides for images and fenced code blocks

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::{CompileError, ContentCategory, FrontMatter};

/// One compiled content file: typed front-matter fields plus the rendered
/// document body. Built per request and discarded after the response.
#[derive(Debug, Clone)]
pub struct CompiledContent {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub image_url: Option<String>,
    /// Rendered HTML body
    pub body_html: String,
}

/// How embedded images are sized in the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionPolicy {
    /// Fixed intrinsic dimensions (post articles).
    Fixed { width: u32, height: u32 },
    /// Natural dimensions, constrained to the container (static pages).
    Natural,
}

impl DimensionPolicy {
    pub fn for_category(category: ContentCategory) -> Self {
        match category {
            ContentCategory::Post => DimensionPolicy::Fixed {
                width: 800,
                height: 450,
            },
            ContentCategory::Page => DimensionPolicy::Natural,
        }
    }
}

/// Rendering override chosen for a code block, resolved purely from the
/// fence's declared language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CodeOverride {
    /// No language tag: render the raw text as bold inline content.
    BoldInline,
    /// Language tag present: render through the highlighter.
    Highlighted { language: String },
}

fn code_override(kind: &CodeBlockKind) -> CodeOverride {
    match kind {
        CodeBlockKind::Fenced(lang) if !lang.is_empty() => CodeOverride::Highlighted {
            language: lang.to_string(),
        },
        _ => CodeOverride::BoldInline,
    }
}

/// Compiles raw MDX text into [`CompiledContent`].
///
/// Syntax and theme sets are loaded once per compiler; given a fixed
/// configuration, compilation is a pure function of the input text.
pub struct MdxCompiler {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl MdxCompiler {
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    pub fn with_theme(theme: &str) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove(theme)
            .or_else(|| {
                let fallback = theme_set.themes.keys().next().cloned()?;
                theme_set.themes.remove(&fallback)
            })
            .unwrap_or_default();
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Compile one raw MDX document for the given category.
    ///
    /// `title` is always required; posts additionally require `date`.
    /// Malformed front-matter or a missing required field is a
    /// [`CompileError`], never a silently defaulted document.
    pub fn compile(
        &self,
        raw: &str,
        category: ContentCategory,
    ) -> Result<CompiledContent, CompileError> {
        let (fm, body) = FrontMatter::parse(raw)?;

        let title = fm.title.ok_or(CompileError::MissingField("title"))?;
        if category == ContentCategory::Post && fm.date.is_none() {
            return Err(CompileError::MissingField("date"));
        }

        let body_html = self.render_body(body, DimensionPolicy::for_category(category))?;

        Ok(CompiledContent {
            title,
            description: fm.description,
            date: fm.date,
            image_url: fm.image_url,
            body_html,
        })
    }

    /// Render the markdown body, substituting the image and code-block
    /// overrides during the event walk.
    fn render_body(&self, body: &str, policy: DimensionPolicy) -> Result<String, CompileError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(body, options);

        let mut events: Vec<Event> = Vec::new();
        // (override, accumulated text) while inside a code block
        let mut code: Option<(CodeOverride, String)> = None;
        // (destination, accumulated alt text) while inside an image
        let mut image: Option<(String, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code = Some((code_override(&kind), String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((ov, text)) = code.take() {
                        events.push(Event::Html(CowStr::from(self.render_code_block(ov, &text)?)));
                    }
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    image = Some((dest_url.to_string(), String::new()));
                }
                Event::End(TagEnd::Image) => {
                    if let Some((dest, alt)) = image.take() {
                        events.push(Event::Html(CowStr::from(render_image(&dest, &alt, policy))));
                    }
                }
                Event::Text(text) => {
                    if let Some((_, buf)) = code.as_mut() {
                        buf.push_str(&text);
                    } else if let Some((_, alt)) = image.as_mut() {
                        alt.push_str(&text);
                    } else {
                        events.push(Event::Text(text));
                    }
                }
                Event::Code(text) if image.is_some() => {
                    if let Some((_, alt)) = image.as_mut() {
                        alt.push_str(&text);
                    }
                }
                other => {
                    // Markup nested inside an image's alt text carries no
                    // rendering; everything outside passes through.
                    if code.is_none() && image.is_none() {
                        events.push(other);
                    }
                }
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }

    fn render_code_block(&self, ov: CodeOverride, text: &str) -> Result<String, CompileError> {
        match ov {
            CodeOverride::BoldInline => {
                let trimmed = text.trim_end_matches('\n');
                Ok(format!("<p><strong>{}</strong></p>", html_escape(trimmed)))
            }
            CodeOverride::Highlighted { language } => {
                let syntax = self
                    .syntax_set
                    .find_syntax_by_token(&language)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(&language))
                    .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

                let highlighted =
                    highlighted_html_for_string(text, &self.syntax_set, syntax, &self.theme)?;
                Ok(format!(
                    r#"<div class="highlight" data-language="{}">{}</div>"#,
                    html_escape(&language),
                    highlighted
                ))
            }
        }
    }
}

impl Default for MdxCompiler {
    fn default() -> Self {
        Self::new()
    }
}

fn render_image(dest: &str, alt: &str, policy: DimensionPolicy) -> String {
    let src = html_escape(dest);
    let alt = html_escape(alt);
    match policy {
        DimensionPolicy::Fixed { width, height } => format!(
            r#"<img src="{}" alt="{}" width="{}" height="{}" loading="lazy" decoding="async">"#,
            src, alt, width, height
        ),
        DimensionPolicy::Natural => format!(
            r#"<img src="{}" alt="{}" loading="lazy" decoding="async" style="max-width:100%;height:auto">"#,
            src, alt
        ),
    }
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

    const POST: &str = r#"---
title: First Post
description: About things
date: 2024-01-15
---

# Heading

Some text.
"#;

    #[test]
    fn compiles_post_with_matching_title() {
        let compiler = MdxCompiler::new();
        let content = compiler.compile(POST, ContentCategory::Post).unwrap();
        assert_eq!(content.title, "First Post");
        assert_eq!(content.description.as_deref(), Some("About things"));
        assert_eq!(content.date.as_deref(), Some("2024-01-15"));
        assert!(content.body_html.contains("<h1>Heading</h1>"));
    }

    #[test]
    fn missing_title_fails() {
        let compiler = MdxCompiler::new();
        let raw = "---\ndate: 2024-01-01\n---\nBody\n";
        let err = compiler.compile(raw, ContentCategory::Post).unwrap_err();
        assert!(matches!(err, CompileError::MissingField("title")));
    }

    #[test]
    fn post_without_date_fails_but_page_compiles() {
        let compiler = MdxCompiler::new();
        let raw = "---\ntitle: About\n---\nBody\n";
        let err = compiler.compile(raw, ContentCategory::Post).unwrap_err();
        assert!(matches!(err, CompileError::MissingField("date")));

        let page = compiler.compile(raw, ContentCategory::Page).unwrap();
        assert_eq!(page.title, "About");
        assert!(page.date.is_none());
    }

    #[test]
    fn tagged_fence_goes_through_the_highlighter() {
        let compiler = MdxCompiler::new();
        let raw = "---\ntitle: T\ndate: 2024-01-01\n---\n```python\nprint(\"hi\")\n```\n";
        let content = compiler.compile(raw, ContentCategory::Post).unwrap();
        assert!(content.body_html.contains(r#"data-language="python""#));
        assert!(!content.body_html.contains("<strong>print"));
    }

    #[test]
    fn untagged_fence_renders_as_bold_inline() {
        let compiler = MdxCompiler::new();
        let raw = "---\ntitle: T\ndate: 2024-01-01\n---\n```\nplain block\n```\n";
        let content = compiler.compile(raw, ContentCategory::Post).unwrap();
        assert!(content.body_html.contains("<strong>plain block</strong>"));
        assert!(!content.body_html.contains("data-language"));
    }

    #[test]
    fn post_images_get_fixed_dimensions() {
        let compiler = MdxCompiler::new();
        let raw = "---\ntitle: T\ndate: 2024-01-01\n---\n![a sunset](/assets/sunset.jpg)\n";
        let content = compiler.compile(raw, ContentCategory::Post).unwrap();
        assert!(content.body_html.contains(r#"src="/assets/sunset.jpg""#));
        assert!(content.body_html.contains(r#"alt="a sunset""#));
        assert!(content.body_html.contains(r#"width="800" height="450""#));
    }

    #[test]
    fn page_images_keep_natural_dimensions() {
        let compiler = MdxCompiler::new();
        let raw = "---\ntitle: T\n---\n![logo](/assets/logo.png)\n";
        let content = compiler.compile(raw, ContentCategory::Page).unwrap();
        assert!(content.body_html.contains("max-width:100%"));
        assert!(!content.body_html.contains(r#"width="800""#));
    }

    #[test]
    fn metadata_is_idempotent_across_compiles() {
        let compiler = MdxCompiler::new();
        let a = compiler.compile(POST, ContentCategory::Post).unwrap();
        let b = compiler.compile(POST, ContentCategory::Post).unwrap();
        assert_eq!(a.title, b.title);
        assert_eq!(a.description, b.description);
        assert_eq!(a.date, b.date);
        assert_eq!(a.body_html, b.body_html);
    }
}
