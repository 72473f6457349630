//! Front-matter extraction for MDX content files

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CompileError;

/// Typed front-matter fields of a content file.
///
/// All fields are optional at the parsing layer; which of them are required
/// depends on the content category and is enforced by the compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse the leading YAML front-matter block of an MDX document.
    ///
    /// Returns `(front_matter, body)` where `body` is the document with the
    /// block stripped. A document without a block yields a default
    /// `FrontMatter`; an opened-but-unterminated block or invalid YAML is a
    /// `CompileError`.
    pub fn parse(content: &str) -> Result<(Self, &str), CompileError> {
        let content = content.trim_start_matches('\u{feff}');

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches('\r');
        let Some(rest) = rest.strip_prefix('\n') else {
            // Opening dashes not on their own line (e.g. a thematic break)
            return Ok((FrontMatter::default(), content));
        };

        let Some(end) = rest.find("\n---") else {
            return Err(CompileError::UnterminatedFrontMatter);
        };

        let yaml = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\r', '\n']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml)?;
        Ok((fm, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_post_frontmatter() {
        let content = r#"---
title: Hello World
description: A first post
date: 2024-01-15
imageUrl: /assets/hello.png
---

This is the body.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.description.as_deref(), Some("A first post"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.image_url.as_deref(), Some("/assets/hello.png"));
        assert!(body.starts_with("This is the body."));
    }

    #[test]
    fn document_without_block_yields_default() {
        let (fm, body) = FrontMatter::parse("# Just markdown\n").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "# Just markdown\n");
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let content = "---\ntitle: Broken\n\nNo closing fence here.\n";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, CompileError::UnterminatedFrontMatter));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\n\nBody.\n";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, CompileError::FrontMatter(_)));
    }

    #[test]
    fn extra_fields_are_kept() {
        let content = "---\ntitle: T\ntags:\n  - rust\n---\nBody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.contains_key("tags"));
    }
}
