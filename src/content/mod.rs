//! Content pipeline - resolves raw MDX files and compiles them to articles

mod compiler;
mod frontmatter;
pub mod listing;
mod resolver;

pub use compiler::{CompiledContent, DimensionPolicy, MdxCompiler};
pub use frontmatter::FrontMatter;
pub use listing::ListingEntry;
pub(crate) use resolver::slug_for_path;
pub use resolver::{ContentCategory, ContentIdentifier, ContentResolver, ContentStore, FsStore};

use thiserror::Error;

/// Failure while compiling one MDX document.
///
/// Compilation failures are content-authoring bugs and are propagated to the
/// caller unmodified; nothing in the pipeline retries or masks them.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Front-matter block opened with `---` but never closed.
    #[error("unterminated front-matter block")]
    UnterminatedFrontMatter,

    /// Front-matter is present but is not valid YAML.
    #[error("invalid front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    /// A field the category requires is missing from the front-matter.
    #[error("front-matter is missing required field `{0}`")]
    MissingField(&'static str),

    /// Syntax highlighting of a fenced code block failed.
    #[error("code highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_then_compile_round_trip() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join("pages");
        fs::create_dir_all(&pages).unwrap();
        fs::write(
            pages.join("about.mdx"),
            "---\ntitle: About Me\n---\n\nHi there.\n",
        )
        .unwrap();

        let resolver = ContentResolver::from_dir(dir.path());
        let compiler = MdxCompiler::new();

        let id = ContentIdentifier::from_path("about").unwrap();
        let raw = resolver.resolve(&id, ContentCategory::Page).unwrap();
        let content = compiler.compile(&raw, ContentCategory::Page).unwrap();
        assert_eq!(content.title, "About Me");
        assert!(content.body_html.contains("Hi there."));
    }

    #[test]
    fn missing_slug_is_a_not_found_outcome() {
        let dir = TempDir::new().unwrap();
        let resolver = ContentResolver::from_dir(dir.path());
        let id = ContentIdentifier::from_path("does-not-exist").unwrap();
        assert!(resolver.resolve(&id, ContentCategory::Page).is_none());
    }
}
