//! Listing page support - compiles every post for the index view

use std::sync::Arc;
use tokio::task::JoinSet;

use super::resolver::slug_for_path;
use super::{CompiledContent, ContentCategory, ContentResolver, MdxCompiler};

/// One compiled post plus its derived slug (filename minus `.mdx`).
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub slug: String,
    pub content: CompiledContent,
}

/// Compile every post in the content store for the listing page.
///
/// Files are compiled concurrently and gathered; the resulting order
/// follows task completion and is not guaranteed. A file that fails to
/// compile is logged and skipped so one bad post cannot take down the
/// whole index.
pub async fn build(resolver: Arc<ContentResolver>, compiler: Arc<MdxCompiler>) -> Vec<ListingEntry> {
    let mut set = JoinSet::new();

    for path in resolver.list(ContentCategory::Post) {
        let Some(slug) = slug_for_path(&path) else {
            continue;
        };
        let resolver = Arc::clone(&resolver);
        let compiler = Arc::clone(&compiler);
        set.spawn_blocking(move || {
            let raw = resolver.read_raw(&path)?;
            match compiler.compile(&raw, ContentCategory::Post) {
                Ok(content) => Some(ListingEntry { slug, content }),
                Err(e) => {
                    tracing::warn!("skipping post {:?}: {}", path, e);
                    None
                }
            }
        });
    }

    let mut entries = Vec::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => tracing::warn!("listing task failed: {}", e),
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn post(title: &str) -> String {
        format!("---\ntitle: {}\ndate: 2024-01-01\n---\nBody of {}.\n", title, title)
    }

    #[tokio::test]
    async fn listing_has_one_entry_per_post() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("alpha.mdx"), post("Alpha")).unwrap();
        fs::write(posts.join("beta.mdx"), post("Beta")).unwrap();
        fs::write(posts.join("gamma.mdx"), post("Gamma")).unwrap();

        let resolver = Arc::new(ContentResolver::from_dir(dir.path()));
        let compiler = Arc::new(MdxCompiler::new());
        let entries = build(resolver, compiler).await;

        assert_eq!(entries.len(), 3);
        let mut slugs: Vec<&str> = entries.iter().map(|e| e.slug.as_str()).collect();
        slugs.sort();
        assert_eq!(slugs, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn broken_post_is_skipped() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("good.mdx"), post("Good")).unwrap();
        // missing title: fails to compile
        fs::write(posts.join("bad.mdx"), "---\ndate: 2024-01-01\n---\nBody\n").unwrap();

        let resolver = Arc::new(ContentResolver::from_dir(dir.path()));
        let compiler = Arc::new(MdxCompiler::new());
        let entries = build(resolver, compiler).await;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "good");
        assert_eq!(entries[0].content.title, "Good");
    }
}
