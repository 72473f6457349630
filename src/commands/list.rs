//! List site content

use anyhow::Result;

use crate::content::{slug_for_path, ContentCategory, ContentResolver, MdxCompiler};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let category = match content_type {
        "post" | "posts" => ContentCategory::Post,
        "page" | "pages" => ContentCategory::Page,
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, page", content_type);
        }
    };

    let resolver = ContentResolver::from_dir(&blog.content_dir);
    let compiler = MdxCompiler::with_theme(&blog.config.highlight.theme);

    let files = resolver.list(category);
    println!(
        "{} ({}):",
        match category {
            ContentCategory::Post => "Posts",
            ContentCategory::Page => "Pages",
        },
        files.len()
    );

    for path in files {
        let Some(slug) = slug_for_path(&path) else {
            continue;
        };
        let Some(raw) = resolver.read_raw(&path) else {
            tracing::warn!("skipping unreadable or empty file {:?}", path);
            continue;
        };
        match compiler.compile(&raw, category) {
            Ok(content) => match content.date {
                Some(date) => println!("  {} - {} [{}]", date, content.title, slug),
                None => println!("  {} [{}]", content.title, slug),
            },
            Err(e) => {
                tracing::warn!("failed to compile {:?}: {}", path, e);
            }
        }
    }

    Ok(())
}
