//! Content resolver - maps logical identifiers to raw MDX text on disk

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Which subdirectory of the content store is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    Post,
    Page,
}

impl ContentCategory {
    /// Subdirectory name under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentCategory::Post => "posts",
            ContentCategory::Page => "pages",
        }
    }
}

/// A logical content identifier: a non-empty sequence of path segments.
///
/// Only the first segment participates in lookup; deeper segments are
/// accepted and ignored, matching the route contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentIdentifier {
    segments: Vec<String>,
}

impl ContentIdentifier {
    /// Build an identifier, rejecting empty input and an empty first segment.
    pub fn new(segments: Vec<String>) -> Option<Self> {
        match segments.first() {
            Some(first) if !first.is_empty() => Some(Self { segments }),
            _ => None,
        }
    }

    /// Parse an identifier from a slash-separated route path.
    pub fn from_path(path: &str) -> Option<Self> {
        let segments: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(segments)
    }

    /// The lookup key: the first segment.
    pub fn slug(&self) -> &str {
        &self.segments[0]
    }
}

/// Read-only access to the content store.
///
/// The filesystem is the production store; tests inject doubles backed by
/// temp directories or maps.
pub trait ContentStore: Send + Sync {
    /// Read one file as UTF-8 text, or `None` if it cannot be read.
    fn read(&self, path: &Path) -> Option<String>;

    /// List the `.mdx` files directly under a directory.
    fn list(&self, dir: &Path) -> Vec<PathBuf>;
}

/// The real filesystem store.
#[derive(Debug, Default)]
pub struct FsStore;

impl ContentStore for FsStore {
    fn read(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn list(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_mdx_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

/// Resolves logical identifiers to raw MDX text.
#[derive(Clone)]
pub struct ContentResolver {
    content_dir: PathBuf,
    store: Arc<dyn ContentStore>,
}

impl ContentResolver {
    pub fn new(content_dir: PathBuf, store: Arc<dyn ContentStore>) -> Self {
        Self { content_dir, store }
    }

    /// Resolver over the real filesystem.
    pub fn from_dir<P: AsRef<Path>>(content_dir: P) -> Self {
        Self::new(content_dir.as_ref().to_path_buf(), Arc::new(FsStore))
    }

    /// Directory searched for the given category.
    pub fn category_dir(&self, category: ContentCategory) -> PathBuf {
        self.content_dir.join(category.dir_name())
    }

    /// Locate the content file for `identifier` and return its raw text.
    ///
    /// `None` means "not found". A file that exists but is empty is also
    /// reported as `None`; callers must treat absence as a not-found
    /// outcome, never as a system error.
    pub fn resolve(
        &self,
        identifier: &ContentIdentifier,
        category: ContentCategory,
    ) -> Option<String> {
        let path = self
            .category_dir(category)
            .join(format!("{}.mdx", identifier.slug()));
        let raw = self.store.read(&path)?;
        if raw.is_empty() {
            return None;
        }
        Some(raw)
    }

    /// All `.mdx` files in a category directory, in directory order.
    pub fn list(&self, category: ContentCategory) -> Vec<PathBuf> {
        self.store.list(&self.category_dir(category))
    }

    /// Read one previously listed file.
    pub fn read_raw(&self, path: &Path) -> Option<String> {
        let raw = self.store.read(path)?;
        if raw.is_empty() {
            return None;
        }
        Some(raw)
    }
}

/// Derive the slug for a content file: the filename minus the `.mdx` suffix.
pub(crate) fn slug_for_path(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

fn is_mdx_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "mdx")
        .unwrap_or(false)
}
