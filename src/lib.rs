//! mdxpress: a small blog server for MDX content directories
//!
//! Content lives under `<content_dir>/posts` and `<content_dir>/pages` as
//! `<slug>.mdx` files with YAML front-matter. Requests resolve a slug to a
//! file, compile it, and render it through the embedded HTML shells.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog application: configuration plus resolved directories.
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content store root (holds `posts/` and `pages/`)
    pub content_dir: PathBuf,
    /// Static assets served under `/assets`
    pub assets_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let assets_dir = base_dir.join(&config.assets_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            assets_dir,
        })
    }
}
