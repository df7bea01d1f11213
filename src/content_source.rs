//! Where default-tab markup comes from.
//!
//! The landing page is fetched asynchronously; implementations range from an
//! in-memory table (tests, replay scripts) to files under a content root.

use crate::tab::ContentElement;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no content at {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("home initializer failed: {0}")]
    Initializer(String),
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the markup served at a root-relative path
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError>;

    /// Wire up the landing page once its element is built
    async fn initialize_home(&self, _element: &mut ContentElement) -> Result<(), FetchError> {
        Ok(())
    }
}

/// Pages held in memory, keyed by path
#[derive(Debug, Default, Clone)]
pub struct StaticContentSource {
    pages: HashMap<String, String>,
}

impl StaticContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.insert(path.into(), markup.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, markup: impl Into<String>) {
        self.pages.insert(path.into(), markup.into());
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError> {
        self.pages
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

/// Pages read from files below a content root
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a root-relative URL path onto the content root, refusing anything
    /// that would climb out of it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;
        match tokio::fs::read_to_string(&file).await {
            Ok(markup) => Ok(markup),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(path.to_string()))
            }
            Err(source) => Err(FetchError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}
