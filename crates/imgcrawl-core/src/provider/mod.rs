//! Link providers: keyword in, ordered candidate image URLs out.
//!
//! Collecting links (search page scraping, browser automation) happens
//! outside this crate. A provider is built once per run and shared by every
//! worker, so any expensive setup is paid once.

mod manifest;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub use manifest::ManifestProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no links collected for keyword {0:?}")]
    UnknownKeyword(String),
    #[error("{0}")]
    Other(String),
}

/// Source of candidate image URLs for a keyword, from a single site.
pub trait LinkProvider: Send + Sync {
    /// Site identifier embedded in file names (e.g. `naver`).
    fn name(&self) -> &str;

    /// Ordered candidate links for `keyword`. Duplicates are allowed.
    fn links(&self, keyword: &str) -> Result<Vec<String>, ProviderError>;
}

/// In-memory provider. Keywords not in the map fail with `UnknownKeyword`.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    name: String,
    links: HashMap<String, Vec<String>>,
}

impl StaticProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: HashMap::new(),
        }
    }

    pub fn with_links<I, S>(mut self, keyword: impl Into<String>, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links
            .insert(keyword.into(), links.into_iter().map(Into::into).collect());
        self
    }
}

impl LinkProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn links(&self, keyword: &str) -> Result<Vec<String>, ProviderError> {
        self.links
            .get(keyword)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownKeyword(keyword.to_string()))
    }
}
