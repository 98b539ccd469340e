//! Provider backed by a JSON manifest written by an external link collector:
//!
//! ```json
//! { "cat": ["https://...", "https://..."], "dog": [] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use super::{LinkProvider, ProviderError};

#[derive(Debug, Clone)]
pub struct ManifestProvider {
    name: String,
    links: HashMap<String, Vec<String>>,
}

impl ManifestProvider {
    /// Reads and parses the whole manifest up front.
    pub fn load(path: &Path, name: impl Into<String>) -> Result<Self, ProviderError> {
        let data = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let links: HashMap<String, Vec<String>> =
            serde_json::from_str(&data).map_err(|source| ProviderError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            "loaded link manifest {} ({} keywords)",
            path.display(),
            links.len()
        );
        Ok(Self {
            name: name.into(),
            links,
        })
    }

    pub fn keyword_count(&self) -> usize {
        self.links.len()
    }
}

impl LinkProvider for ManifestProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn links(&self, keyword: &str) -> Result<Vec<String>, ProviderError> {
        match self.links.get(keyword) {
            Some(links) => Ok(links.clone()),
            None => Err(ProviderError::UnknownKeyword(keyword.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_and_lookup() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"cat": ["https://a.com/1.jpg", "https://a.com/2.png"], "dog": []}}"#
        )
        .unwrap();
        f.flush().unwrap();

        let p = ManifestProvider::load(f.path(), "naver").unwrap();
        assert_eq!(p.name(), "naver");
        assert_eq!(p.keyword_count(), 2);
        assert_eq!(
            p.links("cat").unwrap(),
            vec!["https://a.com/1.jpg", "https://a.com/2.png"]
        );
        assert!(p.links("dog").unwrap().is_empty());
        assert!(matches!(
            p.links("bird"),
            Err(ProviderError::UnknownKeyword(_))
        ));
    }

    #[test]
    fn malformed_manifest_is_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"[1, 2, 3]").unwrap();
        f.flush().unwrap();
        let err = ManifestProvider::load(f.path(), "naver").unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestProvider::load(&dir.path().join("links.json"), "naver").unwrap_err();
        assert!(matches!(err, ProviderError::Io { .. }));
    }
}
