use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::FetchOptions;

/// Global configuration loaded from `~/.config/imgcrawl/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Skip keywords whose directory already exists under `download_dir`.
    pub skip_existing: bool,
    /// Number of keywords processed concurrently.
    pub worker_count: usize,
    /// Maximum images kept per keyword (0 = every collected link).
    pub download_limit: usize,
    /// Root of the download tree; one subdirectory per keyword.
    pub download_dir: PathBuf,
    /// Keyword list, one per line. Rewritten in sorted, deduplicated form on every run.
    pub keywords_file: PathBuf,
    /// JSON manifest of collected links (`{"keyword": ["url", ...]}`).
    pub links_file: PathBuf,
    /// Site identifier used in file names and the completion marker.
    pub site_name: String,
    /// Optional transfer limits; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchOptions>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            skip_existing: true,
            worker_count: 4,
            download_limit: 0,
            download_dir: PathBuf::from("download"),
            keywords_file: PathBuf::from("keywords.txt"),
            links_file: PathBuf::from("links.json"),
            site_name: "naver".to_string(),
            fetch: None,
        }
    }
}

impl CrawlConfig {
    /// Transfer limits in effect (configured or default).
    pub fn fetch_options(&self) -> FetchOptions {
        self.fetch.unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgcrawl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CrawlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CrawlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit path (e.g. `--config`).
pub fn load_from_path(path: &Path) -> Result<CrawlConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: CrawlConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
