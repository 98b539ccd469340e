//! The per-keyword pipeline a worker runs: links → download → marker.

use std::sync::Arc;

use crate::executor::{self, KeywordSummary};
use crate::fetch::FetchOptions;
use crate::marker;
use crate::provider::LinkProvider;

use super::plan::DownloadTask;

/// How a keyword task ended.
#[derive(Debug)]
pub enum KeywordOutcome {
    /// Every link was attempted and the completion marker written.
    Completed(KeywordSummary),
    /// Link collection failed; no marker, the keyword is retried next run
    /// if its directory does not exist.
    ProviderFailed(String),
    /// The task panicked; isolated from the other workers.
    Crashed(String),
}

/// Result of one task, tagged with its keyword.
#[derive(Debug)]
pub struct TaskResult {
    pub keyword: String,
    pub outcome: KeywordOutcome,
}

/// Shared, read-only state every worker needs.
#[derive(Clone)]
pub struct KeywordPipeline {
    provider: Arc<dyn LinkProvider>,
    download_limit: usize,
    fetch: FetchOptions,
}

impl KeywordPipeline {
    pub fn new(provider: Arc<dyn LinkProvider>, download_limit: usize, fetch: FetchOptions) -> Self {
        Self {
            provider,
            download_limit,
            fetch,
        }
    }

    /// Runs the full pass for one keyword. Blocking.
    pub fn process(&self, task: &DownloadTask) -> KeywordOutcome {
        tracing::info!(
            "Collecting links... {} from {}",
            task.keyword,
            task.site_name
        );
        let links = match self.provider.links(&task.keyword) {
            Ok(links) => links,
            Err(e) => {
                tracing::error!("Exception {}:{} - {}", task.site_name, task.keyword, e);
                return KeywordOutcome::ProviderFailed(e.to_string());
            }
        };

        tracing::info!(
            "Downloading images from collected links... {} from {} ({} links)",
            task.keyword,
            task.site_name,
            links.len()
        );
        let summary = executor::download_all(
            &task.keyword,
            &links,
            &task.site_name,
            self.download_limit,
            &task.keyword_dir,
            &self.fetch,
        );

        if let Err(e) = marker::mark(&task.keyword_dir, &task.site_name) {
            tracing::error!(
                "could not write completion marker in {}: {}",
                task.keyword_dir.display(),
                e
            );
        }
        KeywordOutcome::Completed(summary)
    }
}
