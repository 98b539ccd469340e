//! Crawl orchestration: keyword list → plan → worker pool → report.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::CrawlConfig;
use crate::keywords;
use crate::provider::LinkProvider;
use crate::scheduler::{self, KeywordOutcome, KeywordPipeline, TaskResult};

/// What a crawl did, keyword by keyword.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Keywords in the normalized list.
    pub total_keywords: usize,
    /// Keywords left out because their directory already existed or was
    /// taken by an earlier keyword.
    pub skipped: usize,
    /// One entry per dispatched keyword, sorted by keyword.
    pub results: Vec<TaskResult>,
}

impl CrawlReport {
    pub fn dispatched(&self) -> usize {
        self.results.len()
    }

    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, KeywordOutcome::Completed(_)))
    }

    pub fn provider_failed(&self) -> usize {
        self.count(|o| matches!(o, KeywordOutcome::ProviderFailed(_)))
    }

    pub fn crashed(&self) -> usize {
        self.count(|o| matches!(o, KeywordOutcome::Crashed(_)))
    }

    /// Images kept across all completed keywords.
    pub fn images_saved(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                KeywordOutcome::Completed(s) => Some(s.saved),
                _ => None,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&KeywordOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

pub struct Crawler {
    config: CrawlConfig,
    provider: Arc<dyn LinkProvider>,
}

impl Crawler {
    pub fn new(config: CrawlConfig, provider: Arc<dyn LinkProvider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Runs one full crawl. Fails only before dispatch (download root or
    /// keyword list unusable); per-keyword failures end up in the report.
    pub async fn crawl(&self) -> Result<CrawlReport> {
        let cfg = &self.config;
        std::fs::create_dir_all(&cfg.download_dir).with_context(|| {
            format!("create download directory {}", cfg.download_dir.display())
        })?;

        let keywords = keywords::load_and_normalize(&cfg.keywords_file)?;
        let planned = scheduler::plan_tasks(&keywords, &cfg.download_dir, cfg.skip_existing);
        let tasks = scheduler::build_tasks(&planned, &cfg.download_dir, &cfg.site_name);
        tracing::info!(
            "{} of {} keyword(s) to download with {} worker(s)",
            tasks.len(),
            keywords.len(),
            cfg.worker_count.max(1)
        );

        let pipeline = KeywordPipeline::new(
            Arc::clone(&self.provider),
            cfg.download_limit,
            cfg.fetch_options(),
        );
        let results = scheduler::run_tasks(tasks, pipeline, cfg.worker_count).await;

        Ok(CrawlReport {
            total_keywords: keywords.len(),
            skipped: keywords.len() - planned.len(),
            results,
        })
    }
}
