//! `imgcrawl run` – download images for every pending keyword.

use anyhow::Result;
use imgcrawl_core::config::CrawlConfig;
use imgcrawl_core::crawler::{CrawlReport, Crawler};
use imgcrawl_core::provider::ManifestProvider;
use imgcrawl_core::scheduler::KeywordOutcome;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub async fn run_crawl(cfg: CrawlConfig) -> Result<()> {
    println!(
        "Options - skip:{}, threads:{}, limit:{}",
        cfg.skip_existing, cfg.worker_count, cfg.download_limit
    );

    let provider = ManifestProvider::load(&cfg.links_file, cfg.site_name.clone())?;
    tracing::info!(
        "link manifest {} covers {} keyword(s)",
        cfg.links_file.display(),
        provider.keyword_count()
    );

    let started = Instant::now();
    let report = Crawler::new(cfg, Arc::new(provider)).crawl().await?;
    print_report(&report);
    println!("{}", format_elapsed(started.elapsed()));
    Ok(())
}

fn print_report(report: &CrawlReport) {
    for result in &report.results {
        match &result.outcome {
            KeywordOutcome::Completed(s) => println!(
                "  {:<24} saved {:>4}  invalid {:>3}  failed {:>3}  skipped {:>3}",
                result.keyword,
                s.saved,
                s.invalid,
                s.fetch_failed + s.save_failed,
                s.not_attempted
            ),
            KeywordOutcome::ProviderFailed(reason) => {
                println!("  {:<24} no links: {}", result.keyword, reason)
            }
            KeywordOutcome::Crashed(reason) => {
                println!("  {:<24} crashed: {}", result.keyword, reason)
            }
        }
    }
    println!(
        "{} keyword(s): {} skipped, {} completed, {} without links, {} crashed; {} image(s) saved",
        report.total_keywords,
        report.skipped,
        report.completed(),
        report.provider_failed(),
        report.crashed(),
        report.images_saved()
    );
}

/// `HH:MM:SS` wall-clock time.
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
