//! CLI for the imgcrawl keyword image crawler.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use imgcrawl_core::config::{self, CrawlConfig};
use std::path::PathBuf;

use commands::{run_crawl, run_keywords, run_status};

/// Top-level CLI for imgcrawl.
#[derive(Debug, Parser)]
#[command(name = "imgcrawl")]
#[command(about = "imgcrawl: download search images for a list of keywords", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/imgcrawl/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of ~/.local/state/imgcrawl/imgcrawl.log.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// File locations shared by every subcommand; each overrides the config file.
#[derive(Debug, Default, Args)]
pub struct PathArgs {
    /// Root of the download tree.
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Keyword list, one keyword per line.
    #[arg(long, value_name = "PATH")]
    pub keywords: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download images for every keyword not downloaded yet.
    Run {
        #[command(flatten)]
        paths: PathArgs,

        /// JSON manifest of collected links ({"keyword": ["url", ...]}).
        #[arg(long, value_name = "PATH")]
        links: Option<PathBuf>,

        /// Skip keywords whose directory already exists (true/false).
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        skip: Option<bool>,

        /// Number of keywords downloaded concurrently.
        #[arg(long, value_name = "N")]
        threads: Option<usize>,

        /// Maximum images kept per keyword (0 = no limit).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Normalize the keyword file (sort, deduplicate) and print it.
    Keywords {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Show per-keyword progress in the download tree.
    Status {
        #[command(flatten)]
        paths: PathArgs,
    },
}

impl PathArgs {
    fn apply(&self, cfg: &mut CrawlConfig) {
        if let Some(dir) = &self.download_dir {
            cfg.download_dir = dir.clone();
        }
        if let Some(path) = &self.keywords {
            cfg.keywords_file = path.clone();
        }
    }
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    pub fn load_config(&self) -> Result<CrawlConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        match &self.command {
            CliCommand::Run {
                paths,
                links,
                skip,
                threads,
                limit,
            } => {
                paths.apply(&mut cfg);
                if let Some(links) = links {
                    cfg.links_file = links.clone();
                }
                if let Some(skip) = skip {
                    cfg.skip_existing = *skip;
                }
                if let Some(threads) = threads {
                    cfg.worker_count = *threads;
                }
                if let Some(limit) = limit {
                    cfg.download_limit = *limit;
                }
            }
            CliCommand::Keywords { paths } | CliCommand::Status { paths } => paths.apply(&mut cfg),
        }
        Ok(cfg)
    }

    pub async fn run(self) -> Result<()> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Run { .. } => run_crawl(cfg).await?,
            CliCommand::Keywords { .. } => run_keywords(&cfg)?,
            CliCommand::Status { .. } => run_status(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
