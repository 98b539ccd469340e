//! `imgcrawl status` – show per-keyword progress.

use anyhow::Result;
use imgcrawl_core::config::CrawlConfig;
use imgcrawl_core::keywords;
use imgcrawl_core::status;

pub fn run_status(cfg: &CrawlConfig) -> Result<()> {
    let list = keywords::load(&cfg.keywords_file)?;
    let rows = status::keyword_status(&list, &cfg.download_dir, &cfg.site_name);
    if rows.is_empty() {
        println!("No keywords in {}.", cfg.keywords_file.display());
    } else {
        println!("{:<8} {:<7} {}", "STATE", "IMAGES", "KEYWORD");
        for row in rows {
            println!("{:<8} {:<7} {}", row.state.as_str(), row.images, row.keyword);
        }
    }
    Ok(())
}
