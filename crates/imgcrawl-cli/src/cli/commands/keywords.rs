//! `imgcrawl keywords` – normalize the keyword file and print it.

use anyhow::Result;
use imgcrawl_core::config::CrawlConfig;
use imgcrawl_core::keywords;

pub fn run_keywords(cfg: &CrawlConfig) -> Result<()> {
    let list = keywords::load_and_normalize(&cfg.keywords_file)?;
    for keyword in &list {
        println!("{keyword}");
    }
    println!("{} keyword(s) in {}", list.len(), cfg.keywords_file.display());
    Ok(())
}
