//! CLI command handlers. Each command is in its own file.

mod keywords;
mod run;
mod status;

pub use keywords::run_keywords;
pub use run::run_crawl;
pub use status::run_status;
