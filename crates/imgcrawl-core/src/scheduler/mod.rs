//! Keyword task scheduler.
//!
//! Plans which keywords still need a pass (skip policy on keyword
//! directories), then runs one pipeline per keyword on a fixed-size worker
//! group: link provider → download executor → completion marker.

mod pipeline;
mod plan;
mod pool;

pub use pipeline::{KeywordOutcome, KeywordPipeline, TaskResult};
pub use plan::{build_tasks, plan_tasks, DownloadTask};
pub use pool::{run_tasks, run_with};
