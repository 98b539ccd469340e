//! Decide which keywords still need a download pass.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::layout;

/// One unit of work: a keyword and where its images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub keyword: String,
    pub keyword_dir: PathBuf,
    pub site_name: String,
}

impl DownloadTask {
    pub fn new(keyword: &str, download_dir: &Path, site_name: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            keyword_dir: layout::keyword_dir(download_dir, keyword),
            site_name: site_name.to_string(),
        }
    }
}

/// Keywords whose directory under `download_dir` does not exist yet.
///
/// An existing directory is never re-queued, whatever `skip_existing` says:
/// with `skip_existing = false` the keyword is still left out. Forcing a
/// re-download means deleting the keyword directory first.
///
/// Keywords that map to the same directory (`"cat"` and `cat`) are planned
/// once, for the first of them in list order; a directory has one writer.
pub fn plan_tasks(keywords: &[String], download_dir: &Path, skip_existing: bool) -> Vec<String> {
    let mut planned = Vec::with_capacity(keywords.len());
    let mut claimed: HashSet<PathBuf> = HashSet::with_capacity(keywords.len());
    for keyword in keywords {
        let dir = layout::keyword_dir(download_dir, keyword);
        if claimed.contains(&dir) {
            tracing::warn!(
                "{} shares directory {} with an earlier keyword; not downloading it",
                keyword,
                dir.display()
            );
        } else if !dir.exists() {
            claimed.insert(dir);
            planned.push(keyword.clone());
        } else if skip_existing {
            tracing::info!("Skipping done task {}", dir.display());
        } else {
            tracing::warn!(
                "{} already exists; not re-downloading (remove it to fetch {} again)",
                dir.display(),
                keyword
            );
        }
    }
    planned
}

/// Builds one task per planned keyword.
pub fn build_tasks(planned: &[String], download_dir: &Path, site_name: &str) -> Vec<DownloadTask> {
    planned
        .iter()
        .map(|k| DownloadTask::new(k, download_dir, site_name))
        .collect()
}
