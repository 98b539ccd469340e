//! Download executor: fetch, validate and name every image of one keyword.
//!
//! Links are tried strictly in provider order. Nothing here returns an
//! error: each failed link is logged, recorded in the [`KeywordSummary`] and
//! the loop moves on.

mod summary;

use std::path::Path;

pub use summary::{ImageFile, KeywordSummary, LinkOutcome};

use crate::fetch::{self, FetchOptions};
use crate::format::ImageFormat;
use crate::layout;

/// Downloads `links` for `keyword` into `keyword_dir`.
///
/// `max_count` caps the number of images kept (0 = all links). Once the cap
/// is reached the remaining links are left untouched.
pub fn download_all(
    keyword: &str,
    links: &[String],
    site_name: &str,
    max_count: usize,
    keyword_dir: &Path,
    opts: &FetchOptions,
) -> KeywordSummary {
    let mut summary = KeywordSummary::new(links.len());

    if let Err(e) = std::fs::create_dir_all(keyword_dir) {
        tracing::error!(
            "cannot create directory {} for {}: {}",
            keyword_dir.display(),
            keyword,
            e
        );
        summary.not_attempted = links.len();
        return summary;
    }

    let effective_max = if max_count > 0 { max_count } else { links.len() };

    for (index, link) in links.iter().enumerate() {
        if summary.saved >= effective_max {
            break;
        }
        tracing::info!(
            "Downloading {} from {}: {} / {}",
            keyword,
            site_name,
            summary.saved + 1,
            effective_max
        );
        let outcome = process_link(index, link, site_name, keyword_dir, opts);
        summary.record(&outcome);
    }

    summary.not_attempted = links.len() - summary.attempted();
    tracing::info!(
        keyword,
        saved = summary.saved,
        renamed = summary.renamed,
        fetch_failed = summary.fetch_failed,
        save_failed = summary.save_failed,
        invalid = summary.invalid,
        not_attempted = summary.not_attempted,
        "keyword download pass finished"
    );
    summary
}

/// Fetches link number `index`, then validates the file and fixes its extension.
pub fn process_link(
    index: usize,
    link: &str,
    site_name: &str,
    keyword_dir: &Path,
    opts: &FetchOptions,
) -> LinkOutcome {
    let hinted = ImageFormat::from_url(link);
    let path = layout::image_path(keyword_dir, site_name, index, hinted);

    match fetch::fetch_to_path(link, &path, opts) {
        Ok(bytes) => {
            tracing::debug!("fetched {} bytes from {} into {}", bytes, link, path.display());
        }
        Err(e) if e.is_network() => {
            tracing::warn!("Download failed - {}: {}", link, e);
            return LinkOutcome::FetchFailed(e.to_string());
        }
        Err(e) => {
            tracing::warn!("Save failed - {}: {}", path.display(), e);
            return LinkOutcome::SaveFailed(e.to_string());
        }
    }

    let sniffed = match ImageFormat::sniff_path(&path) {
        Ok(sniffed) => sniffed,
        Err(e) => {
            tracing::warn!("could not read back {}: {}", path.display(), e);
            None
        }
    };

    let Some(actual) = sniffed else {
        tracing::warn!("Unreadable file - {}", link);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("could not remove {}: {}", path.display(), e);
        }
        return LinkOutcome::Invalid;
    };

    if actual == hinted {
        return LinkOutcome::Saved(ImageFile {
            index,
            path,
            format: actual,
            renamed_from: None,
        });
    }

    let renamed = layout::image_path(keyword_dir, site_name, index, actual);
    match std::fs::rename(&path, &renamed) {
        Ok(()) => {
            tracing::info!("Renamed extension {} -> {}", hinted, actual);
            LinkOutcome::Saved(ImageFile {
                index,
                path: renamed,
                format: actual,
                renamed_from: Some(hinted),
            })
        }
        Err(e) => {
            // Content is valid; keep it under the hinted name.
            tracing::warn!(
                "could not rename {} to {}: {}",
                path.display(),
                renamed.display(),
                e
            );
            LinkOutcome::Saved(ImageFile {
                index,
                path,
                format: actual,
                renamed_from: None,
            })
        }
    }
}
