//! Per-link outcomes and the per-keyword tally.

use std::path::PathBuf;

use crate::format::ImageFormat;

/// An image that passed validation and stays on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub index: usize,
    pub path: PathBuf,
    pub format: ImageFormat,
    /// Set when sniffing disagreed with the URL hint and the file was renamed.
    pub renamed_from: Option<ImageFormat>,
}

/// Result of processing one link.
#[derive(Debug)]
pub enum LinkOutcome {
    Saved(ImageFile),
    /// Network failure or non-2xx status.
    FetchFailed(String),
    /// Local disk failure while writing.
    SaveFailed(String),
    /// Downloaded bytes are not a recognizable image; the file was removed.
    Invalid,
}

/// Counts for one keyword pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSummary {
    pub total_links: usize,
    pub saved: usize,
    pub renamed: usize,
    pub fetch_failed: usize,
    pub save_failed: usize,
    pub invalid: usize,
    /// Links never tried (download limit reached, or directory unusable).
    pub not_attempted: usize,
}

impl KeywordSummary {
    pub fn new(total_links: usize) -> Self {
        Self {
            total_links,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &LinkOutcome) {
        match outcome {
            LinkOutcome::Saved(image) => {
                self.saved += 1;
                if image.renamed_from.is_some() {
                    self.renamed += 1;
                }
            }
            LinkOutcome::FetchFailed(_) => self.fetch_failed += 1,
            LinkOutcome::SaveFailed(_) => self.save_failed += 1,
            LinkOutcome::Invalid => self.invalid += 1,
        }
    }

    pub fn attempted(&self) -> usize {
        self.saved + self.fetch_failed + self.save_failed + self.invalid
    }

    /// Links that were tried and did not produce an image.
    pub fn failed(&self) -> usize {
        self.fetch_failed + self.save_failed + self.invalid
    }
}
