//! Single-shot HTTP GET of one image link, streamed to a file.
//!
//! Uses libcurl through the `curl` crate. No retry: a failed link is simply
//! skipped by the caller. On any error the partial file is removed, so a
//! link ends up either fully on disk or absent.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transfer limits for image fetches (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds (None = no limit).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum redirects followed per link.
    pub max_redirections: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: None,
            max_redirections: 10,
        }
    }
}

/// Why a single link could not be stored.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Link is not an absolute http(s) URL, or a redirect left http(s).
    #[error("unsupported link: {0}")]
    Unsupported(String),
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating or writing the destination file failed.
    #[error("storage: {0}")]
    Storage(#[source] io::Error),
}

impl FetchError {
    /// True for failures on the link side, false for local disk failures.
    pub fn is_network(&self) -> bool {
        !matches!(self, FetchError::Storage(_))
    }
}

fn is_http(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Downloads `url` into a new file at `dest` (truncating any existing file).
/// Returns the number of bytes written.
///
/// Blocking; run it from a worker thread or `spawn_blocking`.
pub fn fetch_to_path(url: &str, dest: &Path, opts: &FetchOptions) -> Result<u64, FetchError> {
    if !is_http(url) {
        return Err(FetchError::Unsupported(url.to_string()));
    }
    let file = File::create(dest).map_err(FetchError::Storage)?;
    let mut writer = io::BufWriter::new(file);
    let result = fetch_into(url, &mut writer, opts).and_then(|written| {
        writer
            .get_ref()
            .sync_all()
            .map_err(FetchError::Storage)?;
        Ok(written)
    });
    if result.is_err() {
        drop(writer);
        if let Err(e) = std::fs::remove_file(dest) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("could not remove partial file {}: {}", dest.display(), e);
            }
        }
    }
    result
}

/// Streams the body of `url` into `out` and flushes it. Returns the number
/// of bytes written. A failing `out` aborts the transfer with
/// [`FetchError::Storage`].
pub fn fetch_into<W: Write>(url: &str, out: &mut W, opts: &FetchOptions) -> Result<u64, FetchError> {
    if !is_http(url) {
        return Err(FetchError::Unsupported(url.to_string()));
    }
    let out = RefCell::new(out);
    let written = RefCell::new(0u64);
    let write_error: RefCell<Option<io::Error>> = RefCell::new(None);

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(Duration::from_secs(opts.connect_timeout_secs))?;
    if let Some(secs) = opts.timeout_secs {
        easy.timeout(Duration::from_secs(secs))?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match out.borrow_mut().write_all(data) {
            Ok(()) => {
                *written.borrow_mut() += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                *write_error.borrow_mut() = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    // A short write surfaces as a curl write error; report the disk error instead.
    if let Some(e) = write_error.into_inner() {
        return Err(FetchError::Storage(e));
    }
    performed?;

    if let Some(effective) = easy.effective_url()? {
        if !is_http(effective) {
            return Err(FetchError::Unsupported(effective.to_string()));
        }
    }
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    out.into_inner().flush().map_err(FetchError::Storage)?;
    Ok(written.into_inner())
}
