//! Image format classification.
//!
//! Two sources: the link URL (a cheap hint taken before downloading, often
//! wrong) and the leading bytes of the downloaded file (authoritative).

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes read from the head of a file for sniffing. Enough for every signature below.
const SNIFF_LEN: usize = 16;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Canonical image formats. JPEG is always reported as `Jpg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpg,
    Png,
    Gif,
    Bmp,
    Webp,
    Tiff,
}

impl ImageFormat {
    /// Format assumed when the URL gives no usable hint.
    pub const DEFAULT: ImageFormat = ImageFormat::Jpg;

    /// Lowercase file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Webp => "webp",
            ImageFormat::Tiff => "tiff",
        }
    }

    /// Parses an extension we write ourselves (case-insensitive; `jpeg` accepted).
    pub fn from_extension(ext: &str) -> Option<ImageFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            "webp" => Some(ImageFormat::Webp),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Provisional format from a link URL.
    ///
    /// Looks at the token after the last `.` of the last path segment. Only
    /// jpg/jpeg, gif and png are recognized; everything else (including no
    /// `.` at all) maps to [`ImageFormat::DEFAULT`]. Never fails.
    pub fn from_url(url: &str) -> ImageFormat {
        let segment = match url::Url::parse(url) {
            Ok(parsed) => parsed
                .path_segments()
                .and_then(|mut s| s.next_back())
                .map(str::to_string)
                .unwrap_or_default(),
            Err(_) => url.to_string(),
        };
        let Some((_, token)) = segment.rsplit_once('.') else {
            return ImageFormat::DEFAULT;
        };
        let token = token.to_ascii_lowercase();
        // Substring match: image hosts append suffixes like `jpg_large` or `png!w800`.
        if token.contains("jpg") || token.contains("jpeg") {
            ImageFormat::Jpg
        } else if token.contains("gif") {
            ImageFormat::Gif
        } else if token.contains("png") {
            ImageFormat::Png
        } else {
            ImageFormat::DEFAULT
        }
    }

    /// Detects the format from magic numbers. `None` means not a recognizable image.
    pub fn sniff(head: &[u8]) -> Option<ImageFormat> {
        if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpg);
        }
        if head.starts_with(PNG_SIGNATURE) {
            return Some(ImageFormat::Png);
        }
        if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if head.len() >= 12 && head.starts_with(b"RIFF") && &head[8..12] == b"WEBP" {
            return Some(ImageFormat::Webp);
        }
        if head.starts_with(b"II*\0") || head.starts_with(b"MM\0*") {
            return Some(ImageFormat::Tiff);
        }
        if head.starts_with(b"BM") {
            return Some(ImageFormat::Bmp);
        }
        None
    }

    /// Reads the head of the file at `path` and sniffs it.
    pub fn sniff_path(path: &Path) -> io::Result<Option<ImageFormat>> {
        let mut f = File::open(path)?;
        let mut head = [0u8; SNIFF_LEN];
        let mut filled = 0;
        while filled < SNIFF_LEN {
            let n = f.read(&mut head[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(ImageFormat::sniff(&head[..filled]))
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
