//! On-disk layout of the download tree.
//!
//! ```text
//! {root}/{keyword}/{site}_{0000}.{ext}
//! {root}/{keyword}/{site}_done
//! ```

use std::path::{Path, PathBuf};

use crate::format::ImageFormat;

/// Maps a keyword to the name of its directory under the download root.
///
/// - Drops `"` (search keywords are often quoted phrases)
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims surrounding whitespace
/// - Prefixes `_` to a result of `""`, `.` or `..`, which would otherwise
///   name the download root or its parent
///
/// Planning and downloading both go through this so the skip check and the
/// worker always agree on the directory.
pub fn keyword_dir_name(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if c == '"' {
            continue;
        }
        if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    let name = out.trim();
    match name {
        "" | "." | ".." => format!("_{}", name),
        _ => name.to_string(),
    }
}

/// Directory holding everything downloaded for `keyword`.
pub fn keyword_dir(root: &Path, keyword: &str) -> PathBuf {
    root.join(keyword_dir_name(keyword))
}

/// File name without extension: `{site}_{index:04}`.
pub fn image_stem(site_name: &str, index: usize) -> String {
    format!("{}_{:04}", site_name, index)
}

/// Full path of the image for link number `index`.
pub fn image_path(keyword_dir: &Path, site_name: &str, index: usize, format: ImageFormat) -> PathBuf {
    keyword_dir.join(format!("{}.{}", image_stem(site_name, index), format.extension()))
}

/// Completion marker file name: `{site}_done`.
pub fn marker_name(site_name: &str) -> String {
    format!("{}_done", site_name)
}

/// True if `file_name` looks like an image written for `site_name`
/// (`{site}_NNNN.ext`), as opposed to the marker or stray files.
pub fn is_image_name(file_name: &str, site_name: &str) -> bool {
    let Some(rest) = file_name
        .strip_prefix(site_name)
        .and_then(|r| r.strip_prefix('_'))
    else {
        return false;
    };
    let Some((index, ext)) = rest.split_once('.') else {
        return false;
    };
    index.len() >= 4
        && index.bytes().all(|b| b.is_ascii_digit())
        && ImageFormat::from_extension(ext).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_name_strips_quotes() {
        assert_eq!(keyword_dir_name("\"red panda\""), "red panda");
    }

    #[test]
    fn dir_name_replaces_separators() {
        assert_eq!(keyword_dir_name("ac/dc"), "ac_dc");
        assert_eq!(keyword_dir_name("a\\b"), "a_b");
        assert_eq!(keyword_dir_name("tab\there"), "tab_here");
    }

    #[test]
    fn dir_name_keeps_unicode_and_spaces() {
        assert_eq!(keyword_dir_name("  고양이 사진 "), "고양이 사진");
    }

    #[test]
    fn dir_name_never_points_at_root_or_parent() {
        assert_eq!(keyword_dir_name("\"\""), "_");
        assert_eq!(keyword_dir_name("  "), "_");
        assert_eq!(keyword_dir_name("."), "_.");
        assert_eq!(keyword_dir_name(".."), "_..");
        assert_eq!(keyword_dir_name("\"..\""), "_..");
        assert_eq!(keyword_dir_name("..."), "...");
        assert_eq!(keyword_dir(Path::new("download"), ".."), Path::new("download/_.."));
    }

    #[test]
    fn image_path_is_zero_padded() {
        let p = image_path(Path::new("download/cat"), "naver", 7, ImageFormat::Png);
        assert_eq!(p, Path::new("download/cat/naver_0007.png"));
        let p = image_path(Path::new("d"), "naver", 12345, ImageFormat::Jpg);
        assert_eq!(p, Path::new("d/naver_12345.jpg"));
    }

    #[test]
    fn marker_and_image_names() {
        assert_eq!(marker_name("naver"), "naver_done");
        assert!(is_image_name("naver_0000.jpg", "naver"));
        assert!(is_image_name("naver_0042.webp", "naver"));
        assert!(!is_image_name("naver_done", "naver"));
        assert!(!is_image_name("google_0000.jpg", "naver"));
        assert!(!is_image_name("naver_0000.txt", "naver"));
        assert!(!is_image_name("naver_12.jpg", "naver"));
    }
}
