//! Local asset resolution: glob expansion and upload descriptors.

use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};

/// A local file prepared for upload as a release asset
#[derive(Debug, Clone)]
pub struct LocalAsset {
    /// Asset name, the file's basename; identity key within a release
    pub name: String,
    /// MIME type inferred from the file extension
    pub content_type: &'static str,
    /// Payload size in bytes
    pub size: u64,
    /// File contents
    pub data: Bytes,
}

impl LocalAsset {
    /// Build an upload descriptor from a resolved file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SyncError::Config {
                reason: format!("Invalid asset filename: {}", path.display()),
            })?
            .to_string();

        let data = std::fs::read(path).map_err(|source| SyncError::AssetFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            name,
            content_type: content_type_for(path),
            size: data.len() as u64,
            data: Bytes::from(data),
        })
    }
}

/// Expand glob patterns into the regular files they match, in input order.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(err) => {
                    log::warn!("skipping unreadable path while expanding '{pattern}': {err}");
                }
            }
        }
    }
    Ok(files)
}

/// Patterns from the input that match no existing regular file.
///
/// Invalid patterns are left for [`resolve_patterns`] to report; this only
/// flags well-formed patterns that came up empty.
pub fn unmatched_patterns(patterns: &[String]) -> Vec<String> {
    patterns
        .iter()
        .filter(|pattern| {
            glob::glob(pattern)
                .map(|paths| !paths.filter_map(|e| e.ok()).any(|path| path.is_file()))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("zip") => "application/zip",
        Some("gz") | Some("tgz") => "application/gzip",
        Some("tar") => "application/x-tar",
        Some("deb") => "application/vnd.debian.binary-package",
        Some("rpm") => "application/x-rpm",
        Some("exe") => "application/x-msdownload",
        Some("dmg") => "application/x-apple-diskimage",
        Some("AppImage") => "application/x-executable",
        Some("json") => "application/json",
        Some("txt") | Some("md") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn content_types_cover_common_archives() {
        assert_eq!(content_type_for(Path::new("a.zip")), "application/zip");
        assert_eq!(content_type_for(Path::new("a.tar.gz")), "application/gzip");
        assert_eq!(
            content_type_for(Path::new("binary")),
            "application/octet-stream"
        );
    }

    #[test]
    fn patterns_resolve_to_regular_files_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.zip"), b"aa").expect("write a");
        fs::write(dir.path().join("b.zip"), b"bb").expect("write b");
        fs::create_dir(dir.path().join("c.zip")).expect("mkdir c");

        let pattern = format!("{}/*.zip", dir.path().display());
        let files = resolve_patterns(&[pattern]).expect("resolve");
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.zip", "b.zip"]);
    }

    #[test]
    fn unmatched_patterns_are_reported_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("real.txt"), b"x").expect("write");

        let hit = format!("{}/*.txt", dir.path().display());
        let miss = format!("{}/*.zip", dir.path().display());
        let unmatched = unmatched_patterns(&[hit, miss.clone()]);
        assert_eq!(unmatched, vec![miss]);
    }

    #[test]
    fn local_asset_captures_name_size_and_payload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("artifact.zip");
        fs::write(&path, b"payload").expect("write");

        let asset = LocalAsset::from_path(&path).expect("asset");
        assert_eq!(asset.name, "artifact.zip");
        assert_eq!(asset.content_type, "application/zip");
        assert_eq!(asset.size, 7);
        assert_eq!(&asset.data[..], b"payload");
    }
}
