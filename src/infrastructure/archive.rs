//! Archive acceptance checks run before an upload starts

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::UploadConfig;
use crate::error::{RepolensError, RepolensResult};

/// An archive that passed the upload rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveInfo {
    pub path: PathBuf,
    pub size: u64,
    /// `sha256:<hex>` of the archive bytes
    pub digest: String,
}

/// Check `path` against `rules` and fingerprint it.
///
/// The extension match is case-insensitive. Size is checked before hashing
/// so oversized archives are never read.
pub fn inspect_archive(path: &Path, rules: &UploadConfig) -> RepolensResult<ArchiveInfo> {
    let reject = |reason: String| RepolensError::ArchiveRejected {
        file: path.to_path_buf(),
        reason,
    };

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => reject("file does not exist".to_string()),
        _ => RepolensError::Io(e),
    })?;
    if !metadata.is_file() {
        return Err(reject("not a regular file".to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !rules
        .extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    {
        let expected = rules
            .extensions
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(reject(format!("expected a {expected} archive")));
    }

    let size = metadata.len();
    if size > rules.max_archive_bytes {
        return Err(reject(format!(
            "archive is {} but the limit is {}",
            format_size(size),
            format_size(rules.max_archive_bytes)
        )));
    }

    let digest = sha256_file(path)?;
    debug!(path = %path.display(), size, %digest, "archive accepted");
    Ok(ArchiveInfo {
        path: path.to_path_buf(),
        size,
        digest,
    })
}

fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("sha256:{:x}", hasher.finalize()))
}

/// Human-readable byte count (`512 B`, `1.5 KB`, `100.0 MB`)
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
