//! Multi-angle sequence discovery.
//!
//! A sequence is a set of files sharing a stem and a filename pattern, with
//! zero-padded 3-digit horizontal and vertical angle tokens:
//!
//! ```text
//! scan_pyr_000_090.tif      horizontal 0, vertical 90 (the canonical member)
//! scan_pyr_045_090.tif      horizontal 45
//! scan_pyr_000_120.tif      vertical 120
//! ```
//!
//! Discovery locates the canonical `000_090` member to fix the extension,
//! then enumerates both angle axes.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::fs;
use tracing::debug;

use crate::error::ResolveError;

/// Result of discovering an image sequence on disk.
#[derive(Debug, Clone)]
pub struct SequenceDiscovery {
    /// Extension shared by all sequence members.
    pub extension: String,

    /// Ascending horizontal view angles.
    pub horizontal_angles: Vec<u32>,

    /// Ascending vertical view angles.
    pub vertical_angles: Vec<u32>,

    /// Modification time of the canonical `000_090` member.
    pub timestamp: SystemTime,
}

/// Discover a sequence under `prefix + path + pattern`.
///
/// Fails with [`ResolveError::NotFileNotSequence`] when no file matches the
/// canonical `000_090.*` pattern and with [`ResolveError::AmbiguousExtension`]
/// when more than one extension does.
pub async fn discover(
    prefix: &str,
    path: &str,
    pattern: &str,
) -> Result<SequenceDiscovery, ResolveError> {
    let full_stem = format!("{}{}{}", prefix, path, pattern);
    let (dir, stem) = split_stem(&full_stem);

    // Every candidate shares the stem; one directory scan serves all three
    // patterns.
    let names = scan_dir(&dir, &stem, prefix, path).await?;

    let probe_prefix = format!("{}000_090.", stem);
    let mut probe_matches = names.iter().filter(|n| n.starts_with(&probe_prefix));

    let canonical = match (probe_matches.next(), probe_matches.next()) {
        (None, _) => {
            return Err(ResolveError::NotFileNotSequence {
                path: format!("{}{}", prefix, path),
            })
        }
        (Some(_), Some(_)) => {
            return Err(ResolveError::AmbiguousExtension {
                pattern: format!("{}000_090.*", full_stem),
            })
        }
        (Some(name), None) => name.clone(),
    };

    let dot = canonical.rfind('.').expect("canonical member contains a dot");
    let extension = canonical[dot + 1..].to_string();

    let metadata = fs::metadata(dir.join(&canonical)).await.map_err(|e| {
        ResolveError::Io(format!("unable to open file {}: {}", canonical, e))
    })?;
    let timestamp = metadata
        .modified()
        .map_err(|e| ResolveError::Io(e.to_string()))?;

    let horizontal_angles = collect_angles(&names, &stem, &format!("_090.{}", extension));
    let vertical_angles = collect_angles(&names, &format!("{}000_", stem), &format!(".{}", extension));

    Ok(SequenceDiscovery {
        extension,
        horizontal_angles,
        vertical_angles,
        timestamp,
    })
}

/// Split `prefix + path + pattern` into a directory to scan and a filename
/// stem to match against.
fn split_stem(full_stem: &str) -> (PathBuf, String) {
    let stem_path = Path::new(full_stem);
    let dir = match stem_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let stem = stem_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    (dir, stem)
}

/// List directory entries whose names begin with the stem.
async fn scan_dir(
    dir: &Path,
    stem: &str,
    prefix: &str,
    path: &str,
) -> Result<Vec<String>, ResolveError> {
    let mut entries = fs::read_dir(dir).await.map_err(|_| {
        // An unreadable parent directory means no sequence can exist here
        ResolveError::NotFileNotSequence {
            path: format!("{}{}", prefix, path),
        }
    })?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ResolveError::Io(e.to_string()))?
    {
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with(stem) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Extract and sort the angle tokens bracketed by `prefix`/`suffix`.
fn collect_angles(names: &[String], prefix: &str, suffix: &str) -> Vec<u32> {
    let mut angles = Vec::new();
    for name in names {
        let Some(token) = name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
        else {
            continue;
        };
        match token.parse::<u32>() {
            Ok(angle) => angles.push(angle),
            Err(_) => debug!("skipping sequence member with unparseable angle token: {}", name),
        }
    }
    angles.sort_unstable();
    angles
}

// =============================================================================
// Tests
// =============================================================================
