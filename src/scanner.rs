use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::HumanCount;
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::utils::path_bytes;

/// Everything found under a root: the regular files to hash and the entries
/// that were passed over because they are neither files nor directories.
#[derive(Debug, Default)]
pub struct Scan {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Recursively collects every regular file reachable from `root`.
///
/// Symlinks are never followed (except `root` itself), so links, sockets,
/// FIFOs and devices all land in [`Scan::skipped`] with a warning. A root that
/// is itself a regular file yields exactly that file. Any failure to open,
/// stat or list an entry aborts the walk.
pub fn find_files(root: &Path) -> Result<Scan> {
    info!("Scanning {}", root.display());

    let mut scan = Scan::default();
    let mut total_dirs = 0usize;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry
            .with_context(|| format!("Unable to enumerate files under '{}'", root.display()))?;
        let file_type = entry.file_type();

        if file_type.is_file() {
            debug!("Found file: '{}'", entry.path().display());
            scan.files.push(entry.into_path());
        } else if file_type.is_dir() {
            total_dirs += 1;
        } else {
            warn!(
                "Ignoring non-regular and non-directory file: {}",
                entry.path().display()
            );
            scan.skipped.push(entry.into_path());
        }
    }

    info!(
        "Found {} files and {} directories ({} skipped)",
        HumanCount(scan.files.len() as u64),
        HumanCount(total_dirs as u64),
        HumanCount(scan.skipped.len() as u64)
    );

    Ok(scan)
}

/// Orders paths by a byte-wise comparison of the whole path, so the result
/// matches a plain string sort rather than `Path`'s component ordering.
pub fn sort_paths(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort_by(|a, b| path_bytes(a).cmp(&path_bytes(b)));
    paths
}
