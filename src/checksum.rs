use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use md5::{Digest, Md5};

use crate::utils::{ChecksumRecord, strip_root_prefix};

/// Totals for a completed reporting pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub files: usize,
    pub bytes: u64,
}

/// Streams a file through MD5 and returns the digest with the number of bytes read.
///
/// The file handle is dropped before returning, on success or failure.
pub fn calculate_file_hash(file_path: &Path) -> Result<([u8; 16], u64)> {
    debug!("Calculating hash for: '{}'", file_path.display());

    let file = File::open(file_path)
        .with_context(|| format!("Unable to open: '{}'", file_path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Md5::new();
    let mut buffer = [0; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("Unable to read: '{}'", file_path.display()))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
        total_bytes += bytes_read as u64;
    }

    let mut digest = [0u8; 16];
    digest.copy_from_slice(&hasher.finalize());
    Ok((digest, total_bytes))
}

/// Writes `<path>: <hex digest>` for one record, path bytes as-is.
pub fn write_record<W: Write>(out: &mut W, record: &ChecksumRecord) -> std::io::Result<()> {
    out.write_all(&record.path)?;
    writeln!(out, ": {}", record.hex_digest())
}

/// Hashes each file in order and writes one line per file to `out`.
///
/// `files` is expected to be sorted already. The first open, read or write
/// failure aborts the pass; lines written before it stay written.
pub fn report_checksums<W: Write>(
    files: &[PathBuf],
    root: &Path,
    out: &mut W,
    progress: &ProgressBar,
) -> Result<ReportSummary> {
    let mut summary = ReportSummary::default();

    for path in files {
        let (digest, size) = calculate_file_hash(path)?;
        let record = ChecksumRecord {
            path: strip_root_prefix(path, root),
            digest,
        };
        debug!("Hash calculated for '{}': {}", path.display(), record.hex_digest());

        write_record(out, &record)
            .and_then(|_| out.flush())
            .with_context(|| format!("Unable to write checksum for '{}'", path.display()))?;

        summary.files += 1;
        summary.bytes += size;
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(summary)
}

/// Progress bar over the number of files to hash, drawn on stderr.
pub fn progress_bar(total_files: usize, enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(total_files as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ETA: {eta}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    fn report(files: &[PathBuf], root: &Path) -> (Result<ReportSummary>, String) {
        let mut out = Vec::new();
        let result = report_checksums(files, root, &mut out, &ProgressBar::hidden());
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_file_has_well_known_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();

        let (digest, size) = calculate_file_hash(&path).unwrap();
        assert_eq!(hex::encode(digest), EMPTY_MD5);
        assert_eq!(size, 0);
    }

    #[test]
    fn large_file_is_hashed_across_buffer_boundaries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big");
        let content: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &content).unwrap();

        let (digest, size) = calculate_file_hash(&path).unwrap();
        assert_eq!(digest[..], Md5::digest(&content)[..]);
        assert_eq!(size, content.len() as u64);
    }

    #[test]
    fn identical_content_gives_identical_digest() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a"), b"same bytes").unwrap();
        fs::write(root.join("b"), b"same bytes").unwrap();
        fs::write(root.join("c"), b"same bytez").unwrap();

        let (a, _) = calculate_file_hash(&root.join("a")).unwrap();
        let (b, _) = calculate_file_hash(&root.join("b")).unwrap();
        let (c, _) = calculate_file_hash(&root.join("c")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn writes_lines_in_given_order_with_root_stripped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/x"), b"").unwrap();
        fs::write(root.join("y"), b"").unwrap();

        let files = vec![root.join("sub/x"), root.join("y")];
        let (summary, output) = report(&files, root);

        assert_eq!(summary.unwrap(), ReportSummary { files: 2, bytes: 0 });
        assert_eq!(output, format!("/sub/x: {EMPTY_MD5}\n/y: {EMPTY_MD5}\n"));
    }

    #[test]
    fn missing_file_aborts_but_keeps_earlier_lines() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a"), b"").unwrap();

        let files = vec![root.join("a"), root.join("gone"), root.join("a")];
        let (result, output) = report(&files, root);

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.starts_with("Unable to open:"), "{message}");
        assert!(message.contains("gone"), "{message}");
        assert_eq!(output, format!("/a: {EMPTY_MD5}\n"));
    }

    #[test]
    fn write_record_keeps_path_bytes() {
        let record = ChecksumRecord {
            path: b"dir/file name.txt".to_vec(),
            digest: [0; 16],
        };
        let mut out = Vec::new();
        write_record(&mut out, &record).unwrap();
        assert_eq!(out, b"dir/file name.txt: 00000000000000000000000000000000\n");
    }
}
