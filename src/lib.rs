pub mod checksum;
pub mod cli;
pub mod scanner;
pub mod utils;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

pub use checksum::{ReportSummary, calculate_file_hash, progress_bar, report_checksums};
pub use cli::Cli;
pub use scanner::{Scan, find_files, sort_paths};
pub use utils::{ChecksumRecord, format_human_elapsed, strip_root_prefix};

/// Enumerates, sorts and checksums every regular file under `root`, writing
/// one line per file to `out`.
pub fn run_checks<W: Write>(
    root: &Path,
    out: &mut W,
    show_progress: bool,
) -> Result<ReportSummary> {
    let scan = find_files(root)?;
    let files = sort_paths(scan.files);

    let progress = progress_bar(files.len(), show_progress)?;
    report_checksums(&files, root, out, &progress)
}
