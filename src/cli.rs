use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tree-checksum", version)]
#[command(about = "Print an MD5 checksum for every regular file under a directory")]
pub struct Cli {
    /// Path to root directory to begin checks
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Increase diagnostic output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show a progress bar on stderr while hashing
    #[arg(long)]
    pub progress: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}
