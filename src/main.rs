use std::io;
use std::process;
use std::time::Instant;

use clap::Parser;
use clap::error::ErrorKind;
use indicatif::{HumanBytes, HumanCount};
use log::{LevelFilter, debug, error, info};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use tree_checksum::{Cli, format_human_elapsed, run_checks};

fn init_logging(level: LevelFilter) {
    let mut config = ConfigBuilder::new();
    let _ = config.set_time_offset_to_local();
    config.set_target_level(LevelFilter::Off);
    config.set_thread_level(LevelFilter::Off);

    if TermLogger::init(level, config.build(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("Failed to initialize logger");
    }
}

fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Help and version are not failures; everything else exits 1.
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    }
}

fn main() {
    let start_time = Instant::now();
    let cli = parse_args();

    init_logging(cli.log_level());

    info!("Starting tree-checksum v{}", env!("CARGO_PKG_VERSION"));
    debug!("Command line arguments: {:?}", cli);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run_checks(&cli.dir, &mut out, cli.progress) {
        Ok(summary) => {
            info!(
                "Checksummed {} files ({}) in {}",
                HumanCount(summary.files as u64),
                HumanBytes(summary.bytes),
                format_human_elapsed(start_time.elapsed())
            );
        }
        Err(err) => {
            error!("{:#}", err);
            process::exit(1);
        }
    }
}
