// macprobe/src/main.rs
use std::process;

use clap::Parser;
use colored::Colorize;
use macprobe_common::config::Config;
use macprobe_common::error::MacProbeError;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::CliArgs;

fn main() {
    let cli_args = CliArgs::parse();

    let level_filter = match cli_args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("MACPROBE_LOG")
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            let e = MacProbeError::Config(format!("Could not load config: {e}"));
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = cli_args.command.run(&config) {
        error!("Command failed: {:#}", e);
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }

    debug!("Command completed successfully.");
}
