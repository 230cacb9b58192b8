// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test capture CLI entry point.

use clap::{Parser, Subcommand};
use shotguard_capture::{CaptureError, Scale};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use test_capture::config::parse_scale;
use test_capture::{logging, CaptureConfig, CompareMode, Screenshots};

/// Exit codes reported by the CLI
mod exit_codes {
    /// Capture matches its baseline
    pub const SUCCESS: u8 = 0;
    /// Capture differs from its baseline
    pub const REGRESSION: u8 = 1;
    /// Configuration, I/O or decoding failure
    pub const ERROR: u8 = 2;
}

/// Compare screenshot captures against committed baselines
#[derive(Parser, Debug)]
#[command(name = "test-capture")]
#[command(about = "Capture and compare screenshot test output")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./shotguard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a captured .png or .txt artifact against its baseline
    Compare {
        /// Captured artifact
        actual: PathBuf,

        /// Comparison mode (overrides config and SHOTGUARD_MODE)
        #[arg(long, value_enum)]
        mode: Option<CompareMode>,

        /// Output scale in (0, 1]
        #[arg(long, value_parser = parse_scale)]
        scale: Option<Scale>,

        /// Baseline directory
        #[arg(long)]
        baseline_dir: Option<PathBuf>,
    },

    /// Print the resolved configuration as TOML
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("test-capture: {err}");
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<u8, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let mut config = CaptureConfig::resolve(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(exit_codes::SUCCESS)
        }
        Command::Compare {
            actual,
            mode,
            scale,
            baseline_dir,
        } => {
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if let Some(scale) = scale {
                config.scale = scale;
            }
            if let Some(dir) = baseline_dir {
                config.baseline_dir = dir;
            }
            Ok(compare(&config, &actual))
        }
    }
}

fn compare(config: &CaptureConfig, actual: &Path) -> u8 {
    let screenshots = Screenshots::new(config);
    let is_text = actual.extension().is_some_and(|ext| ext == "txt");
    let result = if is_text {
        screenshots.verify_text(actual)
    } else {
        screenshots.verify_png(actual, config.scale)
    };

    match result {
        Ok(()) => {
            println!("{}: {} ok", config.mode, actual.display());
            exit_codes::SUCCESS
        }
        Err(CaptureError::Regression(regression)) => {
            eprintln!("{regression}");
            eprintln!("  caused by: {}", regression.cause);
            exit_codes::REGRESSION
        }
        Err(CaptureError::Infrastructure(err)) => {
            eprintln!("test-capture: {err}");
            exit_codes::ERROR
        }
    }
}
