//! dyntable
//!
//! Renders a declarative table definition against a list of items.
//!
//! ```bash
//! dyntable render --config table.json --items items.json --format text
//! ```

mod error;
mod render;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::CliError;
use crate::render::RenderArgs;

#[derive(Parser)]
#[command(name = "dyntable")]
#[command(about = "Render declarative tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a table and print the result
    Render(RenderArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logging(path: Option<&Path>, level: LevelFilter) -> Result<(), CliError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => {
            WriteLogger::init(level, Config::default(), io::stderr())?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<String, CliError> {
    init_logging(cli.log.as_deref(), cli.log_level.into())?;
    match cli.command {
        Commands::Render(args) => render::run(&args),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;

    #[test]
    fn test_parse_render_command() {
        let cli = Cli::try_parse_from([
            "dyntable",
            "render",
            "--config",
            "table.json",
            "--items",
            "items.json",
            "--expand-all",
            "--format",
            "text",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, LogLevel::Debug);
        assert!(cli.log.is_none());
        let Commands::Render(args) = cli.command;
        assert_eq!(args.config, PathBuf::from("table.json"));
        assert_eq!(args.items, PathBuf::from("items.json"));
        assert!(args.expand_all);
        assert!(!args.select_all);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dyntable", "render", "-c", "t.json", "-i", "i.json"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        let Commands::Render(args) = cli.command;
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_render_requires_inputs() {
        assert!(Cli::try_parse_from(["dyntable", "render", "--config", "t.json"]).is_err());
    }

    #[test]
    fn test_second_logger_install_fails() {
        let _ = init_logging(None, LevelFilter::Off);
        let err = init_logging(None, LevelFilter::Off).unwrap_err();
        assert!(matches!(err, CliError::Logger(_)));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
