use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use daylog::config::{self, LogConfig};
use daylog::{Level, Logger};

/// Emit leveled log lines to the terminal and to date-stamped log files
#[derive(Parser, Debug)]
#[command(name = "daylog")]
#[command(version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/daylog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the log directory
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Do not append to the day's log file
    #[arg(long, global = true)]
    no_file: bool,

    /// Do not print to the terminal
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit an INFO record
    Info { message: Vec<String> },
    /// Emit a WARNING record
    Warning { message: Vec<String> },
    /// Emit an ERROR record
    Error { message: Vec<String> },
    /// Emit the effective configuration as JSON
    ShowConfig,
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "daylog=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    if let Command::InitConfig { force } = cli.command {
        if config_path.exists() && !force {
            anyhow::bail!(
                "Config file {} already exists (use --force to overwrite)",
                config_path.display()
            );
        }
        LogConfig::default().save(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let mut config = LogConfig::load(&config_path)?;
    if let Some(dir) = cli.dir {
        config.path = dir;
    }
    if cli.no_file {
        config.create_log_file = false;
    }
    if cli.quiet {
        config.debug_mode = false;
    }

    let logger = Logger::new(config);
    let caller = daylog::caller!();

    let result = match cli.command {
        Command::Info { message } => logger.log(Level::Info, caller, &message.join(" ")),
        Command::Warning { message } => logger.log(Level::Warning, caller, &message.join(" ")),
        Command::Error { message } => logger.log(Level::Error, caller, &message.join(" ")),
        Command::ShowConfig => logger.log_json(caller, "Log Config", logger.config()),
        Command::InitConfig { .. } => Ok(()),
    };

    result.context("Failed to emit log record")
}
