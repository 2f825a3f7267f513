//! Runtime configuration from command line and environment (`.env` supported).

use crate::models::MAX_LENGTH;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::net::Ipv4Addr;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Prefix list file (text, or a JSON array when it ends in .json). Reads stdin when absent or `-`.
    pub input: Option<String>,

    /// Output format.
    #[arg(long, value_enum, env = "NETPREFIX_OUTPUT", default_value_t = OutputFormat::Text, ignore_case = true)]
    pub output: OutputFormat,

    /// Shorthand for `--output json`.
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Shorthand for `--output text`.
    #[arg(long)]
    pub text: bool,

    /// Minimum prefix length of the lookup hash buckets (0 keys each network on its own length).
    #[arg(
        long,
        env = "NETPREFIX_MIN_PREFIX",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=MAX_LENGTH as i64)
    )]
    pub min_prefix: u8,

    /// Address to look up; may be repeated.
    #[arg(long = "lookup")]
    pub lookups: Vec<Ipv4Addr>,

    /// log4rs YAML file.
    #[arg(long, env = "NETPREFIX_LOG_CONFIG", default_value = "log4rs.yml")]
    pub log_config: String,

    /// Log level used when the log4rs file is missing.
    #[arg(long, env = "NETPREFIX_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// log4rs YAML file.
    pub log_config: String,
    /// Level used when `log_config` is missing.
    pub log_level: LevelFilter,
    /// Minimum prefix of the lookup hash buckets.
    pub min_prefix: u8,
    pub output: OutputFormat,
    /// Input file, `None` for stdin.
    pub input: Option<String>,
    pub lookups: Vec<Ipv4Addr>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let output = match (cli.json, cli.text) {
            (true, _) => OutputFormat::Json,
            (_, true) => OutputFormat::Text,
            _ => cli.output,
        };
        Config {
            log_config: cli.log_config,
            log_level: cli.log_level,
            min_prefix: cli.min_prefix,
            output,
            input: cli.input,
            lookups: cli.lookups,
        }
    }
}

impl Config {
    /// Parse the process arguments, falling back to `NETPREFIX_*` environment variables.
    pub fn from_args() -> Config {
        Cli::parse().into()
    }
}

/// Initialise log4rs from the configured YAML file, or a stderr appender if it is missing.
pub fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    if Path::new(&config.log_config).exists() {
        log4rs::init_file(&config.log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {}: {e}", config.log_config))?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S)} {h({l:<5})} {t} - {m}{n}",
        )))
        .build();
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(config.log_level))?;
    log4rs::init_config(log_config)?;
    log::debug!(
        "{} not found, logging to stderr at {}",
        config.log_config,
        config.log_level
    );
    Ok(())
}
