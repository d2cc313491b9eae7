//! CLI argument definitions for the master merger.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use merger_cli::config::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "master-merger",
    version,
    about = "Merge heterogeneous CSV and Excel files into uniform master CSV files",
    long_about = "Merge heterogeneous CSV and Excel files into uniform master CSV files.\n\n\
                  Column names are grouped into a canonical schema by a chat-completion\n\
                  model, values are cleansed, and records are written in fixed-size chunks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Show record values in trace output instead of redacting them.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Discover fields, establish the schema and write master files.
    Run(RunArgs),

    /// List the distinct raw field names found in the input directory.
    Fields(FieldsArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// JSON configuration file (default: ./config.json when present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the CSV and Excel inputs.
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory the master files are written to.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Records per master file.
    #[arg(long = "rows-per-file", value_name = "N")]
    pub rows_per_file: Option<usize>,

    /// Where the field mapping is saved, or loaded from with --reuse-mapping.
    #[arg(long = "mapping-file", value_name = "PATH")]
    pub mapping_file: Option<PathBuf>,

    /// Load the saved field mapping instead of asking the model.
    #[arg(long = "reuse-mapping")]
    pub reuse_mapping: bool,

    /// API key for the chat-completion service.
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long = "api-base-url", value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Chat model used to propose the mapping.
    #[arg(long = "model")]
    pub model: Option<String>,

    /// Sampling temperature for the mapping request.
    #[arg(long = "temperature")]
    pub temperature: Option<f32>,

    /// Mapping request timeout in seconds (0 waits indefinitely).
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            rows_per_file: self.rows_per_file,
            field_mapping_file: self.mapping_file.clone(),
            api_key: self.api_key.clone(),
            api_base_url: self.api_base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            request_timeout_secs: self.timeout_secs,
            reuse_mapping: self.reuse_mapping,
        }
    }
}

#[derive(Args)]
pub struct FieldsArgs {
    /// Input directory (default: inputDir from the configuration).
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// JSON configuration file (default: ./config.json when present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "master-merger",
            "run",
            "--input-dir",
            "in",
            "--rows-per-file",
            "50",
            "--reuse-mapping",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.input_dir, Some(PathBuf::from("in")));
        assert_eq!(overrides.rows_per_file, Some(50));
        assert!(overrides.reuse_mapping);
        assert_eq!(overrides.api_key, None);
    }

    #[test]
    fn test_global_log_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["master-merger", "fields", "in", "--log-format", "json"]).unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(matches!(cli.command, Command::Fields(_)));
    }
}
