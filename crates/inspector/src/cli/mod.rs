pub mod config_cmd;
pub mod formats;
pub mod inspect;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "file-inspector",
    version,
    about = "Identify files by their magic numbers and show header metadata"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Args, Clone)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config dir).
    #[arg(long, global = true, env = "FILE_INSPECTOR_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Emit log lines as JSON.
    #[arg(long, global = true, env = "FILE_INSPECTOR_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify a file and show its header fields.
    Inspect(InspectArgs),

    /// List the known signatures.
    Formats(FormatsArgs),

    /// View / edit configuration.
    Config(ConfigArgs),
}

//  Subcommand argument structs

#[derive(Debug, clap::Args, Clone)]
pub struct InspectArgs {
    /// File to inspect.
    pub path: std::path::PathBuf,

    /// Print the inspection as JSON.
    #[arg(long)]
    pub json: bool,

    /// Bytes shown in the hex dump (32-128).
    #[arg(long, env = "FILE_INSPECTOR_HEX_BYTES")]
    pub bytes: Option<usize>,
}

#[derive(Debug, clap::Args, Clone)]
pub struct FormatsArgs {
    /// Only show entries whose name or description contains this text.
    #[arg(long)]
    pub filter: Option<String>,

    /// List the header parsers instead of the signature catalogue.
    #[arg(long)]
    pub parsers: bool,
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Display the current configuration.
    Show,
    /// Set a configuration value.
    Set { key: String, value: String },
}
