//! Clap derive structures for the `doxie` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// doxie -- talk to a Doxie scanner over Wi-Fi
#[derive(Debug, Parser)]
#[command(
    name = "doxie",
    version,
    about = "Control a Doxie document scanner from the command line",
    long_about = "Query status, list, download and delete scans on a Doxie scanner\n\
        through its HTTP/JSON API (https://<address>:8080).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Scanner profile to use
    #[arg(long, short = 'p', env = "DOXIE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Scanner address, host name or IP (overrides profile)
    #[arg(long, short = 'a', env = "DOXIE_ADDRESS", global = true)]
    pub address: Option<String>,

    /// Scanner password (overrides profile)
    #[arg(long, env = "DOXIE_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format [default: `defaults.output` from the config file, else table]
    #[arg(long, short = 'o', env = "DOXIE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept the scanner's self-signed TLS certificate
    #[arg(long, short = 'k', env = "DOXIE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "DOXIE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show basic scanner status
    Hello,

    /// Show extended scanner status (firmware, power)
    #[command(alias = "status")]
    HelloExtra,

    /// Restart the scanner's Wi-Fi module
    Restart,

    /// List, download and delete scans
    #[command(alias = "s")]
    Scans(ScansArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SCANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ScansArgs {
    #[command(subcommand)]
    pub command: ScansCommand,
}

#[derive(Debug, Subcommand)]
pub enum ScansCommand {
    /// List every scan on the device
    #[command(alias = "ls")]
    List,

    /// List the most recent scans
    Recent,

    /// Download a scan (to stdout unless --dest is given)
    Get {
        /// Scan identifier as listed, e.g. /DOXIE/JPEG/IMG_0001.JPG
        id: String,

        /// Write the scan to this file instead of stdout
        #[arg(long, short = 'd')]
        dest: Option<PathBuf>,
    },

    /// Download a scan's thumbnail (to stdout unless --dest is given)
    #[command(alias = "thumb")]
    Thumbnail {
        /// Scan identifier as listed, e.g. /DOXIE/JPEG/IMG_0001.JPG
        id: String,

        /// Write the thumbnail to this file instead of stdout
        #[arg(long, short = 'd')]
        dest: Option<PathBuf>,
    },

    /// Delete one scan
    #[command(alias = "rm")]
    Delete {
        /// Scan identifier
        id: String,
    },

    /// Delete several scans in one request
    DeleteMany {
        /// Scan identifiers
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (passwords masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a profile's password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
