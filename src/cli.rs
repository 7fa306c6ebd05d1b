use std::path::PathBuf;

use clap::Parser;

use ember_modes::config::InvalidModePolicy;

#[derive(Parser, Debug)]
#[command(
    name = "ember-modes",
    about = "Normalize Ember generation records into canonical production modes",
    version
)]
pub struct Cli {
    /// Records file (JSON array or JSON Lines); `-` reads stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Config file [default: ./.ember-modes/config.toml, fallback ~/.config/ember-modes/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// How to treat records whose mode is not a string (overrides the config file)
    #[arg(long, value_name = "POLICY")]
    pub invalid_mode: Option<InvalidModeArg>,

    /// Show every record and enable debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum InvalidModeArg {
    Reject,
    Unknown,
}

impl From<&InvalidModeArg> for InvalidModePolicy {
    fn from(arg: &InvalidModeArg) -> Self {
        match arg {
            InvalidModeArg::Reject => InvalidModePolicy::Reject,
            InvalidModeArg::Unknown => InvalidModePolicy::Unknown,
        }
    }
}
