use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorChoice, LogLevel};

/// Print the directory structure below a path
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// The directory to scan
    #[clap(default_value = ".")]
    pub root: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Whether to color the listing
    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorChoice,
}
