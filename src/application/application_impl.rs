use colored::Colorize;
use dirstructure::{ScanError, get_directory_structure};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;

pub struct Application;

impl Application {
    pub fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        debug!("Runtime config: {:?}", runtime_config);

        let listing = Self::listing(&runtime_config)?;
        println!("{listing}");

        Ok(())
    }

    /// Scans the configured root and renders its listing, highlighting the
    /// root line when color is enabled.
    pub fn listing(runtime_config: &RuntimeConfig) -> Result<String, ApplicationError> {
        let root = get_directory_structure(&runtime_config.root).context(DirectoryScanSnafu)?;
        let listing = root.print();

        let colorize = runtime_config.color.should_colorize();
        debug!("Colored output: {}", colorize);
        if !colorize {
            return Ok(listing);
        }

        colored::control::set_override(true);
        let (first, rest) = listing.split_once('\n').unwrap_or((listing.as_str(), ""));
        let mut output = first.bold().blue().to_string();
        if !rest.is_empty() {
            output.push('\n');
            output.push_str(rest);
        }
        Ok(output)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while reading the directory structure"))]
    DirectoryScanError { source: ScanError },
}
