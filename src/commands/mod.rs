//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod export_command;
pub mod info_command;
pub mod table_command;

pub use command_traits::{Command, CommandFactory};
pub use export_command::ExportCommand;
pub use info_command::InfoCommand;
pub use table_command::TableCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::errors::{AccessError, AccessResult};

/// Factory for creating command instances based on CLI arguments
pub struct PdsCommandFactory;

impl PdsCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        PdsCommandFactory
    }
}

impl Default for PdsCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for PdsCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> AccessResult<Box<dyn Command + 'a>> {
        if args.get_flag("export") {
            Ok(Box::new(ExportCommand::new(args, logger)?))
        } else if args.get_one::<String>("table").is_some() {
            Ok(Box::new(TableCommand::new(args, logger)?))
        } else {
            // Default to the product summary
            Ok(Box::new(InfoCommand::new(args, logger)?))
        }
    }
}

pub(crate) fn required_input(args: &ArgMatches) -> AccessResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| AccessError::GenericError("Missing input file".to_string()))
}

pub(crate) fn optional_index(args: &ArgMatches, name: &str) -> AccessResult<Option<usize>> {
    match args.get_one::<String>(name) {
        Some(text) => text.parse::<usize>()
            .map(Some)
            .map_err(|_| AccessError::GenericError(format!("Invalid {} index: {}", name, text))),
        None => Ok(None),
    }
}
