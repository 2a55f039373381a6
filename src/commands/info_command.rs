//! Product summary command

use clap::ArgMatches;
use log::info;

use crate::api::ObjectAccess;
use crate::commands::command_traits::Command;
use crate::commands::required_input;
use crate::errors::AccessResult;
use crate::utils::logger::Logger;

/// Command for printing the arrays and tables of a product
pub struct InfoCommand<'a> {
    /// Path to the product description
    input_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> AccessResult<Self> {
        Ok(InfoCommand {
            input_file: required_input(args)?,
            logger,
        })
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn name(&self) -> &'static str {
        "info"
    }

    fn execute(&self) -> AccessResult<()> {
        let access = ObjectAccess::open(&self.input_file)?;
        info!("Summarizing {}", self.input_file);

        let summary = access.describe();
        print!("{}", summary);
        self.logger.log(&summary)?;
        Ok(())
    }
}
