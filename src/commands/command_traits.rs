//! Command and factory traits shared by the CLI

use crate::utils::logger::Logger;
use crate::errors::AccessResult;

/// One CLI operation on a product
pub trait Command {
    /// Short label used in log and error messages
    fn name(&self) -> &'static str;

    /// Run the operation to completion
    fn execute(&self) -> AccessResult<()>;
}

/// Picks and builds the command a set of CLI arguments asks for
pub trait CommandFactory<'a> {
    /// # Arguments
    /// * `args` - Parsed CLI arguments
    /// * `logger` - Journal the command records its work in
    fn create_command(&self, args: &clap::ArgMatches, logger: &'a Logger) -> AccessResult<Box<dyn Command + 'a>>;
}
