//! Image export command
//!
//! Exports one band of one array of a product to PNG, VICAR, PDS3 or FITS.

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::api::ObjectAccess;
use crate::commands::command_traits::Command;
use crate::commands::{optional_index, required_input};
use crate::errors::{AccessError, AccessResult};
use crate::utils::logger::Logger;

/// Command for exporting an image array
pub struct ExportCommand<'a> {
    /// Path to the product description
    input_file: String,
    /// Output path; derived from the input and format when absent
    output_file: Option<String>,
    /// Format name overriding the product default
    format: Option<String>,
    /// Depth overriding the product default
    depth: Option<u32>,
    /// Stretch the band's value range
    maximize: bool,
    array: usize,
    band: usize,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExportCommand<'a> {
    /// Create a new export command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExportCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> AccessResult<Self> {
        let input_file = required_input(args)?;

        let depth = match args.get_one::<String>("depth") {
            Some(text) => Some(text.parse::<u32>()
                .map_err(|_| AccessError::GenericError(format!("Invalid depth: {}", text)))?),
            None => None,
        };

        Ok(ExportCommand {
            input_file,
            output_file: args.get_one::<String>("output").cloned(),
            format: args.get_one::<String>("format").cloned(),
            depth,
            maximize: args.get_flag("maximize"),
            array: optional_index(args, "array")?.unwrap_or(0),
            band: optional_index(args, "band")?.unwrap_or(0),
            logger,
        })
    }
}

impl<'a> Command for ExportCommand<'a> {
    fn name(&self) -> &'static str {
        "export"
    }

    fn execute(&self) -> AccessResult<()> {
        let access = ObjectAccess::open(&self.input_file)?;
        let mut exporter = access.image_exporter(self.array)?;

        if let Some(format) = &self.format {
            exporter.set_export_type(format)?;
        }
        if let Some(depth) = self.depth {
            exporter.set_target_pixel_depth(depth)?;
        }
        if self.maximize {
            exporter.maximize_dynamic_range(true);
        }

        let settings = *exporter.settings();
        let output = match &self.output_file {
            Some(path) => path.clone(),
            None => Path::new(&self.input_file)
                .with_extension(settings.export_type.extension())
                .to_string_lossy()
                .to_string(),
        };

        exporter.convert_to_file(&output, self.band)?;
        info!("Export complete: {}", output);

        self.logger.log_section("Export", &[
            ("input".to_string(), self.input_file.clone()),
            ("array".to_string(), exporter.array().to_string()),
            ("band".to_string(), self.band.to_string()),
            ("format".to_string(), settings.export_type.to_string()),
            ("depth".to_string(), settings.target_pixel_depth.to_string()),
            ("maximize_dynamic_range".to_string(), settings.maximize_dynamic_range.to_string()),
            ("output".to_string(), output),
        ])?;
        Ok(())
    }
}
