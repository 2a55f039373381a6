//! Table dump command
//!
//! Decodes every record of a table and writes it as delimited or
//! fixed-width text, to a file or to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::ArgMatches;
use log::{debug, info};

use crate::api::ObjectAccess;
use crate::commands::command_traits::Command;
use crate::commands::{optional_index, required_input};
use crate::errors::AccessResult;
use crate::table::format;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command for dumping table records
pub struct TableCommand<'a> {
    /// Path to the product description
    input_file: String,
    table: usize,
    delimiter: String,
    /// Write aligned columns instead of delimited values
    fixed_width: bool,
    /// Output path; stdout when absent
    output_file: Option<String>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> TableCommand<'a> {
    /// Create a new table command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new TableCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> AccessResult<Self> {
        Ok(TableCommand {
            input_file: required_input(args)?,
            table: optional_index(args, "table")?.unwrap_or(0),
            delimiter: args.get_one::<String>("delimiter").cloned().unwrap_or_else(|| ",".to_string()),
            fixed_width: args.get_flag("fixed-width"),
            output_file: args.get_one::<String>("output").cloned(),
            logger,
        })
    }

    fn open_output(&self) -> AccessResult<Box<dyn Write>> {
        Ok(match &self.output_file {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout())),
        })
    }
}

impl<'a> Command for TableCommand<'a> {
    fn name(&self) -> &'static str {
        "table"
    }

    fn execute(&self) -> AccessResult<()> {
        let access = ObjectAccess::open(&self.input_file)?;
        let reader = access.table_reader(self.table)?;
        info!("Dumping table '{}' ({} records)", reader.name(), reader.record_count());

        let mut out = self.open_output()?;
        let names: Vec<&str> = reader.codec().fields().iter().map(|f| f.name.as_str()).collect();
        let widths = format::column_widths(reader.codec());

        if self.fixed_width {
            let header: Vec<String> = names.iter().zip(&widths)
                .map(|(name, &width)| format!("{:<width$}", name, width = width))
                .collect();
            writeln!(out, "{}", header.join(" "))?;
        } else {
            format::write_header(&names, &mut out, &self.delimiter)?;
        }

        // Keep the bar off the terminal when records go to stdout
        let progress = if self.output_file.is_some() {
            ProgressTracker::new(reader.record_count() as u64, reader.name())
        } else {
            ProgressTracker::hidden(reader.record_count() as u64)
        };

        for record in reader.records() {
            let record = record?;
            if self.fixed_width {
                format::write_fixed_width(&record, &widths, &mut out)?;
            } else {
                format::write_delimited(&record, &mut out, &self.delimiter)?;
            }
            progress.increment(1);
        }
        out.flush()?;
        progress.finish();
        debug!("Wrote {} records", progress.position());

        self.logger.log_section("Table", &[
            ("input".to_string(), self.input_file.clone()),
            ("table".to_string(), reader.name().to_string()),
            ("records".to_string(), reader.record_count().to_string()),
            ("output".to_string(), self.output_file.clone().unwrap_or_else(|| "stdout".to_string())),
        ])?;
        Ok(())
    }
}
