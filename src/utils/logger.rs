//! Logger utility for application-wide logging
//!
//! A file-backed logger that plugs into the `log` crate and also keeps an
//! operations journal for the CLI commands.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use log::{Log, Record, Level, Metadata, LevelFilter};

/// File logger
///
/// Clones share the same file handle.
#[derive(Clone)]
pub struct Logger {
    /// File handle for log output, `None` when disabled
    file: Arc<Mutex<Option<File>>>,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Arc::new(Mutex::new(Some(file))),
        })
    }

    /// A logger that discards everything
    pub fn disabled() -> Self {
        Logger {
            file: Arc::new(Mutex::new(None)),
        }
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs a titled block of `name: value` lines
    pub fn log_section(&self, title: &str, entries: &[(String, String)]) -> io::Result<()> {
        self.log(title)?;
        for (name, value) in entries {
            self.log(&format!("  {}: {}", name, value))?;
        }
        Ok(())
    }

    /// Static method to initialize the global logger
    ///
    /// Returns a handle sharing the same file, for use as the operations journal.
    pub fn init_global_logger(log_file: &str) -> io::Result<Logger> {
        let global_logger = Logger::new(log_file)?;

        if log::set_boxed_logger(Box::new(global_logger.clone())).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(LevelFilter::Debug);
        Ok(global_logger)
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            // Console echo goes to stderr so table output on stdout stays clean
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {}
}
