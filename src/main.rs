use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

use pdsaccess::utils::logger::Logger;
use pdsaccess::commands::{CommandFactory, PdsCommandFactory};

fn main() {
    let matches = ClapCommand::new("pdsaccess")
        .version("1.0")
        .about("Decode planetary data products and export their images and tables")
        .arg(
            Arg::new("input")
                .help("Product description (TOML)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .help("Export an image array")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Export format (png, vicar, pds3, fits)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .help("Target pixel depth (8, 16 or 32)")
                .value_name("BITS")
                .required(false),
        )
        .arg(
            Arg::new("maximize")
                .long("maximize")
                .help("Stretch the band's value range over the output range")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("array")
                .long("array")
                .help("Index of the array to export")
                .value_name("INDEX")
                .default_value("0"),
        )
        .arg(
            Arg::new("band")
                .long("band")
                .help("Index of the band to export")
                .value_name("INDEX")
                .default_value("0"),
        )
        .arg(
            Arg::new("table")
                .short('t')
                .long("table")
                .help("Dump the records of the table at this index")
                .value_name("INDEX")
                .required(false),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .help("Field delimiter for table output")
                .value_name("TEXT")
                .default_value(","),
        )
        .arg(
            Arg::new("fixed-width")
                .long("fixed-width")
                .help("Write table output as aligned columns")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log messages and an operations journal to this file")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let logger = match matches.get_one::<String>("log-file") {
        Some(path) => match Logger::init_global_logger(path) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        },
        None => {
            env_logger::init();
            Logger::disabled()
        }
    };

    let factory = PdsCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("{} command failed: {}", command.name(), e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
