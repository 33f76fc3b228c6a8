//! sexpsheet - Evaluate S-expression spreadsheets from the command line

mod config;
mod error;
mod logging;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use sexpsheet_core::Worksheet;
use sexpsheet_engine::engine::{Coord, parse_number};

use crate::error::CliError;

fn print_usage() {
    eprintln!("Usage: sexpsheet -in <FILE> (-eval <CELL> | -save <FILE> | -dump) [OPTIONS]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  -eval <CELL>              Print the value of one cell (fails if any cell is an error)");
    eprintln!("  -save <FILE>              Write the worksheet back out");
    eprintln!("  -dump                     Print every populated cell with its value");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -in <FILE>                Worksheet file to read");
    eprintln!("  --config <FILE>           Load limits from TOML file");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostic output on stderr.");
}

#[derive(Debug)]
enum Command {
    Eval(String),
    Save(PathBuf),
    Dump,
}

#[derive(Debug)]
struct Options {
    input: PathBuf,
    command: Command,
    config_file: Option<PathBuf>,
}

enum Parsed {
    Run(Options),
    Help,
}

fn parse_args(args: &[String]) -> Result<Parsed, CliError> {
    let mut input: Option<PathBuf> = None;
    let mut command: Option<Command> = None;
    let mut config_file: Option<PathBuf> = None;

    let mut set_command = |next: Command| -> Result<(), CliError> {
        if command.is_some() {
            return Err(CliError::ConflictingCommands);
        }
        command = Some(next);
        Ok(())
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Parsed::Help),
            "-in" => {
                i += 1;
                let value = args.get(i).ok_or(CliError::MissingValue("-in", "a file path"))?;
                input = Some(PathBuf::from(value));
            }
            "-eval" => {
                i += 1;
                let value = args.get(i).ok_or(CliError::MissingValue("-eval", "a cell"))?;
                set_command(Command::Eval(value.to_string()))?;
            }
            "-save" => {
                i += 1;
                let value = args.get(i).ok_or(CliError::MissingValue("-save", "a file path"))?;
                set_command(Command::Save(PathBuf::from(value)))?;
            }
            "-dump" => set_command(Command::Dump)?,
            "--config" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or(CliError::MissingValue("--config", "a file path"))?;
                config_file = Some(PathBuf::from(value));
            }
            arg => return Err(CliError::UnknownArgument(arg.to_string())),
        }
        i += 1;
    }

    let input = input.ok_or(CliError::MissingInput)?;
    let command = command.ok_or(CliError::MissingCommand)?;
    Ok(Parsed::Run(Options {
        input,
        command,
        config_file,
    }))
}

fn run(options: Options) -> anyhow::Result<ExitCode> {
    let (config, warnings) = config::load_config(options.config_file.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut sheet = Worksheet::with_limits(config.limits);
    sheet
        .load_file(&options.input)
        .with_context(|| format!("Failed to load {}", options.input.display()))?;

    match options.command {
        Command::Eval(cell) => {
            let coord =
                Coord::parse_a1(&cell).ok_or_else(|| CliError::InvalidCell(cell.clone()))?;
            let errors = sheet.errors();
            if !errors.is_empty() {
                for (coord, value) in errors {
                    println!("Error in cell {}: {}", coord, value);
                }
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", format_for_print(&sheet.eval_cell(&coord)));
        }
        Command::Save(path) => {
            sheet
                .save_as(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
        }
        Command::Dump => {
            for (coord, value) in sheet.evaluate_all() {
                println!("{} {}", coord, value);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Numbers print with six decimals; everything else verbatim.
fn format_for_print(value: &str) -> String {
    match parse_number(value) {
        Some(n) => format!("{:.6}", n),
        None => value.to_string(),
    }
}

fn main() -> ExitCode {
    logging::init_tracing();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(Parsed::Run(options)) => options,
        Ok(Parsed::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
