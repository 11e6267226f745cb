//! # CLI Console
//!
//! Reads commands from stdin (or a script file) and prints one answer per
//! command.

use cli_console::{parse_args, CliAction, CommandHandler, ConsoleConfig, ConsoleSession};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cli_console");

    let config = match parse_args(&args) {
        Ok(CliAction::Run(config)) => config,
        Ok(CliAction::Help) => {
            print_usage(program);
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Console error: {}", e);
        process::exit(1);
    }
}

fn run(config: &ConsoleConfig) -> Result<(), Box<dyn std::error::Error>> {
    services_logger::init(config.level_filter()?)?;

    let handler = CommandHandler::new().with_listing(config.enable_list);
    let mut session = ConsoleSession::new(handler);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open script {}: {}", path.display(), e))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            session.run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      JSON configuration file");
    eprintln!("  -s, --script <FILE>      Read commands from FILE instead of stdin");
    eprintln!("  --log-level <LEVEL>      off, error, warn (default), info, debug, trace");
    eprintln!("  --enable-list            Accept the `ls <path>` command");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} < commands.txt", program);
    eprintln!("  {} --script commands.txt --log-level info", program);
}
