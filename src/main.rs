use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::{fs, io};

use tracing::{error, info};

use zypher::clock::SystemClock;
use zypher::config::Config;
use zypher::session::{Session, DEMO_SCRIPT};

/// Parse command line arguments
/// Returns (config_path, script_path)
fn parse_args() -> (Option<PathBuf>, Option<PathBuf>) {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut script_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --config requires an argument");
                    std::process::exit(1);
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
            _ => {
                script_path = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    (config_path, script_path)
}

/// Log panics before the default hook prints them
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        default_hook(info);
    }));
}

fn print_help() {
    eprintln!("zypher - replay an editing script through a linear undo/redo history");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    zypher [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <FILE>  Read settings from FILE instead of ~/.config/zypher/config.toml");
    eprintln!("    -h, --help           Print this help message");
    eprintln!();
    eprintln!("SCRIPT COMMANDS (one per line, # starts a comment):");
    eprintln!("    type <text>          Append text");
    eprintln!("    edit <text>          Replace the whole text");
    eprintln!("    undo | redo          Step back or forward");
    eprintln!("    mark                 Toggle a snapshot marker on the newest entry");
    eprintln!("    jump-undo <n>        Undo until n+1 entries remain");
    eprintln!("    jump-redo <n>        Redo n+1 entries");
    eprintln!("    clear                Forget all history");
    eprintln!("    show                 Print the text and both stacks");
    eprintln!("    replay               Rewind, then redo step by step printing the text");
    eprintln!();
    eprintln!("Without a script a short built-in demo is run.");
}

fn main() -> ExitCode {
    let (config_path, script_path) = parse_args();

    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::from(config.log.level))
        .init();
    info!("Zypher started");

    install_panic_hook();

    let script = match &script_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(script) => script,
            Err(e) => {
                error!(error = %e, path = %path.display(), "Failed to read script");
                return ExitCode::FAILURE;
            }
        },
        None => DEMO_SCRIPT.to_string(),
    };

    let mut session = Session::new(&config, Box::new(SystemClock));
    for (idx, line) in script.lines().enumerate() {
        match session.run_line(idx + 1, line) {
            Ok(Some(msg)) => println!("{}", msg),
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Script failed");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
