use std::path::Path;

use clap::Parser;
use punchlist::cli::commands::Cli;
use punchlist::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let dir = cli.config_dir.clone();
            if let Err(e) = punchlist::tui::run(dir.as_deref().map(Path::new)) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
