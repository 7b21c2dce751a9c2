use std::io::IsTerminal;

use clap::Parser;

use seqdiff::{app, cli::Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(2);
    }

    cli.setup_logging();
    tracing::debug!("Comparing {} with {}", cli.left.display(), cli.right.display());

    match app::run(&cli, std::io::stdout().is_terminal()) {
        Ok(outcome) => {
            if !outcome.output.is_empty() {
                println!("{}", outcome.output);
            }
            std::process::exit(if outcome.differ { 1 } else { 0 });
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(2);
        }
    }
}
