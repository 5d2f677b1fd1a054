use clap::Parser;
use mention::cli::commands::Cli;
use mention::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // No subcommand launches the editor
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
