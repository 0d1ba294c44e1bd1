use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod ticker;
mod tui;

#[derive(Parser)]
#[command(name = "tomatick", version, about = "Step timer with a reorderable work/break list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive timer (default)
    Run,
    /// Print the seed sequence
    Steps {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run the seed to completion without a terminal UI
    Simulate {
        /// Skip this many steps before starting
        #[arg(long, default_value = "0")]
        skip: usize,
        /// Also print one event per second
        #[arg(long)]
        ticks: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(),
        Commands::Steps { json } => commands::steps::run(json),
        Commands::Simulate { skip, ticks } => commands::simulate::run(skip, ticks),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
