mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{get, init, set, show, trail, GetArgs, InitArgs, SetArgs, ShowArgs, TrailArgs};

/// LiPD CLI - inspect and edit paleoclimate datasets
#[derive(Parser, Debug)]
#[command(name = "lipd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default lipd-editor.config.json
    Init(InitArgs),

    /// Summarize a dataset
    Show(ShowArgs),

    /// Print the value at a path
    Get(GetArgs),

    /// Write a value at a path and save
    Set(SetArgs),

    /// Print the breadcrumb trail for a path
    Trail(TrailArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Get(args) => get(args, &cwd),
        Command::Set(args) => set(args, &cwd),
        Command::Trail(args) => trail(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
