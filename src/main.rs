use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use numagg::{manager::Manager, stats};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Sum {
        #[arg(allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },

    Average {
        #[arg(allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },

    Max {
        #[arg(allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },

    Analyze,

    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    match args.command {
        Command::Sum { numbers } => println!("{}", stats::sum(&numbers)),
        Command::Average { numbers } => println!("{}", stats::average(&numbers)?),
        Command::Max { numbers } => println!("{}", stats::max(&numbers)?),
        Command::Analyze => manager(args.data_dir)?.run_analysis()?,
        Command::Clean => manager(args.data_dir)?.clean_results()?,
    }

    Ok(())
}

fn manager(data_dir: Option<PathBuf>) -> Result<Manager> {
    let data_dir = data_dir.context("--data-dir is required for this command")?;
    Manager::new(data_dir).context("failed to construct manager")
}
