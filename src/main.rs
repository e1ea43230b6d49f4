use anyhow::Result;
use btc_housing::AppCommand;
use btc_housing::cli::setup;
use btc_housing::core::log::init_logging;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::Path;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(short, long, global = true)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ChartArgs {
    /// City to chart, e.g. sydney
    #[arg(long)]
    city: String,

    /// monthly (last year, raw points) or yearly (full range, monthly points)
    #[arg(long, default_value = "yearly")]
    view: String,

    /// Days of history to include
    #[arg(long)]
    days: Option<u32>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup {
        /// Replace an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Display current Bitcoin and housing prices
    Prices,
    /// Display a city's housing price in BTC over time
    Ratio(ChartArgs),
    /// Display a city's housing and Bitcoin prices side by side
    Market(ChartArgs),
    /// Estimate the deposit and years needed to save it
    Afford {
        /// City to buy in
        #[arg(long)]
        city: String,
        /// Annual salary
        #[arg(long)]
        salary: f64,
        /// Savings already put aside
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
    },
}

impl Commands {
    fn into_app_command(self) -> Option<AppCommand> {
        match self {
            Commands::Setup { .. } => None,
            Commands::Prices => Some(AppCommand::Prices),
            Commands::Ratio(args) => Some(AppCommand::Ratio {
                city: args.city,
                view: args.view,
                days: args.days,
                json: args.json,
            }),
            Commands::Market(args) => Some(AppCommand::Market {
                city: args.city,
                view: args.view,
                days: args.days,
                json: args.json,
            }),
            Commands::Afford {
                city,
                salary,
                savings,
            } => Some(AppCommand::Afford {
                city,
                salary,
                savings,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup { force }) => match cli.config_path.as_deref() {
            Some(path) => setup::write_example_config(Path::new(path), force),
            None => setup::setup(force),
        },
        Some(cmd) => match cmd.into_app_command() {
            Some(cmd) => btc_housing::run_command(cmd, cli.config_path.as_deref(), cli.date).await,
            None => Ok(()),
        },
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
