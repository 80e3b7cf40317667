use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use option_overlay::{
    report::{self, logger},
    types::{AppConfig, Calculator, OutputFormat},
};

#[derive(Parser, Debug)]
#[command(name = "option-overlay")]
#[command(about = "Model protective puts, covered calls, lock-ins and wheel entries against a stock position", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/overlay.toml")]
    config: String,

    /// Override output format (text/json)
    #[arg(long)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Protective put / covered call calculator
    Hedge {
        /// Spot for the adjustable scenario
        #[arg(long)]
        spot: Option<f64>,
    },
    /// Compare lock-in exits across strikes
    LockIn {
        /// Strike to show in detail
        #[arg(long)]
        strike: Option<f64>,
    },
    /// Cash-secured put plus protective put wheel entry
    Wheel {
        /// Override the number of contracts
        #[arg(long)]
        contracts: Option<u32>,
    },
    /// Run every calculator
    All {},
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "option_overlay=debug,overlay=debug,info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(target: "overlay", "option-overlay starting");

    let cli = Cli::parse();
    tracing::debug!(target: "overlay", config = %cli.config, "loading config");

    let mut settings = AppConfig::from_file_or_default(&cli.config)?;
    if let Some(format) = cli.format {
        settings.output.format = format;
    }

    let calculators: Vec<Calculator> = match cli.command.unwrap_or(Commands::All {}) {
        Commands::Hedge { spot } => {
            if spot.is_some() {
                settings.hedge.custom_spot = spot;
            }
            vec![Calculator::Hedge]
        }
        Commands::LockIn { strike } => {
            if strike.is_some() {
                settings.lock_in.selected_strike = strike;
            }
            vec![Calculator::LockIn]
        }
        Commands::Wheel { contracts } => {
            if let Some(contracts) = contracts {
                settings.wheel.contracts = contracts;
            }
            vec![Calculator::Wheel]
        }
        Commands::All {} => Calculator::ALL.to_vec(),
    };

    let names: Vec<&str> = calculators.iter().map(Calculator::as_str).collect();
    logger::log_startup(&settings, &names);

    let as_of = settings.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let reports = report::build(&settings, &calculators, as_of)?;

    for r in &reports {
        logger::log_report(r);
    }

    match settings.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for r in &reports {
                println!("{r}");
            }
        }
    }

    Ok(())
}
