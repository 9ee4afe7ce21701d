//! ecommerce-dashboard CLI
//!
//! Usage:
//!   ecommerce-dashboard [--config <file.json>] [--data <orders.csv>] <command>
//!
//! Examples:
//!   ecommerce-dashboard report --from 2018-01-01 --to 2018-06-30
//!   ecommerce-dashboard json --pretty
//!   ecommerce-dashboard export --output dashboard.xlsx
//!   ecommerce-dashboard info

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use ecommerce_dashboard::commands::{
    dashboard_json, dataset_info, export_excel_dashboard, render_dataset_info,
    render_text_report, run_dashboard_logic, DashboardRequest,
};
use ecommerce_dashboard::config::load_config;
use ecommerce_dashboard::dataset::Dataset;
use ecommerce_dashboard::error::AppError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ecommerce-dashboard")]
#[command(about = "Orders, revenue and customer breakdowns over the Brazilian e-commerce dataset")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Orders CSV (overrides dataPath from the configuration)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DateArgs {
    /// First day of the period (YYYY-MM-DD), defaults to the first purchase
    #[arg(long)]
    from: Option<String>,

    /// Last day of the period, inclusive (YYYY-MM-DD), defaults to the last purchase
    #[arg(long)]
    to: Option<String>,
}

impl DateArgs {
    fn into_request(self) -> DashboardRequest {
        DashboardRequest {
            date_from: self.from,
            date_to: self.to,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard as a text report
    Report {
        #[command(flatten)]
        dates: DateArgs,
    },

    /// Print the dashboard as JSON
    Json {
        #[command(flatten)]
        dates: DateArgs,

        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },

    /// Write the dashboard to an Excel workbook
    Export {
        #[command(flatten)]
        dates: DateArgs,

        /// Destination .xlsx file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Describe the loaded dataset
    Info,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("ECOMMERCE_DASHBOARD_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let dataset = Dataset::load(&config.data_path, &config)?;

    match cli.command {
        Commands::Report { dates } => {
            let dashboard = run_dashboard_logic(&dataset, &dates.into_request(), &config)?;
            print!("{}", render_text_report(&dashboard));
        }
        Commands::Json { dates, pretty } => {
            println!(
                "{}",
                dashboard_json(&dataset, &dates.into_request(), &config, pretty)?
            );
        }
        Commands::Export { dates, output } => {
            let result =
                export_excel_dashboard(&dataset, &dates.into_request(), &config, &output)?;
            println!(
                "Wrote {} ({} bytes in {} ms)",
                result.path, result.size_bytes, result.duration_ms
            );
        }
        Commands::Info => {
            print!("{}", render_dataset_info(&dataset_info(&dataset)));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
