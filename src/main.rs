//! CLI entry point for the OpenAQ report server.
//!
//! Provides subcommands for serving the report web front-end and for
//! producing a single report on the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use openaq_report::config::{AppConfig, PolicyKind};
use openaq_report::infra::openaq::OpenAqClient;
use openaq_report::logging::env_filter;
use openaq_report::output::{append_intervals, print_json, print_pretty};
use openaq_report::report::{ReportRequest, build_report};
use openaq_report::web::{AppState, router};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "openaq_report")]
#[command(about = "Air quality reports from OpenAQ data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the report web pages
    Serve {
        /// Address to listen on (overrides BIND_ADDR)
        #[arg(short, long)]
        bind: Option<String>,

        /// Poor air quality rule (overrides AIR_QUALITY_POLICY)
        #[arg(long, value_enum)]
        policy: Option<PolicyKind>,
    },
    /// Build one report and log its statistics
    Report {
        /// City or station name
        #[arg(long)]
        place_name: Option<String>,

        /// country, city or location
        #[arg(long, default_value = "city")]
        place_type: String,

        /// Country code, required for country reports
        #[arg(long)]
        place_id: Option<String>,

        /// Averaging interval: day, month or year
        #[arg(short, long, default_value = "day")]
        time: String,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        date_from: Option<String>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        date_to: Option<String>,

        /// Poor air quality rule (overrides AIR_QUALITY_POLICY)
        #[arg(long, value_enum)]
        policy: Option<PolicyKind>,

        /// Log the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// CSV file to append the classified intervals to
        #[arg(long)]
        csv: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/openaq_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("openaq_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::INFO));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;

    match cli.command {
        Commands::Serve { bind, policy } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(policy) = policy {
                config.policy = policy.policy();
            }
            serve(config).await?;
        }
        Commands::Report {
            place_name,
            place_type,
            place_id,
            time,
            date_from,
            date_to,
            policy,
            json,
            csv,
        } => {
            if let Some(policy) = policy {
                config.policy = policy.policy();
            }

            let params: HashMap<String, String> = [
                ("placeName", place_name),
                ("placeType", Some(place_type)),
                ("placeId", place_id),
                ("time", Some(time)),
                ("dateFrom", date_from),
                ("dateTo", date_to),
                ("pm25", Some("on".to_string())),
            ]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
            .collect();

            let request = ReportRequest::from_params(&params)?;
            let api = OpenAqClient::new(&config)?;
            let report = build_report(&api, &config, request).await?;

            print_pretty(&report);
            if json {
                print_json(&report)?;
            }
            if let Some(path) = csv {
                append_intervals(&path, &report)?;
                info!(path = %path, rows = report.intervals.len(), "Intervals written");
            }
        }
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    let api = OpenAqClient::new(&config)?;
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState {
        config,
        api: Arc::new(api),
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("cannot listen on {bind_addr}"))?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
    }
}
