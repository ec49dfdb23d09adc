use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use queuepulse::config::MonitorConfig;
use queuepulse::metrics::{MetricsEngine, PercentageChange};
use queuepulse::records::{PageRequest, RecordFilter, RecordQueryService};

#[derive(Parser)]
#[command(
    name = "queuepulse",
    about = "Monitoring view over a persisted log of background job executions",
    version,
    long_about = None
)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, default_value = "data/queuepulse.db", global = true)]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the daemon (API server)
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
    },

    /// List job execution records
    Jobs {
        /// Run state filter: all, running, failed, succeeded
        #[arg(long, default_value = "all")]
        state: String,

        /// Queue filter ("all" for no filter)
        #[arg(long, default_value = "all")]
        queue: String,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// List the distinct queue names seen across all records
    Queues,

    /// Print the period-over-period metrics report
    Metrics {
        /// Trailing window length in days
        #[arg(long)]
        window_days: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = MonitorConfig::load_or_default();

    match cli.command {
        Commands::Serve { bind } => {
            tracing::info!(%bind, "Starting queuepulse daemon");
            queuepulse::serve(&bind, &cli.db, config).await?;
        }
        Commands::Jobs { state, queue, page } => {
            let pool = queuepulse::storage::open_pool(&cli.db)?;
            let service = RecordQueryService::new(pool);

            let filter = RecordFilter::from_params(Some(&state), Some(&queue))?;
            let request = PageRequest::new(page, config.ui.per_page)?;
            let result = service.list_records(&filter, request)?;

            if result.records.is_empty() {
                println!("No job executions found.");
            } else {
                println!(
                    "{:<6} | {:<15} | {:<10} | {:<25} | Elapsed",
                    "ID", "Queue", "State", "Started"
                );
                println!("{:-<6}-|-{:-<15}-|-{:-<10}-|-{:-<25}-|-{:-<8}", "", "", "", "", "");
                for record in &result.records {
                    let elapsed = record
                        .time_elapsed
                        .map(|t| format!("{:.2}s", t))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<6} | {:<15} | {:<10} | {:<25} | {}",
                        record.id,
                        record.queue,
                        format!("{:?}", record.run_state()).to_lowercase(),
                        record.started_at.to_rfc3339(),
                        elapsed
                    );
                }
                println!(
                    "\nPage {} ({} per page), {} total.",
                    result.page, result.per_page, result.total
                );
            }
        }
        Commands::Queues => {
            let pool = queuepulse::storage::open_pool(&cli.db)?;
            let service = RecordQueryService::new(pool);

            let queues = service.distinct_queues()?;
            if queues.is_empty() {
                println!("No queues observed yet.");
            } else {
                for queue in queues {
                    println!("{}", queue);
                }
            }
        }
        Commands::Metrics { window_days } => {
            let pool = queuepulse::storage::open_pool(&cli.db)?;
            let engine = MetricsEngine::new(pool);

            let window_days = window_days.unwrap_or(config.ui.metrics_window_days);
            match engine.compute_metrics(window_days, Utc::now())? {
                Some(report) => {
                    println!("\n=== queuepulse Metrics (last {} days) ===", window_days);
                    for metric in &report.metrics {
                        let delta = match metric.change {
                            PercentageChange::Pct(p) => format!("{:+.0}%", p),
                            PercentageChange::NoBaseline => "no prior data".to_string(),
                        };
                        println!(
                            "{:<25} : {:>10}  (prev {}, {})",
                            metric.label,
                            metric.format.render(metric.current_value),
                            metric.format.render(metric.previous_value),
                            delta
                        );
                    }
                    println!("==========================================\n");
                }
                None => {
                    println!("Not enough data yet for a {}-day window.", window_days);
                }
            }
        }
    }

    Ok(())
}
