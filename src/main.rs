use anyhow::Result;
use clap::{Parser, Subcommand};
use foodshared::{config::AppConfig, rest, storage::Storage, AppContext};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "foodshared",
    about = "Food Share backend — donation, partnership, and food-safety chat API",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port
    #[arg(long, env = "FOODSHARE_PORT")]
    port: Option<u16>,

    /// Data directory for config and the embedded database
    #[arg(long, env = "FOODSHARE_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FOODSHARE_LOG")]
    log: Option<String>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "FOODSHARE_BIND")]
    bind_address: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "FOODSHARE_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server (default when no subcommand given).
    Serve,
    /// Create the database and bring its schema up to date, then exit.
    ///
    /// Opening the store runs any pending migrations, so this is also safe
    /// against an existing database.
    SetupDb,
    /// Insert the demo partners and partnerships, then exit.
    ///
    /// Safe to re-run: existing sample rows are left alone.
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Arc::new(AppConfig::new(
        args.port,
        args.data_dir,
        args.log,
        args.bind_address,
    ));

    let _log_guard = setup_logging(&config.log, args.log_file.as_deref(), &config.log_format);

    let storage = match &config.database_url {
        Some(url) => {
            Storage::connect(url, config.observability.slow_query_threshold_ms).await?
        }
        None => {
            Storage::new_with_slow_query(
                &config.data_dir,
                config.observability.slow_query_threshold_ms,
            )
            .await?
        }
    };
    let storage = Arc::new(storage);

    match args.command {
        Some(Command::SetupDb) => {
            // Migrations already ran when the storage opened above; reaching
            // here means the schema is in place.
            storage.health_check().await?;
            info!("Database schema is up to date");
        }
        Some(Command::Seed) => {
            storage.seed_sample_data().await?;
            info!("Sample data seeded");
        }
        None | Some(Command::Serve) => {
            let ctx = Arc::new(AppContext::new(config, storage));
            rest::serve(ctx).await?;
        }
    }

    Ok(())
}

/// Initialise tracing: env-filter level, compact or JSON format, and an
/// optional daily-rolling log file alongside stdout.
///
/// Returns the appender guard that must stay alive for the process lifetime.
/// An unwritable log path falls back to stdout-only logging rather than
/// failing startup.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    let file_writer = log_file.and_then(|path| {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("foodshared.log"));
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            return None;
        }
        let appender = tracing_appender::rolling::daily(dir, filename);
        Some(tracing_appender::non_blocking(appender))
    });

    match file_writer {
        Some((non_blocking, guard)) => {
            if use_json {
                tracing_subscriber::registry()
                    .with(EnvFilter::new(log_level))
                    .with(fmt::layer().json())
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(EnvFilter::new(log_level))
                    .with(fmt::layer().compact())
                    .with(fmt::layer().with_writer(non_blocking))
                    .init();
            }
            Some(guard)
        }
        None => {
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            None
        }
    }
}
