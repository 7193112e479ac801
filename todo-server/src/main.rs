use anyhow::{Context, Result};
use clap::Parser;
use http_api::shutdown_signal;
use todo_server::config::Config;
use todo_server::setup::{ensure_database_directory_from_config, initialize_app};
use todo_server::telemetry::{init_telemetry, log_startup_info, report_error};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo list HTTP service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(ref database_url) = cli.database_url {
        config.database.url = database_url.clone();
    }

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    config.validate().context("Invalid configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    log_startup_info(&config);

    ensure_database_directory_from_config(&config)
        .context("Failed to create database directory")?;

    let server = match initialize_app(&config).await {
        Ok(server) => server,
        Err(e) => {
            report_error(&e, "startup");
            std::process::exit(2);
        }
    };

    let addr = config.server_address();
    info!("Starting todo server on {}", addr);

    match server.serve_with_shutdown(&addr, shutdown_signal()).await {
        Ok(()) => {
            info!("Todo server shut down cleanly");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Todo server error");
            std::process::exit(3);
        }
    }
}
