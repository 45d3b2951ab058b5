//! Main entry point for Tommy Johns.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tommyjohns_common::{init_default_logging, init_logging, LoggingConfig};
use tommyjohns_config::ConfigLoader;
use tommyjohns_web::app;
use tommyjohns_web::cli::{Cli, Command};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet; report through the defaults
            init_default_logging().map_err(|e| anyhow::anyhow!(e))?;
            error!("{}", e);
            return Err(e.into());
        }
    };

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging(LoggingConfig::from(&config.logging)).map_err(|e| anyhow::anyhow!(e))?;

    info!("Starting Tommy Johns v{}", env!("CARGO_PKG_VERSION"));
    let config = Arc::new(config);

    let result = match cli.command_or_default() {
        Command::Serve => app::serve(Arc::clone(&config)).await,
        Command::BuildCharts => app::build_charts(&config).await.map(|_| ()),
        Command::InitDb => app::init_db(&config).await.map(|_| ()),
        Command::ImportSheet { sheet_id, range } => {
            app::import_sheet(&config, sheet_id, range).await
        }
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
