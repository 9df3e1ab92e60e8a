pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod services;
pub mod stats;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_ingest() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = IngestionService::new(AppConfig::from_env())?;
        service.run().await?;
        Ok(())
    })
}

pub fn handle_process(top: Option<usize>) -> Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(top) = top {
        config.display.top_n = top;
    }
    let service = ProcessingService::new(config)?;
    service.run()?;
    Ok(())
}

pub fn handle_reset() -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::create_pool(&config.storage.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::reset_database(&mut conn)?;
    info!("Reset {}", config.storage.database_path);
    Ok(())
}
