pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod rating;
pub mod services;
pub mod storage;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::seeding::SeedService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_seed() -> Result<()> {
    let config = AppConfig::new();
    let service = SeedService::new(config);
    service.run()
}

pub fn handle_reset() -> Result<()> {
    let config = AppConfig::new();
    let mut ledger = services::open_ledger(&config)?;
    ledger.reset_all()?;
    log::info!(
        "Ledger reset: all ratings back to {}",
        config.rating.initial_rating
    );
    Ok(())
}
