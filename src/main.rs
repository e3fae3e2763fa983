//! Promotion Management Hub - intake service for marketing promotions
//!
//! Architecture:
//! - Axum for the HTTP API behind the promotion form
//! - Reqwest for forwarding validated promotions to the automation webhook
//! - Tokio for async runtime

mod entity;
mod error;
mod plugins;
mod prelude;
mod state;
mod sv;
mod utils;

use std::sync::Arc;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  plugins::{App, server, sessions},
  prelude::*,
  state::{AppState, Config},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "promo_hub=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env()?;

  info!("Starting Promotion Management Hub v{}", env!("CARGO_PKG_VERSION"));

  let app = Arc::new(AppState::new(config)?);

  App::new()
    .register(server::Plugin)
    .register(sessions::Collector)
    .run(app);

  tokio::signal::ctrl_c().await.context("Failed to listen for ctrl-c")?;
  info!("Shutting down");

  Ok(())
}
