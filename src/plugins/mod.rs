pub mod server;
pub mod sessions;

use std::sync::Arc;

use crate::{prelude::*, state::AppState};

const RESTART_DELAY: Duration = Duration::from_secs(5);

/// Long-running service supervised by [`App`].
#[async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

pub struct App {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self { plugins: Vec::new() }
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Arc::new(plugin));
    self
  }

  pub fn run(self, app: Arc<AppState>) {
    for plugin in self.plugins {
      tokio::spawn(supervise(plugin, app.clone()));
    }
  }
}

/// Keeps `plugin` running, restarting it after it returns, fails or panics.
async fn supervise(plugin: Arc<dyn Plugin>, app: Arc<AppState>) {
  let name = plugin.name();
  info!("Plugin `{name}` started");

  loop {
    let run = tokio::spawn({
      let plugin = plugin.clone();
      let app = app.clone();
      async move { plugin.start(app).await }
    });

    match run.await {
      Ok(Ok(())) => warn!("Plugin `{name}` returned"),
      Ok(Err(err)) => error!("Plugin `{name}` failed: {err:#}"),
      Err(err) => error!("Plugin `{name}` panicked: {err}"),
    }

    time::sleep(RESTART_DELAY).await;
    info!("Restarting plugin `{name}`");
  }
}
