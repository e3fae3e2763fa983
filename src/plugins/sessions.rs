use std::sync::Arc;

use crate::{prelude::*, state::AppState};

/// Drops sessions whose operator went idle.
pub struct Collector;

#[async_trait]
impl super::Plugin for Collector {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let mut interval = time::interval(Duration::from_secs(60));
    loop {
      interval.tick().await;
      app.gc_sessions();
    }
  }
}
