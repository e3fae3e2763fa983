pub use std::time::Duration;

pub use anyhow::Context;
pub use async_trait::async_trait;
pub use chrono::{NaiveDate as Date, NaiveDateTime as DateTime, Utc};
pub use dashmap::DashMap;
pub use tokio::time;
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result, Transmission};
pub(crate) use crate::utils;
