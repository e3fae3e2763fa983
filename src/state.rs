use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{PromotionForm, PromotionId},
  prelude::*,
  sv,
};

pub const DEFAULT_WEBHOOK_URL: &str =
  "https://hooks.zapier.com/hooks/catch/9480052/2197ir5/";

/// Page shown to the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
  #[default]
  Form,
  List,
}

/// One operator's interactive state.
#[derive(Debug, Clone)]
pub struct Session {
  pub view: View,
  /// Last values entered on the form, kept so a failed submit can be retried.
  pub draft: PromotionForm,
  pub last_seen: DateTime,
}

impl Session {
  fn new(now: DateTime) -> Self {
    Self { view: View::Form, draft: PromotionForm::default(), last_seen: now }
  }
}

pub type Sessions = DashMap<Uuid, Session>;

#[derive(Debug, Clone)]
pub struct Config {
  pub webhook_url: String,
  pub webhook_timeout: Duration,
  /// Externally hosted dashboard embedded by the list page.
  pub list_view_url: String,
  /// Seconds of inactivity before a session is dropped.
  pub session_lifetime: i64,
  pub port: u16,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      webhook_url: DEFAULT_WEBHOOK_URL.into(),
      webhook_timeout: Duration::from_secs(15),
      list_view_url: String::new(),

      session_lifetime: 3600,
      port: 3000,
    }
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_vars(|key| env::var(key).ok())
  }

  /// Builds the config from `lookup`, falling back to defaults for unset keys.
  pub fn from_vars(
    lookup: impl Fn(&str) -> Option<String>,
  ) -> anyhow::Result<Self> {
    let mut config = Self::default();

    if let Some(url) = lookup("WEBHOOK_URL") {
      config.webhook_url = url;
    }
    if let Some(timeout) = lookup("WEBHOOK_TIMEOUT") {
      config.webhook_timeout = humantime::parse_duration(timeout.trim())
        .with_context(|| format!("Invalid WEBHOOK_TIMEOUT `{timeout}`"))?;
    }
    if let Some(url) = lookup("LIST_VIEW_URL") {
      config.list_view_url = url;
    }
    if let Some(lifetime) = lookup("SESSION_LIFETIME") {
      config.session_lifetime = lifetime
        .trim()
        .parse()
        .with_context(|| format!("Invalid SESSION_LIFETIME `{lifetime}`"))?;
    }
    if let Some(port) = lookup("PORT") {
      config.port =
        port.trim().parse().with_context(|| format!("Invalid PORT `{port}`"))?;
    }

    Ok(config)
  }
}

pub struct Services<'a> {
  pub dispatcher: sv::Dispatcher<'a>,
}

pub struct AppState {
  pub http: Client,
  pub sessions: Sessions,
  pub config: Config,
}

impl AppState {
  pub fn new(config: Config) -> anyhow::Result<Self> {
    let http = Client::builder()
      .timeout(config.webhook_timeout)
      .build()
      .context("Failed to build webhook client")?;

    info!(
      "Webhook: {} (timeout {})",
      config.webhook_url,
      humantime::format_duration(config.webhook_timeout)
    );

    Ok(Self { http, sessions: DashMap::new(), config })
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      dispatcher: sv::Dispatcher::new(&self.http, &self.config.webhook_url),
    }
  }

  pub fn open_session(&self) -> (Uuid, Session) {
    let id = Uuid::new_v4();
    let session = Session::new(Utc::now().naive_utc());
    self.sessions.insert(id, session.clone());
    debug!("Session {id} opened");
    (id, session)
  }

  /// Runs `f` on a live session and refreshes its activity stamp.
  pub fn with_session<R>(
    &self,
    id: Uuid,
    f: impl FnOnce(&mut Session) -> R,
  ) -> Result<R> {
    let mut session =
      self.sessions.get_mut(&id).ok_or(Error::SessionNotFound)?;
    session.last_seen = Utc::now().naive_utc();
    Ok(f(session.value_mut()))
  }

  /// Validates and dispatches `form` for session `id`.
  ///
  /// The draft is kept on any failure. On success it is cleared and the
  /// session moves to the list view; once the webhook accepted the record
  /// the submit counts as done even if the session is gone by then.
  pub async fn submit(
    &self,
    id: Uuid,
    form: PromotionForm,
  ) -> Result<PromotionId> {
    let form = form.normalize();
    self.with_session(id, |session| session.draft = form.clone())?;

    let promotion = sv::Validator::validate(form).inspect_err(|err| {
      debug!("Session {id} submit blocked: {err}");
    })?;

    let promotion_id = self.sv().dispatcher.dispatch(&promotion).await?;

    let moved = self.with_session(id, |session| {
      session.draft = PromotionForm::default();
      session.view = View::List;
    });
    if let Err(err) = moved {
      warn!("Promotion {promotion_id} sent but session {id} is gone: {err}");
    }

    Ok(promotion_id)
  }

  pub fn gc_sessions(&self) {
    let now = Utc::now().naive_utc();
    let timeout = self.config.session_lifetime;

    let before = self.sessions.len();
    self.sessions.retain(|_id, s| (now - s.last_seen).num_seconds() < timeout);

    let dropped = before.saturating_sub(self.sessions.len());
    if dropped > 0 {
      debug!("Dropped {dropped} idle sessions");
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, OnceLock};

  use axum::{Router, http::StatusCode, routing::post};
  use chrono::TimeDelta;

  use super::*;
  use crate::{
    entity::Field,
    sv::{dispatcher::tests::spawn_webhook, validator::tests::complete_form},
  };

  fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key: &str| map.get(key).cloned()
  }

  fn state(webhook_url: String) -> AppState {
    AppState::new(Config { webhook_url, ..Config::default() }).unwrap()
  }

  #[tokio::test]
  async fn test_submit_success_moves_to_list() {
    let (url, received) = spawn_webhook(StatusCode::OK).await;
    let app = state(url);
    let (id, _) = app.open_session();

    let promotion_id = app.submit(id, complete_form()).await.unwrap();

    let session = app.sessions.get(&id).unwrap();
    assert_eq!(session.view, View::List);
    assert_eq!(session.draft, PromotionForm::default());

    let received = received.lock().unwrap();
    assert_eq!(received[0]["PromotionID"], promotion_id.as_str());
    assert_eq!(received[0]["ExtendedEndDate"], "");
  }

  #[tokio::test]
  async fn test_submit_validation_skips_webhook() {
    let (url, received) = spawn_webhook(StatusCode::OK).await;
    let app = state(url);
    let (id, _) = app.open_session();

    let form = PromotionForm { promo_name: String::new(), ..complete_form() };
    let res = app.submit(id, form.clone()).await;

    let Err(Error::Validation(violations)) = res else {
      panic!("expected a validation error");
    };
    assert_eq!(violations.labels(), vec![Field::PromoName.label()]);
    assert!(received.lock().unwrap().is_empty());

    let session = app.sessions.get(&id).unwrap();
    assert_eq!(session.view, View::Form);
    assert_eq!(session.draft, form);
  }

  #[tokio::test]
  async fn test_submit_rejected_keeps_draft() {
    let (url, _) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
    let app = state(url);
    let (id, _) = app.open_session();

    let res = app.submit(id, complete_form()).await;

    let Err(Error::Transmission(err)) = res else {
      panic!("expected a transmission error");
    };
    assert_eq!(err.status(), Some(500));

    let session = app.sessions.get(&id).unwrap();
    assert_eq!(session.view, View::Form);
    assert_eq!(session.draft, complete_form());
  }

  #[tokio::test]
  async fn test_submit_unknown_session() {
    let app = state(DEFAULT_WEBHOOK_URL.into());

    let res = app.submit(Uuid::new_v4(), complete_form()).await;
    assert!(matches!(res, Err(Error::SessionNotFound)));
  }

  #[test]
  fn test_config_defaults() {
    let config = Config::from_vars(vars(&[])).unwrap();

    assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
    assert_eq!(config.webhook_timeout, Duration::from_secs(15));
    assert_eq!(config.port, 3000);
  }

  #[test]
  fn test_config_parses_vars() {
    let config = Config::from_vars(vars(&[
      ("WEBHOOK_URL", "http://localhost:9000/hook"),
      ("WEBHOOK_TIMEOUT", "2s"),
      ("LIST_VIEW_URL", "https://dashboard.example.com"),
      ("SESSION_LIFETIME", "120"),
      ("PORT", "8080"),
    ]))
    .unwrap();

    assert_eq!(config.webhook_url, "http://localhost:9000/hook");
    assert_eq!(config.webhook_timeout, Duration::from_secs(2));
    assert_eq!(config.list_view_url, "https://dashboard.example.com");
    assert_eq!(config.session_lifetime, 120);
    assert_eq!(config.port, 8080);
  }

  #[test]
  fn test_config_rejects_invalid_vars() {
    let err = Config::from_vars(vars(&[("WEBHOOK_TIMEOUT", "abc")]));
    assert!(err.unwrap_err().to_string().contains("WEBHOOK_TIMEOUT"));

    let err = Config::from_vars(vars(&[("PORT", "x")]));
    assert!(err.unwrap_err().to_string().contains("PORT"));

    assert!(Config::from_vars(vars(&[("SESSION_LIFETIME", "soon")])).is_err());
  }

  #[tokio::test]
  async fn test_webhook_timeout_is_transport_failure() {
    let router = Router::new().route(
      "/hook",
      post(|| async {
        time::sleep(Duration::from_secs(5)).await;
        StatusCode::OK
      }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });

    let app = AppState::new(Config {
      webhook_url: format!("http://{addr}/hook"),
      webhook_timeout: Duration::from_millis(200),
      ..Config::default()
    })
    .unwrap();
    let (id, _) = app.open_session();

    let res = app.submit(id, complete_form()).await;

    let Err(Error::Transmission(err)) = res else {
      panic!("expected a transmission error");
    };
    assert!(matches!(err, Transmission::Transport(_)));
    assert_eq!(err.status(), None);
    assert_eq!(app.sessions.get(&id).unwrap().draft, complete_form());
  }

  #[tokio::test]
  async fn test_submit_succeeds_when_session_dropped_mid_flight() {
    let target: Arc<OnceLock<(Arc<AppState>, Uuid)>> = Arc::default();

    let router = Router::new().route(
      "/hook",
      post({
        let target = target.clone();
        move || {
          let target = target.clone();
          async move {
            if let Some((app, id)) = target.get() {
              app.sessions.remove(id);
            }
            StatusCode::OK
          }
        }
      }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });

    let app = Arc::new(state(format!("http://{addr}/hook")));
    let (id, _) = app.open_session();
    target.set((app.clone(), id)).ok();

    let promotion_id = app.submit(id, complete_form()).await.unwrap();

    assert!(promotion_id.as_str().starts_with("PMH"));
    assert!(!app.sessions.contains_key(&id));
  }

  #[test]
  fn test_gc_sessions() {
    let app = AppState::new(Config {
      session_lifetime: 60,
      ..Config::default()
    })
    .unwrap();

    let (fresh, _) = app.open_session();
    let (stale, _) = app.open_session();
    app.sessions.get_mut(&stale).unwrap().last_seen -= TimeDelta::minutes(5);

    app.gc_sessions();

    assert!(app.sessions.contains_key(&fresh));
    assert!(!app.sessions.contains_key(&stale));
  }
}
