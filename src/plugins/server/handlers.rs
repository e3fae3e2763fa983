use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{
    ActivationChannel, INITIAL_STATUS, PromotionForm, PromotionId,
    PromotionType, StoreName, TargetAudience,
  },
  prelude::*,
  state::{AppState, Session, View},
};

#[derive(Debug, Serialize)]
pub struct SessionRes {
  pub session_id: Uuid,
  pub view: View,
  pub draft: PromotionForm,
  pub list_view_url: String,
}

impl SessionRes {
  fn new(app: &AppState, session_id: Uuid, session: &Session) -> Self {
    Self {
      session_id,
      view: session.view,
      draft: session.draft.clone(),
      list_view_url: app.config.list_view_url.clone(),
    }
  }
}

/// Choices for every select on the form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionsRes {
  pub target_audience: &'static [TargetAudience],
  pub store_name: &'static [StoreName],
  pub promotion_type: &'static [PromotionType],
  pub activation_channel: &'static [ActivationChannel],
  pub status: &'static str,
}

pub async fn health() -> &'static str {
  "OK"
}

pub async fn options() -> Json<OptionsRes> {
  Json(OptionsRes {
    target_audience: TargetAudience::ALL,
    store_name: StoreName::ALL,
    promotion_type: PromotionType::ALL,
    activation_channel: ActivationChannel::ALL,
    status: INITIAL_STATUS,
  })
}

pub async fn open_session(State(app): State<Arc<AppState>>) -> Json<SessionRes> {
  let (id, session) = app.open_session();
  Json(SessionRes::new(&app, id, &session))
}

pub async fn session(
  State(app): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionRes>> {
  let res = app.with_session(id, |session| SessionRes::new(&app, id, session))?;
  Ok(Json(res))
}

pub async fn save_draft(
  State(app): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(form): Json<PromotionForm>,
) -> Result<Json<SessionRes>> {
  let form = form.normalize();
  let res = app.with_session(id, |session| {
    session.draft = form;
    SessionRes::new(&app, id, session)
  })?;
  Ok(Json(res))
}

#[derive(Debug, Deserialize)]
pub struct ViewReq {
  pub view: View,
}

pub async fn set_view(
  State(app): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(req): Json<ViewReq>,
) -> Result<Json<SessionRes>> {
  let res = app.with_session(id, |session| {
    session.view = req.view;
    SessionRes::new(&app, id, session)
  })?;
  Ok(Json(res))
}

#[derive(Debug, Serialize)]
pub struct SubmitRes {
  pub success: bool,
  pub message: &'static str,
  pub promotion_id: PromotionId,
  pub view: View,
}

pub async fn submit(
  State(app): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(form): Json<PromotionForm>,
) -> Result<Json<SubmitRes>> {
  let promotion_id = app.submit(id, form).await?;

  Ok(Json(SubmitRes {
    success: true,
    message: "Promotion details successfully submitted!",
    promotion_id,
    view: View::List,
  }))
}
