use reqwest::{Client, StatusCode};

use crate::{
  entity::{Payload, Promotion, PromotionId},
  prelude::*,
};

/// Posts validated promotions to the automation webhook.
pub struct Dispatcher<'a> {
  client: &'a Client,
  url: &'a str,
}

impl<'a> Dispatcher<'a> {
  pub fn new(client: &'a Client, url: &'a str) -> Self {
    Self { client, url }
  }

  /// Sends `promotion` under a freshly generated id.
  ///
  /// Only `200 OK` counts as delivered. There is no retry: a failed call
  /// surfaces the status and resubmitting creates a new id.
  pub async fn dispatch(&self, promotion: &Promotion) -> Result<PromotionId> {
    let id = PromotionId::generate();
    let payload = Payload::new(id.clone(), promotion);

    debug!("Posting promotion {id} to webhook");

    let response = self
      .client
      .post(self.url)
      .json(&payload)
      .send()
      .await
      .map_err(Transmission::from)?;

    let status = response.status();
    if status != StatusCode::OK {
      warn!("Webhook rejected promotion {id} with status {status}");
      return Err(Transmission::Rejected(status.as_u16()).into());
    }

    info!("Promotion {id} submitted");
    Ok(id)
  }
}
