use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ActivationChannel, PromotionType, StoreName, TargetAudience};
use crate::prelude::*;

/// Status every new promotion starts in.
pub const INITIAL_STATUS: &str = "Upcoming";

const ID_PREFIX: &str = "PMH";
const ID_DIGITS: u32 = 7;

/// System-assigned identifier: `PMH` followed by seven decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromotionId(String);

impl PromotionId {
  /// Derives a fresh id from a random v4 uuid. Ids are never reused.
  pub fn generate() -> Self {
    let token = Uuid::new_v4().as_u128() % 10u128.pow(ID_DIGITS);
    Self(format!("{ID_PREFIX}{token:0width$}", width = ID_DIGITS as usize))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for PromotionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A promotion that passed validation. Required fields are guaranteed set.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
  pub promo_name: String,
  pub coupon_code: String,
  pub start_date: Date,
  pub end_date: Date,
  pub display_start_date: Date,
  pub display_end_date: Date,
  pub title: String,
  pub description: String,
  pub body_copy: String,
  pub cta: String,
  pub link: String,
  pub assets: String,
  pub terms_conditions: String,
  pub target_audience: Vec<TargetAudience>,
  pub discount_rate: String,
  pub store_name: Vec<StoreName>,
  pub applicable_products: Vec<String>,
  pub promotion_type: PromotionType,
  pub is_finalized: bool,
  pub activation_channel: Vec<ActivationChannel>,
  pub extended_end_date: Option<Date>,
}

/// Flat document posted to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payload {
  #[serde(rename = "PromotionID")]
  pub promotion_id: PromotionId,
  pub promo_name: String,
  pub coupon_code: String,
  pub start_date: String,
  pub end_date: String,
  pub display_start_date: String,
  pub display_end_date: String,
  pub description: String,
  pub title: String,
  pub body_copy: String,
  #[serde(rename = "CTA")]
  pub cta: String,
  pub link: String,
  pub assets: String,
  pub terms_conditions: String,
  pub target_audience: Vec<TargetAudience>,
  pub discount_rate: String,
  pub status: String,
  pub store_name: Vec<StoreName>,
  pub applicable_products: Vec<String>,
  pub promotion_type: PromotionType,
  pub is_finalized: bool,
  pub activation_channel: Vec<ActivationChannel>,
  pub extended_end_date: String,
}

impl Payload {
  pub fn new(promotion_id: PromotionId, promotion: &Promotion) -> Self {
    let Promotion {
      promo_name,
      coupon_code,
      start_date,
      end_date,
      display_start_date,
      display_end_date,
      title,
      description,
      body_copy,
      cta,
      link,
      assets,
      terms_conditions,
      target_audience,
      discount_rate,
      store_name,
      applicable_products,
      promotion_type,
      is_finalized,
      activation_channel,
      extended_end_date,
    } = promotion.clone();

    Self {
      promotion_id,
      promo_name,
      coupon_code,
      start_date: utils::format_date(start_date),
      end_date: utils::format_date(end_date),
      display_start_date: utils::format_date(display_start_date),
      display_end_date: utils::format_date(display_end_date),
      description,
      title,
      body_copy,
      cta,
      link,
      assets,
      terms_conditions,
      target_audience,
      discount_rate,
      status: INITIAL_STATUS.to_string(),
      store_name,
      applicable_products,
      promotion_type,
      is_finalized,
      activation_channel,
      extended_end_date: extended_end_date
        .map(utils::format_date)
        .unwrap_or_default(),
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub fn promotion() -> Promotion {
    Promotion {
      promo_name: "Summer Sale".into(),
      coupon_code: String::new(),
      start_date: Date::from_ymd_opt(2024, 6, 1).unwrap(),
      end_date: Date::from_ymd_opt(2024, 6, 30).unwrap(),
      display_start_date: Date::from_ymd_opt(2024, 5, 25).unwrap(),
      display_end_date: Date::from_ymd_opt(2024, 6, 30).unwrap(),
      title: "Save big this summer".into(),
      description: String::new(),
      body_copy: "Up to 30% off selected appliances.".into(),
      cta: String::new(),
      link: String::new(),
      assets: "https://cdn.example.com/summer.png".into(),
      terms_conditions: "While supplies last.".into(),
      target_audience: vec![TargetAudience::AllCustomers],
      discount_rate: "30".into(),
      store_name: vec![StoreName::Obs],
      applicable_products: Vec::new(),
      promotion_type: PromotionType::SingleProductInstantDiscount,
      is_finalized: true,
      activation_channel: vec![ActivationChannel::EmailMarketing],
      extended_end_date: None,
    }
  }

  #[test]
  fn test_generate_id_format() {
    for _ in 0..100 {
      let id = PromotionId::generate();
      let digits = id.as_str().strip_prefix("PMH").unwrap();
      assert_eq!(digits.len(), 7);
      assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
  }

  #[test]
  fn test_generate_id_unique() {
    assert_ne!(PromotionId::generate(), PromotionId::generate());
  }

  #[test]
  fn test_payload_keys() {
    let payload = Payload::new(PromotionId::generate(), &promotion());
    let value = json::to_value(&payload).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
      keys,
      vec![
        "ActivationChannel",
        "ApplicableProducts",
        "Assets",
        "BodyCopy",
        "CTA",
        "CouponCode",
        "Description",
        "DiscountRate",
        "DisplayEndDate",
        "DisplayStartDate",
        "EndDate",
        "ExtendedEndDate",
        "IsFinalized",
        "Link",
        "PromoName",
        "PromotionID",
        "PromotionType",
        "StartDate",
        "Status",
        "StoreName",
        "TargetAudience",
        "TermsConditions",
        "Title",
      ]
    );

    assert_eq!(object["StartDate"], "06/01/2024");
    assert_eq!(object["DisplayStartDate"], "05/25/2024");
    assert_eq!(object["ExtendedEndDate"], "");
    assert_eq!(object["Status"], "Upcoming");
    assert_eq!(object["TargetAudience"], json::json!(["All Customers"]));
    assert_eq!(object["PromotionType"], "Single product instant discount");
    assert_eq!(object["IsFinalized"], true);
  }

  #[test]
  fn test_payload_extended_end_date() {
    let promotion = Promotion {
      extended_end_date: Date::from_ymd_opt(2024, 7, 15),
      ..promotion()
    };

    let payload = Payload::new(PromotionId::generate(), &promotion);
    assert_eq!(payload.extended_end_date, "07/15/2024");
  }
}
