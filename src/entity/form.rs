use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ActivationChannel, PromotionType, StoreName, TargetAudience};
use crate::prelude::*;

pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Form fields that must be filled before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  PromoName,
  StartDate,
  EndDate,
  DisplayStartDate,
  DisplayEndDate,
  Title,
  BodyCopy,
  Assets,
  TermsConditions,
  TargetAudience,
  StoreName,
  PromotionType,
}

impl Field {
  /// Fields that must hold a value before a promotion can be submitted,
  /// in the order they are reported.
  pub const REQUIRED: [Field; 12] = [
    Field::PromoName,
    Field::StartDate,
    Field::EndDate,
    Field::DisplayStartDate,
    Field::DisplayEndDate,
    Field::Title,
    Field::BodyCopy,
    Field::Assets,
    Field::TermsConditions,
    Field::TargetAudience,
    Field::StoreName,
    Field::PromotionType,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Field::PromoName => "Promo Name",
      Field::StartDate => "Start Date",
      Field::EndDate => "End Date",
      Field::DisplayStartDate => "Display Start Date",
      Field::DisplayEndDate => "Display End Date",
      Field::Title => "Title",
      Field::BodyCopy => "Body Copy",
      Field::Assets => "Assets",
      Field::TermsConditions => "Terms & Conditions",
      Field::TargetAudience => "Target Audience",
      Field::StoreName => "Store Name",
      Field::PromotionType => "Promotion Type",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Raw values entered by the operator, keyed like the webhook document.
///
/// Every field is optional on the wire; missing keys fall back to empty
/// values so an incomplete draft can be stored and validated later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PromotionForm {
  #[serde(deserialize_with = "utils::null_default")]
  pub promo_name: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub coupon_code: String,
  #[serde(with = "utils::form_date")]
  pub start_date: Option<Date>,
  #[serde(with = "utils::form_date")]
  pub end_date: Option<Date>,
  #[serde(with = "utils::form_date")]
  pub display_start_date: Option<Date>,
  #[serde(with = "utils::form_date")]
  pub display_end_date: Option<Date>,
  #[serde(deserialize_with = "utils::null_default")]
  pub title: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub description: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub body_copy: String,
  #[serde(rename = "CTA", deserialize_with = "utils::null_default")]
  pub cta: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub link: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub assets: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub terms_conditions: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub target_audience: Vec<TargetAudience>,
  #[serde(deserialize_with = "utils::string_or_number")]
  pub discount_rate: String,
  #[serde(deserialize_with = "utils::null_default")]
  pub store_name: Vec<StoreName>,
  #[serde(deserialize_with = "utils::null_default")]
  pub applicable_products: Vec<String>,
  #[serde(deserialize_with = "utils::blank_as_none")]
  pub promotion_type: Option<PromotionType>,
  #[serde(deserialize_with = "utils::null_default")]
  pub is_finalized: bool,
  #[serde(deserialize_with = "utils::null_default")]
  pub activation_channel: Vec<ActivationChannel>,
  #[serde(with = "utils::form_date")]
  pub extended_end_date: Option<Date>,
}

impl PromotionForm {
  /// Applies the input limits of the form widgets.
  pub fn normalize(mut self) -> Self {
    utils::clamp_chars(&mut self.title, TITLE_MAX_CHARS);
    utils::clamp_chars(&mut self.description, DESCRIPTION_MAX_CHARS);

    // the link input only exists next to a call to action
    if utils::is_blank(&self.cta) {
      self.link.clear();
    }

    self.target_audience = utils::dedup(self.target_audience);
    self.store_name = utils::dedup(self.store_name);
    self.applicable_products = utils::dedup(self.applicable_products);
    self.activation_channel = utils::dedup(self.activation_channel);
    self
  }

  /// Whether the operator left `field` empty.
  pub fn is_missing(&self, field: Field) -> bool {
    match field {
      Field::PromoName => utils::is_blank(&self.promo_name),
      Field::StartDate => self.start_date.is_none(),
      Field::EndDate => self.end_date.is_none(),
      Field::DisplayStartDate => self.display_start_date.is_none(),
      Field::DisplayEndDate => self.display_end_date.is_none(),
      Field::Title => utils::is_blank(&self.title),
      Field::BodyCopy => utils::is_blank(&self.body_copy),
      Field::Assets => utils::is_blank(&self.assets),
      Field::TermsConditions => utils::is_blank(&self.terms_conditions),
      Field::TargetAudience => self.target_audience.is_empty(),
      Field::StoreName => self.store_name.is_empty(),
      Field::PromotionType => self.promotion_type.is_none(),
    }
  }
}
