use crate::{
  entity::{Field, Promotion, PromotionForm, Violation, Violations},
  prelude::*,
};

pub struct Validator;

impl Validator {
  /// Collects every reason `form` cannot be submitted, date order first.
  pub fn violations(form: &PromotionForm) -> Violations {
    let mut violations = Violations::default();

    if let Some(extended) = form.extended_end_date
      && let Some(end) = form.end_date
      && extended < end
    {
      violations.push(Violation::ExtendedBeforeEnd);
    }

    for field in Field::REQUIRED {
      if form.is_missing(field) {
        violations.push(Violation::Missing(field));
      }
    }

    violations
  }

  pub fn validate(form: PromotionForm) -> Result<Promotion> {
    let violations = Self::violations(&form);
    if !violations.is_empty() {
      return Err(Error::Validation(violations));
    }

    let PromotionForm {
      promo_name,
      coupon_code,
      start_date: Some(start_date),
      end_date: Some(end_date),
      display_start_date: Some(display_start_date),
      display_end_date: Some(display_end_date),
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
      promotion_type: Some(promotion_type),
      is_finalized,
      activation_channel,
      extended_end_date,
    } = form
    else {
      return Err(Error::Internal("validated form lost a required value".into()));
    };

    Ok(Promotion {
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
    })
  }
}
