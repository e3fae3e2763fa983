pub mod form;
pub mod options;
pub mod promotion;
pub mod violation;

pub use form::{Field, PromotionForm};
pub use options::{
  ActivationChannel, PromotionType, StoreName, TargetAudience,
};
pub use promotion::{INITIAL_STATUS, Payload, Promotion, PromotionId};
pub use violation::{Violation, Violations};
