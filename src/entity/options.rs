//! Fixed option lists offered by the promotion form.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! options {
  (
    $(#[$meta:meta])*
    $name:ident { $($variant:ident => $label:literal,)+ }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum $name {
      $(#[serde(rename = $label)] $variant,)+
    }

    impl $name {
      pub const ALL: &'static [Self] = &[$(Self::$variant),+];

      pub fn label(self) -> &'static str {
        match self {
          $(Self::$variant => $label,)+
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
      }
    }
  };
}

options! {
  TargetAudience {
    AllCustomers => "All Customers",
    NewCustomers => "New Customers",
    ReturningCustomers => "Returning Customers",
  }
}

options! {
  StoreName {
    Obs => "OBS",
    Eos => "EOS",
    Pm => "PM",
    ThinQ => "ThinQ",
  }
}

options! {
  PromotionType {
    PackageRebate => "Product package Rebate",
    PackageInstantDiscount => "Product package instant discount",
    PackageVariableDiscount => "Package with variable discount",
    SingleProductRebate => "Single product rebate",
    SingleProductInstantDiscount => "Single product instant discount",
    ProductBundle => "Product bundle",
    ValueAdd => "Value-add",
    CrossSells => "Cross-sells",
    Upsell => "Upsell",
    AddOns => "Add-ons",
    BuyOneGetOneFree => "Buy one, get one free",
    BuyMoreSaveMore => "Buy more, save more",
    PromoCode => "Promo code",
    Subscriptions => "Subscriptions",
    StoreCredit => "Store Credit",
    RewardsPoints => "Rewards points",
  }
}

options! {
  /// Where the promotion gets pushed to customers.
  ActivationChannel {
    EmailMarketing => "Email Marketing",
    SocialMedia => "Social Media Platforms",
    Sms => "SMS/Text Message",
    AffiliatePartners => "Affiliate Partners",
    Display => "Display",
    OnsiteCms => "Onsite via CMS",
    OnsitePersonalization => "Onsite via Personalization / AB Testing Tool",
    Pla => "PLA",
    Sem => "SEM",
  }
}
