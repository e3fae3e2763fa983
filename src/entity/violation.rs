use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use super::Field;

/// A single reason a promotion cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
  Missing(Field),
  ExtendedBeforeEnd,
}

impl Violation {
  /// Label of the offending field.
  pub fn label(self) -> &'static str {
    match self {
      Violation::Missing(field) => field.label(),
      Violation::ExtendedBeforeEnd => "Extended End Date",
    }
  }
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Violation::Missing(field) => {
        write!(f, "Please fill out the field: {field}")
      }
      Violation::ExtendedBeforeEnd => {
        f.write_str("Extended End Date cannot be earlier than End Date.")
      }
    }
  }
}

impl Serialize for Violation {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Violation", 2)?;
    state.serialize_field("field", self.label())?;
    state.serialize_field("message", &self.to_string())?;
    state.end()
  }
}

/// Ordered violations of one candidate record; empty means submittable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
  pub fn push(&mut self, violation: Violation) {
    self.0.push(violation);
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Labels of the offending fields, in report order.
  pub fn labels(&self) -> Vec<&'static str> {
    self.0.iter().map(|v| v.label()).collect()
  }
}

impl fmt::Display for Violations {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.labels().join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_violation_messages() {
    let missing = Violation::Missing(Field::TermsConditions);
    assert_eq!(
      missing.to_string(),
      "Please fill out the field: Terms & Conditions"
    );
    assert_eq!(Violation::ExtendedBeforeEnd.label(), "Extended End Date");
  }

  #[test]
  fn test_serialize_violations() {
    let mut violations = Violations::default();
    violations.push(Violation::ExtendedBeforeEnd);
    violations.push(Violation::Missing(Field::Title));

    assert_eq!(violations.to_string(), "Extended End Date, Title");
    assert_eq!(
      json::to_value(&violations).unwrap(),
      json::json!([
        {
          "field": "Extended End Date",
          "message": "Extended End Date cannot be earlier than End Date.",
        },
        { "field": "Title", "message": "Please fill out the field: Title" },
      ])
    );
  }
}
