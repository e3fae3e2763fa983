use crate::prelude::*;

/// Canonical date pattern of the webhook payload.
const PAYLOAD_DATE: &str = "%m/%d/%Y";
/// Pattern emitted by HTML date inputs.
const INPUT_DATE: &str = "%Y-%m-%d";

pub fn format_date(date: Date) -> String {
  date.format(PAYLOAD_DATE).to_string()
}

/// Parses either the payload pattern or the input pattern.
pub fn parse_date(text: &str) -> Option<Date> {
  let text = text.trim();
  Date::parse_from_str(text, PAYLOAD_DATE)
    .or_else(|_| Date::parse_from_str(text, INPUT_DATE))
    .ok()
}

pub fn is_blank(text: &str) -> bool {
  text.trim().is_empty()
}

/// Truncates `text` to at most `max` characters.
pub fn clamp_chars(text: &mut String, max: usize) {
  if let Some((idx, _)) = text.char_indices().nth(max) {
    text.truncate(idx);
  }
}

/// Drops repeated selections, keeping the first occurrence of each.
pub fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
  let mut out = Vec::with_capacity(items.len());
  for item in items {
    if !out.contains(&item) {
      out.push(item);
    }
  }
  out
}

/// Optional dates as the rendering surface sends them: blank means absent.
pub mod form_date {
  use serde::{Deserialize, Deserializer, Serializer, de};

  use super::{INPUT_DATE, parse_date};
  use crate::prelude::Date;

  pub fn serialize<S: Serializer>(
    date: &Option<Date>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match date {
      Some(date) => {
        serializer.collect_str(&date.format(INPUT_DATE))
      }
      None => serializer.serialize_str(""),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<Date>, D::Error> {
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
      return Ok(None);
    };
    if super::is_blank(&text) {
      return Ok(None);
    }
    parse_date(&text)
      .map(Some)
      .ok_or_else(|| de::Error::custom(format!("invalid date `{text}`")))
  }
}

/// Reads `null` as the type's empty value.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: serde::Deserializer<'de>,
  T: serde::Deserialize<'de> + Default,
{
  use serde::Deserialize;

  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reads `null` and blank strings (a select's placeholder) as `None`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: serde::Deserializer<'de>,
  T: serde::de::DeserializeOwned,
{
  use serde::{Deserialize, de};

  match json::Value::deserialize(deserializer)? {
    json::Value::Null => Ok(None),
    json::Value::String(text) if is_blank(&text) => Ok(None),
    value => json::from_value(value).map(Some).map_err(de::Error::custom),
  }
}

/// Accepts a JSON string or number and keeps its textual form.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: serde::Deserializer<'de>,
{
  use serde::{Deserialize, de};

  match json::Value::deserialize(deserializer)? {
    json::Value::Null => Ok(String::new()),
    json::Value::String(text) => Ok(text),
    json::Value::Number(number) => Ok(number.to_string()),
    other => Err(de::Error::custom(format!(
      "expected a string or a number, got {other}"
    ))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_date() {
    let date = Date::from_ymd_opt(2024, 6, 1).unwrap();
    assert_eq!(format_date(date), "06/01/2024");
  }

  #[test]
  fn test_formatted_date_parses_back() {
    let mut date = Date::from_ymd_opt(1999, 12, 25).unwrap();
    for _ in 0..400 {
      assert_eq!(parse_date(&format_date(date)), Some(date));
      date = date.succ_opt().unwrap();
    }
  }

  #[test]
  fn test_parse_input_pattern() {
    assert_eq!(parse_date("2024-05-01"), Date::from_ymd_opt(2024, 5, 1));
    assert_eq!(parse_date(" 05/01/2024 "), Date::from_ymd_opt(2024, 5, 1));
    assert_eq!(parse_date("01.05.2024"), None);
    assert_eq!(parse_date(""), None);
  }

  #[test]
  fn test_clamp_chars() {
    let mut text = String::from("héllo wörld");
    clamp_chars(&mut text, 7);
    assert_eq!(text, "héllo w");

    let mut short = String::from("abc");
    clamp_chars(&mut short, 60);
    assert_eq!(short, "abc");
  }

  #[test]
  fn test_dedup_keeps_first_order() {
    assert_eq!(dedup(vec!["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
  }

  #[test]
  fn test_blank() {
    assert!(is_blank(""));
    assert!(is_blank("  \t"));
    assert!(!is_blank(" x "));
  }
}
