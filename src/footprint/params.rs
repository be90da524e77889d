//! Raw parameter lookup and numeric coercion.
//!
//! Parameters arrive as string-keyed, string-valued pairs scraped from a
//! datasheet. The producer does not normalise key names, so every field is
//! declared once as a [`ParamField`] listing its primary key followed by the
//! legacy aliases it may appear under. The first key present wins.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::footprint::error::{Reason, ValidationError};

/// Raw parameter mapping, in the order the producer supplied it.
pub type RawParams = IndexMap<String, String>;

/// One typed field and the keys it may be read from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamField {
    /// Primary key, used in error messages.
    pub key: &'static str,
    /// Alternate keys, tried in order after the primary key.
    pub aliases: &'static [&'static str],
    /// Whether the field may be omitted.
    pub required: bool,
}

impl ParamField {
    /// Declares a required field.
    #[must_use]
    pub const fn required(key: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            key,
            aliases,
            required: true,
        }
    }

    /// Declares an optional field.
    #[must_use]
    pub const fn optional(key: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            key,
            aliases,
            required: false,
        }
    }

    /// All keys in priority order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        let aliases = self.aliases;
        std::iter::once(self.key).chain(aliases.iter().copied())
    }

    /// Returns the first non-blank value present under any of the keys.
    #[must_use]
    pub fn lookup<'a>(&self, raw: &'a RawParams) -> Option<&'a str> {
        self.keys().find_map(|key| {
            raw.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        })
    }

    fn missing(&self) -> ValidationError {
        ValidationError::new(
            self.key,
            Reason::Missing {
                keys: self.keys().map(str::to_string).collect(),
            },
        )
    }

    fn error(&self, reason: Reason) -> ValidationError {
        ValidationError::new(self.key, reason)
    }

    /// Reads a strictly positive dimension.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing, not numeric, or not greater than zero.
    pub fn dimension(&self, raw: &RawParams) -> Result<f64, ValidationError> {
        let text = self.lookup(raw).ok_or_else(|| self.missing())?;
        let value = self.parse_number(text)?;
        if value <= 0.0 {
            return Err(self.error(Reason::NotPositive { value }));
        }
        Ok(value)
    }

    /// Reads an optional dimension; absent means `0.0`.
    ///
    /// # Errors
    ///
    /// Fails if the field is present but not numeric or negative.
    pub fn optional_dimension(&self, raw: &RawParams) -> Result<f64, ValidationError> {
        let Some(text) = self.lookup(raw) else {
            return Ok(0.0);
        };
        let value = self.parse_number(text)?;
        if value < 0.0 {
            return Err(self.error(Reason::Negative { value }));
        }
        Ok(value)
    }

    /// Reads a count in `minimum..=maximum`.
    ///
    /// Float spellings with no fractional part (`"8.0"`) are accepted.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing, not a whole number, or out of range.
    pub fn count(
        &self,
        raw: &RawParams,
        minimum: u32,
        maximum: u32,
    ) -> Result<u32, ValidationError> {
        let text = self.lookup(raw).ok_or_else(|| self.missing())?;
        let value = if let Ok(n) = text.parse::<i64>() {
            n
        } else {
            let float = self.parse_number(text)?;
            if float.fract() != 0.0 {
                return Err(self.error(Reason::NotInteger {
                    value: text.to_string(),
                }));
            }
            truncate_whole(float)
        };

        if value < i64::from(minimum) {
            return Err(self.error(Reason::BelowMinimum {
                value,
                minimum: i64::from(minimum),
            }));
        }
        if value > i64::from(maximum) {
            return Err(self.error(Reason::AboveMaximum {
                value,
                maximum: i64::from(maximum),
            }));
        }

        u32::try_from(value).map_err(|_| {
            self.error(Reason::NotInteger {
                value: text.to_string(),
            })
        })
    }

    fn parse_number(&self, text: &str) -> Result<f64, ValidationError> {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                self.error(Reason::NotNumeric {
                    value: text.to_string(),
                })
            })
    }
}

#[allow(clippy::cast_possible_truncation)] // saturates; callers range-check the result
fn truncate_whole(value: f64) -> i64 {
    value as i64
}

/// Builds a [`RawParams`] map from key/value pairs.
pub fn raw_params<K, V, I>(pairs: I) -> RawParams
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Builds a [`RawParams`] map from a JSON object.
///
/// String values are taken as-is and numbers are spelled out, so
/// `{"Pitch": 1.27}` and `{"Pitch": "1.27"}` are equivalent.
///
/// # Errors
///
/// Fails on the first value that is neither a string nor a number.
pub fn raw_params_from_json(object: &Map<String, Value>) -> Result<RawParams, ValidationError> {
    object
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key.clone(), s.clone())),
            Value::Number(n) => Ok((key.clone(), n.to_string())),
            other => Err(ValidationError::new(
                key.as_str(),
                Reason::NotNumeric {
                    value: other.to_string(),
                },
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: ParamField = ParamField::required("Pad Width", &["Lead Width", "LeadWidth"]);
    const COUNT: ParamField = ParamField::required("Pin Count", &["PinCount"]);
    const EP: ParamField = ParamField::optional("Exposed Pad Size X", &["ExposedPadSizeX"]);

    #[test]
    fn primary_key_wins_over_alias() {
        let raw = raw_params([("LeadWidth", "0.5"), ("Pad Width", "0.45")]);
        assert!((WIDTH.dimension(&raw).unwrap() - 0.45).abs() < f64::EPSILON);
    }

    #[test]
    fn first_alias_wins_over_later_alias() {
        let raw = raw_params([("LeadWidth", "0.5"), ("Lead Width", "0.4")]);
        assert!((WIDTH.dimension(&raw).unwrap() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_lists_all_keys() {
        let err = WIDTH.dimension(&RawParams::new()).unwrap_err();
        assert_eq!(err.field, "Pad Width");
        let Reason::Missing { keys } = err.reason else {
            panic!("expected Missing, got {:?}", err.reason);
        };
        assert_eq!(keys, vec!["Pad Width", "Lead Width", "LeadWidth"]);
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let raw = raw_params([("Pad Width", "   ")]);
        let err = WIDTH.dimension(&raw).unwrap_err();
        assert!(matches!(err.reason, Reason::Missing { .. }));
    }

    #[test]
    fn non_numeric_rejected() {
        let raw = raw_params([("Pad Width", "wide")]);
        let err = WIDTH.dimension(&raw).unwrap_err();
        assert!(matches!(err.reason, Reason::NotNumeric { .. }));
    }

    #[test]
    fn non_finite_rejected() {
        let raw = raw_params([("Pad Width", "inf")]);
        let err = WIDTH.dimension(&raw).unwrap_err();
        assert!(matches!(err.reason, Reason::NotNumeric { .. }));
    }

    #[test]
    fn zero_dimension_rejected() {
        let raw = raw_params([("Pad Width", "0")]);
        let err = WIDTH.dimension(&raw).unwrap_err();
        assert!(matches!(err.reason, Reason::NotPositive { .. }));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let raw = raw_params([("Pad Width", " 0.6 ")]);
        assert!((WIDTH.dimension(&raw).unwrap() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn count_accepts_whole_float() {
        let raw = raw_params([("Pin Count", "8.0")]);
        assert_eq!(COUNT.count(&raw, 1, 64).unwrap(), 8);
    }

    #[test]
    fn count_rejects_fraction() {
        let raw = raw_params([("PinCount", "7.5")]);
        let err = COUNT.count(&raw, 1, 64).unwrap_err();
        assert!(matches!(err.reason, Reason::NotInteger { .. }));
    }

    #[test]
    fn count_rejects_below_minimum() {
        let raw = raw_params([("Pin Count", "0")]);
        let err = COUNT.count(&raw, 1, 64).unwrap_err();
        assert!(matches!(
            err.reason,
            Reason::BelowMinimum {
                value: 0,
                minimum: 1
            }
        ));
    }

    #[test]
    fn count_rejects_above_maximum() {
        let raw = raw_params([("Pin Count", "65")]);
        let err = COUNT.count(&raw, 1, 64).unwrap_err();
        assert_eq!(err.field, "Pin Count");
        assert!(matches!(
            err.reason,
            Reason::AboveMaximum {
                value: 65,
                maximum: 64
            }
        ));
    }

    #[test]
    fn huge_float_count_is_out_of_range() {
        let raw = raw_params([("Pin Count", "1e30")]);
        let err = COUNT.count(&raw, 1, 64).unwrap_err();
        assert!(matches!(err.reason, Reason::AboveMaximum { .. }));
    }

    #[test]
    fn count_rejects_negative() {
        let raw = raw_params([("Pin Count", "-4")]);
        assert!(COUNT.count(&raw, 1, 64).is_err());
    }

    #[test]
    fn optional_absent_is_zero() {
        assert!(EP.optional_dimension(&RawParams::new()).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn json_numbers_and_strings_accepted() {
        let object = serde_json::json!({"Pin Count": 8, "Pitch": "1.27", "Pad Width": 0.45});
        let raw = raw_params_from_json(object.as_object().unwrap()).unwrap();
        assert_eq!(raw["Pin Count"], "8");
        assert_eq!(raw["Pitch"], "1.27");
        assert_eq!(raw["Pad Width"], "0.45");
    }

    #[test]
    fn json_boolean_rejected() {
        let object = serde_json::json!({"Pitch": true});
        let err = raw_params_from_json(object.as_object().unwrap()).unwrap_err();
        assert_eq!(err.field, "Pitch");
        assert!(matches!(err.reason, Reason::NotNumeric { .. }));
    }

    #[test]
    fn optional_negative_rejected() {
        let raw = raw_params([("ExposedPadSizeX", "-1")]);
        let err = EP.optional_dimension(&raw).unwrap_err();
        assert!(matches!(err.reason, Reason::Negative { .. }));
    }
}
