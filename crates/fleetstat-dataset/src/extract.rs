//! Best-effort extraction of numeric attributes from records
//!
//! Malformed values are never errors at this layer: a record whose attribute
//! is missing, `null`, or not a finite number is skipped and counted as
//! dropped. The one exception is the [`ExtractPolicy::EmbeddedInteger`]
//! policy, which recovers a number from free text (for example a year in
//! `"2015 model"`) and falls back to a fixed default when the text holds no
//! digits at all.

use serde_json::Value;

use crate::record::Record;

/// Attribute holding the model year.
pub const YEAR_ATTRIBUTE: &str = "Year";

/// Year assumed for string-typed years that contain no digits.
pub const DEFAULT_YEAR: f64 = 2000.0;

/// How a raw attribute value is coerced to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractPolicy {
    /// Accept JSON numbers and strings that parse entirely as a finite number.
    Strict,
    /// Like [`Self::Strict`], but a string that does not parse is scanned for
    /// its first run of ASCII digits; if there is none, `default` is used.
    EmbeddedInteger {
        /// Value used for strings without any digits.
        default: f64,
    },
}

impl ExtractPolicy {
    /// Policy used for model years.
    pub const YEAR: Self = Self::EmbeddedInteger {
        default: DEFAULT_YEAR,
    };

    /// Returns the policy conventionally applied to `attribute`.
    ///
    /// [`YEAR_ATTRIBUTE`] uses [`Self::YEAR`]; everything else is strict.
    #[must_use]
    pub fn for_attribute(attribute: &str) -> Self {
        if attribute == YEAR_ATTRIBUTE {
            Self::YEAR
        } else {
            Self::Strict
        }
    }

    /// Coerces one raw value, or returns `None` if it must be skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_dataset::extract::ExtractPolicy;
    /// use serde_json::json;
    ///
    /// assert_eq!(ExtractPolicy::Strict.extract(&json!(" 42.5 ")), Some(42.5));
    /// assert_eq!(ExtractPolicy::Strict.extract(&json!("2015 model")), None);
    /// assert_eq!(ExtractPolicy::YEAR.extract(&json!("2015 model")), Some(2015.0));
    /// assert_eq!(ExtractPolicy::YEAR.extract(&json!("unknown")), Some(2000.0));
    /// assert_eq!(ExtractPolicy::YEAR.extract(&json!(true)), None);
    /// ```
    #[must_use]
    pub fn extract(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64().filter(|x| x.is_finite()),
            Value::String(s) => {
                let parsed = s.trim().parse::<f64>().ok().filter(|x| x.is_finite());
                match self {
                    Self::Strict => parsed,
                    Self::EmbeddedInteger { default } => parsed
                        .or_else(|| first_integer_token(s))
                        .or(Some(*default)),
                }
            }
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Returns the first run of ASCII digits in `s`, as a number.
fn first_integer_token(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Numeric values pulled from a record collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Extracted values, in record order.
    pub values: Vec<f64>,
    /// Number of records skipped because the attribute did not extract.
    pub dropped: usize,
}

impl Extraction {
    /// Returns the extracted values sorted ascending.
    #[must_use]
    pub fn into_sorted(self) -> Vec<f64> {
        let mut values = self.values;
        values.sort_by(f64::total_cmp);
        values
    }
}

/// Extracts `attribute` from every record with the given policy.
///
/// # Examples
///
/// ```
/// use fleetstat_dataset::{extract::{extract_numeric, ExtractPolicy}, record::Record};
///
/// let records = [
///     Record::new().with("Price", 100),
///     Record::new().with("Price", "n/a"),
///     Record::new(),
///     Record::new().with("Price", "250"),
/// ];
/// let extraction = extract_numeric(&records, "Price", ExtractPolicy::Strict);
/// assert_eq!(extraction.values, [100.0, 250.0]);
/// assert_eq!(extraction.dropped, 2);
/// ```
#[must_use]
pub fn extract_numeric(records: &[Record], attribute: &str, policy: ExtractPolicy) -> Extraction {
    let mut extraction = Extraction::default();
    for record in records {
        match record.get(attribute).and_then(|v| policy.extract(v)) {
            Some(x) => extraction.values.push(x),
            None => extraction.dropped += 1,
        }
    }
    if extraction.dropped > 0 {
        tracing::debug!(
            attribute,
            kept = extraction.values.len(),
            dropped = extraction.dropped,
            "skipped records without a usable numeric value"
        );
    }
    extraction
}

/// Extracts `attribute` with the policy conventionally used for it.
#[must_use]
pub fn extract_sample(records: &[Record], attribute: &str) -> Extraction {
    extract_numeric(records, attribute, ExtractPolicy::for_attribute(attribute))
}
