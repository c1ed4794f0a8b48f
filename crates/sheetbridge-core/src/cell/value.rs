//! Cell value types

use std::fmt;

use crate::filter::Operator;

/// One row of cell text. Rows may be shorter than the header row.
pub type Row = Vec<String>;

/// An ordered sequence of rows, built fresh from each store response.
///
/// Every cell is kept as text; numeric interpretation happens on demand
/// through [`TypeTag::classify`].
pub type CellMatrix = Vec<Row>;

/// The inferred type of a cell's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    /// Parses as a signed 64-bit integer
    Integer,
    /// Parses as a 64-bit float but not as an integer
    Float,
    /// Anything else, including the empty string
    Text,
}

impl TypeTag {
    /// Classify a value, trying integer first, then float, then falling back to text.
    ///
    /// Floats are read by [`parse_float`]: decimal and hexadecimal (`0x1p3`)
    /// forms are accepted, while a finite literal too large for `f64` is text.
    ///
    /// # Examples
    /// ```
    /// use sheetbridge_core::TypeTag;
    ///
    /// assert_eq!(TypeTag::classify("42"), TypeTag::Integer);
    /// assert_eq!(TypeTag::classify("-4.2"), TypeTag::Float);
    /// assert_eq!(TypeTag::classify("4.2kg"), TypeTag::Text);
    /// assert_eq!(TypeTag::classify(""), TypeTag::Text);
    /// ```
    pub fn classify(value: &str) -> Self {
        if value.parse::<i64>().is_ok() {
            TypeTag::Integer
        } else if parse_float(value).is_some() {
            TypeTag::Float
        } else {
            TypeTag::Text
        }
    }

    /// Check if this is one of the numeric tags
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Integer | TypeTag::Float)
    }

    /// Check if `operator` may be applied to a column of this type
    pub fn allows(&self, operator: &Operator) -> bool {
        operator.applies_to(*self)
    }

    /// Get the lowercase name of the tag
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::Text => "text",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a float the way cell text is read for comparisons.
///
/// Accepts everything `f64::from_str` does except finite literals that
/// overflow to infinity, plus hexadecimal mantissas with a mandatory binary
/// exponent (`0x1.8p1`). Explicit `inf`/`infinity`/`nan` spellings are kept.
pub fn parse_float(value: &str) -> Option<f64> {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        let magnitude = parse_hex_float(hex)?;
        return Some(if negative { -magnitude } else { magnitude });
    }

    let parsed = value.parse::<f64>().ok()?;
    if parsed.is_infinite() && !unsigned.to_ascii_lowercase().starts_with("inf") {
        return None;
    }
    Some(parsed)
}

/// `<hex digits>[.<hex digits>]p[+-]<decimal exponent>`, without the `0x` prefix
fn parse_hex_float(text: &str) -> Option<f64> {
    let (mantissa, exponent) = text.split_once(['p', 'P'])?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut value = 0f64;
    for c in whole.chars().chain(fraction.chars()) {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }

    let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let exponent = exponent.parse::<i32>().unwrap_or(if exponent.starts_with('-') {
        i32::MIN / 2
    } else {
        i32::MAX / 2
    });
    let scale = i32::try_from(fraction.len()).ok()?.checked_mul(4)?;

    let result = value * 2f64.powi(exponent.saturating_sub(scale));
    result.is_finite().then_some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integers() {
        assert_eq!(TypeTag::classify("0"), TypeTag::Integer);
        assert_eq!(TypeTag::classify("123"), TypeTag::Integer);
        assert_eq!(TypeTag::classify("-7"), TypeTag::Integer);
        assert_eq!(TypeTag::classify("+7"), TypeTag::Integer);
    }

    #[test]
    fn test_classify_floats() {
        assert_eq!(TypeTag::classify("9.8"), TypeTag::Float);
        assert_eq!(TypeTag::classify("10.0"), TypeTag::Float);
        assert_eq!(TypeTag::classify("1e3"), TypeTag::Float);
        assert_eq!(TypeTag::classify(".5"), TypeTag::Float);
        // Too large for i64, still a valid float
        assert_eq!(TypeTag::classify("99999999999999999999"), TypeTag::Float);
    }

    #[test]
    fn test_classify_float_edges() {
        // Out of f64 range is text, explicit infinities are floats
        assert_eq!(TypeTag::classify("1e400"), TypeTag::Text);
        assert_eq!(TypeTag::classify("-1e400"), TypeTag::Text);
        assert_eq!(TypeTag::classify("inf"), TypeTag::Float);
        assert_eq!(TypeTag::classify("-Infinity"), TypeTag::Float);
        assert_eq!(TypeTag::classify("NaN"), TypeTag::Float);

        assert_eq!(TypeTag::classify("0x1p3"), TypeTag::Float);
        assert_eq!(TypeTag::classify("0x1.8P-1"), TypeTag::Float);
        assert_eq!(TypeTag::classify("0x10"), TypeTag::Text);
        assert_eq!(TypeTag::classify("0xp3"), TypeTag::Text);
        assert_eq!(TypeTag::classify("0x1p"), TypeTag::Text);
    }

    #[test]
    fn test_parse_float_values() {
        assert_eq!(parse_float("0x1p3"), Some(8.0));
        assert_eq!(parse_float("-0x1.8p1"), Some(-3.0));
        assert_eq!(parse_float("0xA.8p0"), Some(10.5));
        assert_eq!(parse_float("1e-3"), Some(0.001));
        assert_eq!(parse_float("0x1p99999"), None);
        assert_eq!(parse_float("1e400"), None);
        assert_eq!(parse_float("inf"), Some(f64::INFINITY));
        assert_eq!(parse_float("12 "), None);
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(TypeTag::classify(""), TypeTag::Text);
        assert_eq!(TypeTag::classify("abc"), TypeTag::Text);
        assert_eq!(TypeTag::classify(" 12"), TypeTag::Text);
        assert_eq!(TypeTag::classify("1,000"), TypeTag::Text);
        assert_eq!(TypeTag::classify("a@x.com"), TypeTag::Text);
    }

    #[test]
    fn test_numeric_tags() {
        assert!(TypeTag::Integer.is_numeric());
        assert!(TypeTag::Float.is_numeric());
        assert!(!TypeTag::Text.is_numeric());
        assert_eq!(TypeTag::Float.to_string(), "float");
    }

    #[test]
    fn test_allowed_operators() {
        assert!(TypeTag::Integer.allows(&Operator::LessThan));
        assert!(TypeTag::Float.allows(&Operator::Equal));
        assert!(!TypeTag::Float.allows(&Operator::Contain));
        assert!(TypeTag::Text.allows(&Operator::Contain));
        assert!(!TypeTag::Text.allows(&Operator::GreaterThan));
        assert!(!TypeTag::Integer.allows(&Operator::parse(">=")));
    }
}
