//! Typed comparison filters over a single column
//!
//! A filter names a column by its header, an operator, and a comparand. The
//! column's type is inferred from a single sample (the first data row that
//! reaches the column) and decides both which operators are valid and how
//! cells are compared:
//!
//! | column type | operators       | comparison                 |
//! |-------------|-----------------|----------------------------|
//! | Integer     | `=` `>` `<`     | as `i64`                   |
//! | Float       | `=` `>` `<`     | as `f64`                   |
//! | Text        | `contain`       | substring of the raw text  |
//!
//! Cells in a numeric column that fail to parse compare as zero.

use std::fmt;

use crate::cell::{parse_float, CellMatrix, TypeTag};
use crate::error::{Error, Result};
use crate::resolve::resolve_index;

/// A filter operator as named on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equal,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `contain`
    Contain,
    /// Anything else; rejected when the first row is compared
    Other(String),
}

impl Operator {
    /// Parse a wire operator. Matching is exact; unknown names become [`Operator::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "=" => Operator::Equal,
            ">" => Operator::GreaterThan,
            "<" => Operator::LessThan,
            "contain" => Operator::Contain,
            other => Operator::Other(other.to_string()),
        }
    }

    /// The wire form of the operator
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Contain => "contain",
            Operator::Other(s) => s,
        }
    }

    /// Check if the operator may be applied to a column of the given type
    pub fn applies_to(&self, type_tag: TypeTag) -> bool {
        match self {
            Operator::Equal | Operator::GreaterThan | Operator::LessThan => type_tag.is_numeric(),
            Operator::Contain => type_tag == TypeTag::Text,
            Operator::Other(_) => false,
        }
    }

    fn compare<T: PartialOrd>(&self, cell: T, comparand: T) -> Option<bool> {
        match self {
            Operator::Equal => Some(cell == comparand),
            Operator::GreaterThan => Some(cell > comparand),
            Operator::LessThan => Some(cell < comparand),
            Operator::Contain | Operator::Other(_) => None,
        }
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        Operator::parse(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Operator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Operator {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Ok(Operator::parse(&s))
    }
}

/// A comparison filter over one named column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterSpec {
    /// Header name of the column to test
    pub column: String,
    /// Comparison to apply
    pub operator: Operator,
    /// Right-hand side of the comparison, as text
    pub comparand: String,
}

impl FilterSpec {
    /// Create a new filter
    pub fn new<C, O, V>(column: C, operator: O, comparand: V) -> Self
    where
        C: Into<String>,
        O: Into<Operator>,
        V: Into<String>,
    {
        Self {
            column: column.into(),
            operator: operator.into(),
            comparand: comparand.into(),
        }
    }
}

/// Return the header row followed by every data row matching `spec`.
///
/// Steps:
/// 1. Resolve the column in the header row (missing → [`Error::ColumnNotFound`]).
/// 2. If no data row reaches the column, return just the header.
/// 3. Type the column from that first reaching row, and the comparand on its own.
/// 4. For a numeric column the two types must agree ([`Error::TypeMismatch`]);
///    text columns accept any comparand.
/// 5. Scan data rows in order, skipping rows too short to reach the column,
///    and keep the ones that satisfy the operator. An operator that does not
///    fit the column type fails with [`Error::UnsupportedOperator`].
///
/// The input matrix is borrowed and never modified, so repeated calls with
/// the same input return the same rows.
///
/// # Examples
/// ```
/// use sheetbridge_core::{evaluate, FilterSpec};
///
/// let matrix: Vec<Vec<String>> = [["Email"], ["a@x.com"], ["b@y.org"]]
///     .iter()
///     .map(|r| r.iter().map(|s| s.to_string()).collect())
///     .collect();
///
/// let rows = evaluate(&matrix, &FilterSpec::new("Email", "contain", ".com")).unwrap();
/// assert_eq!(rows, vec![vec!["Email".to_string()], vec!["a@x.com".to_string()]]);
/// ```
pub fn evaluate(matrix: &CellMatrix, spec: &FilterSpec) -> Result<CellMatrix> {
    let Some(header) = matrix.first() else {
        return Err(Error::ColumnNotFound(spec.column.clone()));
    };
    let index = resolve_index(header, &spec.column)?;

    let mut matches = vec![header.clone()];

    let Some(sample) = matrix.iter().skip(1).find_map(|row| row.get(index)) else {
        return Ok(matches);
    };

    let data_type = TypeTag::classify(sample);
    let comparand_type = TypeTag::classify(&spec.comparand);

    tracing::debug!(
        column = %spec.column,
        index,
        %data_type,
        %comparand_type,
        operator = %spec.operator,
        "evaluating filter"
    );

    if data_type.is_numeric() && comparand_type != data_type {
        return Err(Error::TypeMismatch {
            column: spec.column.clone(),
            expected: data_type,
            found: comparand_type,
        });
    }

    let unsupported = || Error::UnsupportedOperator {
        operator: spec.operator.to_string(),
        type_tag: data_type,
    };

    let int_comparand = spec.comparand.parse::<i64>().unwrap_or(0);
    let float_comparand = parse_float(&spec.comparand).unwrap_or(0.0);

    for row in matrix.iter().skip(1) {
        let Some(cell) = row.get(index) else {
            continue;
        };

        let keep = match data_type {
            TypeTag::Integer => spec
                .operator
                .compare(cell.parse::<i64>().unwrap_or(0), int_comparand)
                .ok_or_else(unsupported)?,
            TypeTag::Float => spec
                .operator
                .compare(parse_float(cell).unwrap_or(0.0), float_comparand)
                .ok_or_else(unsupported)?,
            TypeTag::Text => match spec.operator {
                Operator::Contain => cell.contains(spec.comparand.as_str()),
                _ => return Err(unsupported()),
            },
        };

        if keep {
            matches.push(row.clone());
        }
    }

    Ok(matches)
}
