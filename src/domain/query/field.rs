//! Typed field access for filterable records.
//!
//! Every persisted record declares a static [`FieldMap`] naming the attributes a
//! caller may filter or sort on, the kind each one is stored as, and an accessor
//! that reads the value out of an in-memory record. The translator uses the kind
//! to coerce string filter values; the Postgres adapter uses the column name.

use crate::domain::query::error::QueryError;
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Storage kind of a record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
    Boolean,
    Timestamp,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
            FieldKind::Timestamp => "timestamp",
        }
    }

    /// Coerces the string form of a filter value into this kind.
    pub fn coerce(self, field: &str, raw: &str) -> Result<FieldValue, QueryError> {
        let invalid = || QueryError::InvalidValue {
            field: field.to_string(),
            kind: self.as_str(),
            value: raw.to_string(),
        };

        match self {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| invalid()),
            FieldKind::Decimal => {
                let parsed = raw.trim().parse::<f64>().map_err(|_| invalid())?;
                if !parsed.is_finite() {
                    return Err(invalid());
                }
                Ok(FieldValue::Decimal(parsed))
            }
            FieldKind::Boolean => match raw.trim().to_lowercase().as_str() {
                "true" | "t" | "1" => Ok(FieldValue::Boolean(true)),
                "false" | "f" | "0" => Ok(FieldValue::Boolean(false)),
                _ => Err(invalid()),
            },
            FieldKind::Timestamp => {
                let trimmed = raw.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
                    return Ok(FieldValue::Timestamp(dt.with_timezone(&Utc)));
                }
                // Plain dates are read as midnight UTC.
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| FieldValue::Timestamp(naive.and_utc()))
                    .ok_or_else(invalid)
            }
        }
    }
}

/// A single attribute value, either read from a record or coerced from a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Decimal(f64),
    Text(String),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Compares two non-null values of the same kind.
    ///
    /// Returns `None` when either side is null or the kinds differ, which callers
    /// treat the way SQL treats `NULL` in a comparison: the row does not match.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => a.partial_cmp(b),
            (FieldValue::Integer(a), FieldValue::Decimal(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Decimal(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total order used for sorting: nulls sort last, like Postgres `ASC`.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Greater,
            (_, FieldValue::Null) => Ordering::Less,
            _ => self.compare(other).unwrap_or(Ordering::Equal),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Decimal(v) => write!(f, "{v}"),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Boolean(v) => write!(f, "{v}"),
            FieldValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Decimal(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

/// Reads one attribute out of a record.
pub type Accessor<R> = fn(&R) -> FieldValue;

/// One filterable attribute of `R`.
pub struct FieldDef<R> {
    pub column: &'static str,
    pub kind: FieldKind,
    pub get: Accessor<R>,
}

impl<R> Clone for FieldDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldDef<R> {}

impl<R> fmt::Debug for FieldDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("column", &self.column)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Per-record field table, built once per record type.
///
/// The wire name of a field is its column name. Declaration order is kept so
/// adapters can derive column lists from it.
pub struct FieldMap<R> {
    primary_key: &'static str,
    fields: Vec<FieldDef<R>>,
}

impl<R> FieldMap<R> {
    pub fn new(primary_key: &'static str, get: Accessor<R>) -> Self {
        Self {
            primary_key,
            fields: vec![FieldDef {
                column: primary_key,
                kind: FieldKind::Integer,
                get,
            }],
        }
    }

    #[must_use]
    pub fn field(mut self, column: &'static str, kind: FieldKind, get: Accessor<R>) -> Self {
        debug_assert!(
            crate::domain::query::descriptor::validate_ident(column),
            "invalid column name {column}"
        );
        self.fields.push(FieldDef { column, kind, get });
        self
    }

    pub fn primary_key(&self) -> &FieldDef<R> {
        &self.fields[0]
    }

    pub fn primary_key_column(&self) -> &'static str {
        self.primary_key
    }

    /// Resolves a caller-supplied field name.
    pub fn get(&self, name: &str) -> Result<&FieldDef<R>, QueryError> {
        self.fields
            .iter()
            .find(|f| f.column == name)
            .ok_or_else(|| QueryError::UnknownField(name.to_string()))
    }

    pub fn kind_of(&self, column: &str) -> Option<FieldKind> {
        self.fields.iter().find(|f| f.column == column).map(|f| f.kind)
    }

    /// All fields except the primary key, in declaration order.
    pub fn data_fields(&self) -> impl Iterator<Item = &FieldDef<R>> {
        self.fields.iter().skip(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn coerces_scalars_by_kind() {
        assert_eq!(
            FieldKind::Integer.coerce("id", " 42 ").unwrap(),
            FieldValue::Integer(42)
        );
        assert_eq!(
            FieldKind::Decimal.coerce("price", "12.5").unwrap(),
            FieldValue::Decimal(12.5)
        );
        assert_eq!(
            FieldKind::Boolean.coerce("active", "T").unwrap(),
            FieldValue::Boolean(true)
        );
        assert_eq!(
            FieldKind::Text.coerce("name", " Dono ").unwrap(),
            FieldValue::Text(" Dono ".to_string())
        );
    }

    #[test]
    fn coerces_timestamps_from_rfc3339_and_plain_dates() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            FieldKind::Timestamp.coerce("created_at", "2024-03-01").unwrap(),
            FieldValue::Timestamp(expected)
        );
        assert_eq!(
            FieldKind::Timestamp
                .coerce("created_at", "2024-03-01T00:00:00+00:00")
                .unwrap(),
            FieldValue::Timestamp(expected)
        );
    }

    #[test]
    fn rejects_values_that_do_not_fit_the_kind() {
        let err = FieldKind::Integer.coerce("id", "abc").unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { kind: "integer", .. }));
        assert!(FieldKind::Decimal.coerce("price", "NaN").is_err());
        assert!(FieldKind::Boolean.coerce("active", "yes").is_err());
        assert!(FieldKind::Timestamp.coerce("created_at", "yesterday").is_err());
    }

    #[test]
    fn null_never_compares_but_sorts_last() {
        assert_eq!(FieldValue::Null.compare(&FieldValue::Integer(1)), None);
        assert_eq!(
            FieldValue::Null.sort_cmp(&FieldValue::Integer(1)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::Text("Dono".into()).compare(&FieldValue::Text("Cozinheiro".into())),
            Some(Ordering::Greater)
        );
    }
}
