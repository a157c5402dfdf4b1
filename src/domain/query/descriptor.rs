//! Storage-independent descriptions of what to filter, sort and page by.

use crate::domain::query::error::QueryError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Comparison applied by a [`FilterDescriptor`]. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEquals,
    Like,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    Between,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Like,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterEqual,
        Operator::LessEqual,
        Operator::Between,
    ];

    /// Wire tag of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::Like => "LIKE",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::LessThan => "LESS_THAN",
            Operator::GreaterEqual => "GREATER_EQUAL",
            Operator::LessEqual => "LESS_EQUAL",
            Operator::Between => "BETWEEN",
        }
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().to_ascii_uppercase();
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| QueryError::UnsupportedOperator(tag.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true for plain `[A-Za-z_][A-Za-z0-9_]*` identifiers.
///
/// Field names never carry paths, quoting or SQL, so anything else is rejected
/// before it can reach an adapter.
pub fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_field(field: &str) -> Result<(), QueryError> {
    if field.trim().is_empty() {
        return Err(QueryError::EmptyField);
    }
    if !validate_ident(field) {
        return Err(QueryError::InvalidFieldName(field.to_string()));
    }
    Ok(())
}

/// One filter instruction: `field <operator> value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDescriptor {
    field: String,
    value: String,
    operator: Operator,
}

impl FilterDescriptor {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        operator: Operator,
    ) -> Result<Self, QueryError> {
        let field = field.into();
        let value = value.into();
        check_field(&field)?;
        if operator == Operator::Between {
            split_between(&value)?;
        }
        Ok(Self {
            field,
            value,
            operator,
        })
    }

    /// Builds a descriptor from a raw operator tag as received on the wire.
    pub fn parse(
        field: impl Into<String>,
        value: impl Into<String>,
        operator_tag: &str,
    ) -> Result<Self, QueryError> {
        let operator = operator_tag.parse::<Operator>()?;
        Self::new(field, value, operator)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Lower and upper bound of a `BETWEEN` filter.
    pub fn between_bounds(&self) -> Result<(&str, &str), QueryError> {
        split_between(&self.value)
    }
}

fn split_between(value: &str) -> Result<(&str, &str), QueryError> {
    let mut parts = value.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lower), Some(upper), None) if !lower.trim().is_empty() && !upper.trim().is_empty() => {
            Ok((lower.trim(), upper.trim()))
        }
        _ => Err(QueryError::InvalidBetween(value.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(QueryError::UnsupportedDirection(tag.to_string())),
        }
    }
}

/// One sort key. Descriptor order is the tie-break order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDescriptor {
    field: String,
    direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Result<Self, QueryError> {
        let field = field.into();
        check_field(&field)?;
        Ok(Self { field, direction })
    }

    pub fn asc(field: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(field, SortDirection::Desc)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Zero-based page number and positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, QueryError> {
        if page_number < 0 {
            return Err(QueryError::InvalidPage(format!(
                "page number must be >= 0, got {page_number}"
            )));
        }
        if page_size < 1 {
            return Err(QueryError::InvalidPage(format!(
                "page size must be >= 1, got {page_size}"
            )));
        }
        if page_number.checked_mul(page_size).is_none() {
            return Err(QueryError::InvalidPage(
                "page window is out of range".to_string(),
            ));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> i64 {
        // Overflow is rejected in `new`.
        self.page_number * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One page of mapped results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    /// Rows matching the filters across all pages.
    pub total_elements: i64,
}

impl<T> PageResult<T> {
    pub fn total_pages(&self) -> i64 {
        self.total_elements / self.page_size
            + i64::from(self.total_elements % self.page_size != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_operator_tag_case_insensitively() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
            assert_eq!(op.as_str().to_lowercase().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn unknown_operator_tag_is_rejected() {
        let err = FilterDescriptor::parse("name", "x", "REGEX").unwrap_err();
        assert_eq!(err, QueryError::UnsupportedOperator("REGEX".to_string()));
    }

    #[test]
    fn empty_or_pathlike_field_is_rejected() {
        assert_eq!(
            FilterDescriptor::new("", "x", Operator::Equals).unwrap_err(),
            QueryError::EmptyField
        );
        assert!(matches!(
            FilterDescriptor::new("restaurant.name", "x", Operator::Equals).unwrap_err(),
            QueryError::InvalidFieldName(_)
        ));
        assert!(SortDescriptor::asc("   ").is_err());
    }

    #[test]
    fn between_requires_exactly_two_bounds() {
        assert!(FilterDescriptor::new("price", "10,20", Operator::Between).is_ok());
        for bad in ["10", "10,", ",20", "10,20,30", ""] {
            assert_eq!(
                FilterDescriptor::new("price", bad, Operator::Between).unwrap_err(),
                QueryError::InvalidBetween(bad.to_string()),
                "value {bad:?}"
            );
        }
    }

    #[test]
    fn between_bounds_are_trimmed() {
        let f = FilterDescriptor::new("price", " 10 , 20 ", Operator::Between).unwrap();
        assert_eq!(f.between_bounds().unwrap(), ("10", "20"));
    }

    #[test]
    fn page_request_rejects_negative_number_and_non_positive_size() {
        assert!(PageRequest::new(-1, 10).is_err());
        assert!(PageRequest::new(0, 0).is_err());
        assert!(PageRequest::new(i64::MAX, 2).is_err());

        let page = PageRequest::new(3, 25).unwrap();
        assert_eq!(page.offset(), 75);
        assert_eq!(page.limit(), 25);
    }

    #[test]
    fn sort_direction_parses_both_cases() {
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PageResult::<u8> {
            content: vec![],
            page_number: 0,
            page_size: 10,
            total_elements: 21,
        };
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn total_pages_handles_maximal_page_size() {
        let request = PageRequest::new(0, i64::MAX).unwrap();
        let page = PageResult::<u8> {
            content: vec![],
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_elements: 2,
        };
        assert_eq!(page.total_pages(), 1);

        let empty = PageResult::<u8> { total_elements: 0, ..page.clone() };
        assert_eq!(empty.total_pages(), 0);

        let full = PageResult::<u8> {
            total_elements: i64::MAX,
            ..page
        };
        assert_eq!(full.total_pages(), 1);
    }
}
