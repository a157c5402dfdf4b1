//! Composable row predicates and orderings over a record type.
//!
//! A [`Predicate`] can be evaluated directly against a record (the in-memory
//! adapter does this) or rendered by an adapter into its own query language;
//! it carries both the column name and the accessor for each condition.

use crate::domain::query::descriptor::SortDirection;
use crate::domain::query::field::{Accessor, FieldValue};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Comparison {
    pub fn sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Gt => ">",
            Comparison::Lt => "<",
            Comparison::Ge => ">=",
            Comparison::Le => "<=",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Eq => ordering == Ordering::Equal,
            Comparison::Ne => ordering != Ordering::Equal,
            Comparison::Gt => ordering == Ordering::Greater,
            Comparison::Lt => ordering == Ordering::Less,
            Comparison::Ge => ordering != Ordering::Less,
            Comparison::Le => ordering != Ordering::Greater,
        }
    }
}

/// Single-field test.
#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    Compare(Comparison, FieldValue),
    /// Case-preserving substring containment.
    Contains(String),
    /// Inclusive range.
    Between(FieldValue, FieldValue),
}

pub struct Condition<R> {
    pub column: &'static str,
    pub get: Accessor<R>,
    pub test: Test,
}

impl<R> Condition<R> {
    pub fn matches(&self, record: &R) -> bool {
        let actual = (self.get)(record);
        match &self.test {
            Test::Compare(cmp, expected) => actual
                .compare(expected)
                .is_some_and(|ordering| cmp.holds(ordering)),
            Test::Contains(needle) => match actual {
                FieldValue::Text(haystack) => haystack.contains(needle.as_str()),
                _ => false,
            },
            Test::Between(lower, upper) => {
                actual.compare(lower).is_some_and(|o| o != Ordering::Less)
                    && actual.compare(upper).is_some_and(|o| o != Ordering::Greater)
            }
        }
    }
}

impl<R> Clone for Condition<R> {
    fn clone(&self) -> Self {
        Self {
            column: self.column,
            get: self.get,
            test: self.test.clone(),
        }
    }
}

impl<R> fmt::Debug for Condition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("column", &self.column)
            .field("test", &self.test)
            .finish()
    }
}

/// Boolean test over records of type `R`. Conjunction only.
pub enum Predicate<R> {
    /// Matches every row.
    True,
    Condition(Condition<R>),
    And(Vec<Predicate<R>>),
}

impl<R> Predicate<R> {
    /// Conjunction of `self` and `other`, flattening nested `And`s and dropping
    /// trivially-true operands.
    #[must_use]
    pub fn and(self, other: Predicate<R>) -> Predicate<R> {
        match (self, other) {
            (Predicate::True, p) | (p, Predicate::True) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (a, b) => Predicate::And(vec![a, b]),
        }
    }

    pub fn matches(&self, record: &R) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Condition(c) => c.matches(record),
            Predicate::And(parts) => parts.iter().all(|p| p.matches(record)),
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    /// Number of leaf conditions.
    pub fn len(&self) -> usize {
        match self {
            Predicate::True => 0,
            Predicate::Condition(_) => 1,
            Predicate::And(parts) => parts.iter().map(Predicate::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        match self {
            Predicate::True => Predicate::True,
            Predicate::Condition(c) => Predicate::Condition(c.clone()),
            Predicate::And(parts) => Predicate::And(parts.clone()),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::True => f.write_str("True"),
            Predicate::Condition(c) => c.fmt(f),
            Predicate::And(parts) => f.debug_tuple("And").field(parts).finish(),
        }
    }
}

/// One key of a multi-key ordering.
pub struct OrderKey<R> {
    pub column: &'static str,
    pub get: Accessor<R>,
    pub direction: SortDirection,
}

impl<R> Clone for OrderKey<R> {
    fn clone(&self) -> Self {
        Self {
            column: self.column,
            get: self.get,
            direction: self.direction,
        }
    }
}

impl<R> fmt::Debug for OrderKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderKey")
            .field("column", &self.column)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Compares two records key by key; the first non-equal key decides.
pub fn compare_by<R>(keys: &[OrderKey<R>], a: &R, b: &R) -> Ordering {
    for key in keys {
        let ordering = (key.get)(a).sort_cmp(&(key.get)(b));
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
