//! Turns filter and sort descriptors into a typed predicate and ordering.

use crate::domain::query::descriptor::{FilterDescriptor, Operator, SortDescriptor};
use crate::domain::query::error::QueryError;
use crate::domain::query::field::{FieldDef, FieldKind, FieldMap};
use crate::domain::query::predicate::{Comparison, Condition, OrderKey, Predicate, Test};
use std::cmp::Ordering;

/// ANDs every filter together, starting from a predicate that matches all rows.
///
/// Unknown field names, values that do not coerce to the field's kind, `LIKE`
/// on non-text fields and reversed `BETWEEN` ranges all fail here, before any
/// storage access.
pub fn translate<R>(
    fields: &FieldMap<R>,
    filters: &[FilterDescriptor],
) -> Result<Predicate<R>, QueryError> {
    filters
        .iter()
        .try_fold(Predicate::True, |acc, filter| -> Result<Predicate<R>, QueryError> {
            Ok(acc.and(Predicate::Condition(condition(fields, filter)?)))
        })
}

fn condition<R>(fields: &FieldMap<R>, filter: &FilterDescriptor) -> Result<Condition<R>, QueryError> {
    let def = fields.get(filter.field())?;
    let compare = |cmp: Comparison| -> Result<Test, QueryError> {
        Ok(Test::Compare(cmp, def.kind.coerce(def.column, filter.value())?))
    };

    let test = match filter.operator() {
        Operator::Equals => compare(Comparison::Eq)?,
        Operator::NotEquals => compare(Comparison::Ne)?,
        Operator::GreaterThan => compare(Comparison::Gt)?,
        Operator::LessThan => compare(Comparison::Lt)?,
        Operator::GreaterEqual => compare(Comparison::Ge)?,
        Operator::LessEqual => compare(Comparison::Le)?,
        Operator::Like => {
            if def.kind != FieldKind::Text {
                return Err(QueryError::LikeOnNonText(def.column.to_string()));
            }
            Test::Contains(filter.value().to_string())
        }
        Operator::Between => between(def, filter)?,
    };

    Ok(Condition {
        column: def.column,
        get: def.get,
        test,
    })
}

fn between<R>(def: &FieldDef<R>, filter: &FilterDescriptor) -> Result<Test, QueryError> {
    let (lower_raw, upper_raw) = filter.between_bounds()?;
    let lower = def.kind.coerce(def.column, lower_raw)?;
    let upper = def.kind.coerce(def.column, upper_raw)?;
    if lower.compare(&upper) == Some(Ordering::Greater) {
        return Err(QueryError::ReversedBetween {
            field: def.column.to_string(),
            lower: lower_raw.to_string(),
            upper: upper_raw.to_string(),
        });
    }
    Ok(Test::Between(lower, upper))
}

/// Resolves sort descriptors into ordering keys, keeping descriptor order.
pub fn translate_sort<R>(
    fields: &FieldMap<R>,
    sorts: &[SortDescriptor],
) -> Result<Vec<OrderKey<R>>, QueryError> {
    sorts
        .iter()
        .map(|sort| -> Result<OrderKey<R>, QueryError> {
            let def = fields.get(sort.field())?;
            Ok(OrderKey {
                column: def.column,
                get: def.get,
                direction: sort.direction(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::descriptor::SortDirection;
    use crate::domain::query::field::FieldValue;

    #[derive(Debug)]
    struct Dish {
        id: i64,
        name: &'static str,
        price: f64,
        dine_in_only: bool,
    }

    fn fields() -> FieldMap<Dish> {
        FieldMap::new("id", |d: &Dish| d.id.into())
            .field("name", FieldKind::Text, |d| d.name.into())
            .field("price", FieldKind::Decimal, |d| d.price.into())
            .field("dine_in_only", FieldKind::Boolean, |d| d.dine_in_only.into())
    }

    fn dishes() -> Vec<Dish> {
        vec![
            Dish { id: 1, name: "Feijoada", price: 45.0, dine_in_only: true },
            Dish { id: 2, name: "Coxinha", price: 8.5, dine_in_only: false },
            Dish { id: 3, name: "Moqueca", price: 20.0, dine_in_only: true },
            Dish { id: 4, name: "Pastel", price: 10.0, dine_in_only: false },
            Dish { id: 5, name: "Brigadeiro", price: 3.0, dine_in_only: false },
        ]
    }

    fn ids(filters: &[FilterDescriptor]) -> Vec<i64> {
        let predicate = translate(&fields(), filters).unwrap();
        dishes()
            .into_iter()
            .filter(|d| predicate.matches(d))
            .map(|d| d.id)
            .collect()
    }

    fn f(field: &str, value: &str, op: Operator) -> FilterDescriptor {
        FilterDescriptor::new(field, value, op).unwrap()
    }

    #[test]
    fn empty_filter_list_matches_every_row() {
        let predicate = translate(&fields(), &[]).unwrap();
        assert!(predicate.is_true());
        assert_eq!(ids(&[]), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn each_operator_selects_the_expected_subset() {
        assert_eq!(ids(&[f("name", "Pastel", Operator::Equals)]), vec![4]);
        assert_eq!(ids(&[f("name", "Pastel", Operator::NotEquals)]), vec![1, 2, 3, 5]);
        assert_eq!(ids(&[f("name", "ca", Operator::Like)]), vec![3]);
        assert_eq!(ids(&[f("price", "10", Operator::GreaterThan)]), vec![1, 3]);
        assert_eq!(ids(&[f("price", "10", Operator::LessThan)]), vec![2, 5]);
        assert_eq!(ids(&[f("price", "10", Operator::GreaterEqual)]), vec![1, 3, 4]);
        assert_eq!(ids(&[f("price", "10", Operator::LessEqual)]), vec![2, 4, 5]);
        assert_eq!(ids(&[f("price", "10,20", Operator::Between)]), vec![3, 4]);
    }

    #[test]
    fn filters_are_anded() {
        let filters = [
            f("dine_in_only", "true", Operator::Equals),
            f("price", "30", Operator::LessThan),
        ];
        assert_eq!(ids(&filters), vec![3]);
    }

    #[test]
    fn reversed_between_is_rejected() {
        let err = translate(&fields(), &[f("price", "20,10", Operator::Between)]).unwrap_err();
        assert!(matches!(err, QueryError::ReversedBetween { .. }));
    }

    #[test]
    fn degenerate_between_matches_the_single_value() {
        assert_eq!(ids(&[f("price", "20,20", Operator::Between)]), vec![3]);
    }

    #[test]
    fn unknown_field_fails_at_translation() {
        let err = translate(&fields(), &[f("calories", "1", Operator::Equals)]).unwrap_err();
        assert_eq!(err, QueryError::UnknownField("calories".to_string()));

        let err = translate_sort(&fields(), &[SortDescriptor::asc("calories").unwrap()]).unwrap_err();
        assert_eq!(err, QueryError::UnknownField("calories".to_string()));
    }

    #[test]
    fn like_requires_a_text_field() {
        let err = translate(&fields(), &[f("price", "1", Operator::Like)]).unwrap_err();
        assert_eq!(err, QueryError::LikeOnNonText("price".to_string()));
    }

    #[test]
    fn uncoercible_value_is_rejected() {
        let err = translate(&fields(), &[f("price", "cheap", Operator::LessThan)]).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { .. }));
    }

    #[test]
    fn every_filter_contributes_a_condition() {
        let filters = [
            f("name", "a", Operator::Like),
            f("price", "1", Operator::GreaterThan),
            f("price", "1,100", Operator::Between),
        ];
        assert_eq!(translate(&fields(), &filters).unwrap().len(), 3);
    }

    #[test]
    fn sort_keys_keep_descriptor_order() {
        let keys = translate_sort(
            &fields(),
            &[SortDescriptor::desc("price").unwrap(), SortDescriptor::asc("name").unwrap()],
        )
        .unwrap();
        let columns: Vec<_> = keys.iter().map(|k| (k.column, k.direction)).collect();
        assert_eq!(
            columns,
            vec![("price", SortDirection::Desc), ("name", SortDirection::Asc)]
        );
    }

    #[test]
    fn between_bounds_are_coerced() {
        let predicate = translate(&fields(), &[f("price", "8.5,10", Operator::Between)]).unwrap();
        let Predicate::Condition(c) = predicate else {
            panic!("expected a single condition");
        };
        assert_eq!(
            c.test,
            Test::Between(FieldValue::Decimal(8.5), FieldValue::Decimal(10.0))
        );
    }
}
