//! Property-based tests for statement generation.
//!
//! - Placeholder count always equals parameter count
//! - INSERT keeps key order; UPDATE ends with the identifier

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::builder::QueryBuilder;
use super::statement::{PlaceholderStyle, SqlValue};

/// Strategy to generate distinct, valid column names (1 to 12 of them).
fn column_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,15}", 1..12)
        .prop_map(|names| names.into_iter().collect())
}

/// Strategy to generate an arbitrary bound value.
fn sql_value() -> impl Strategy<Value = SqlValue> {
    prop_oneof![
        any::<i64>().prop_map(SqlValue::Int),
        (any::<i64>(), 0u32..6).prop_map(|(m, s)| SqlValue::Decimal(Decimal::new(m, s))),
        ".*".prop_map(SqlValue::Text),
    ]
}

/// Strategy to generate column names paired with one value each.
fn columns_with_values() -> impl Strategy<Value = (Vec<String>, Vec<SqlValue>)> {
    column_names().prop_flat_map(|names| {
        let n = names.len();
        (Just(names), prop::collection::vec(sql_value(), n))
    })
}

fn placeholder_style() -> impl Strategy<Value = PlaceholderStyle> {
    prop_oneof![
        Just(PlaceholderStyle::QuestionMark),
        Just(PlaceholderStyle::Numbered),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// N keys and no id: N placeholders and N parameters in key order.
    #[test]
    fn prop_insert_has_one_placeholder_per_key(
        (names, values) in columns_with_values(),
        style in placeholder_style(),
    ) {
        let fields: Vec<(&str, SqlValue)> = names
            .iter()
            .map(String::as_str)
            .zip(values.iter().cloned())
            .collect();

        let stmt = QueryBuilder::new("project", "project_id", style)
            .build(fields, None)
            .unwrap();

        let values_clause = &stmt.sql[stmt.sql.find("VALUES").unwrap()..];
        prop_assert_eq!(style.count(values_clause), names.len());
        prop_assert_eq!(stmt.params, values);
    }

    /// N keys including the identity, plus an id: N-1 SET placeholders, one
    /// WHERE placeholder, and the id last.
    #[test]
    fn prop_update_excludes_identity_and_ends_with_id(
        names in column_names(),
        id in any::<i64>(),
        style in placeholder_style(),
    ) {
        let mut fields: Vec<(&str, SqlValue)> = vec![("project_id", SqlValue::Int(-1))];
        fields.extend(
            names
                .iter()
                .filter(|name| name.as_str() != "project_id")
                .map(|name| (name.as_str(), SqlValue::Text(name.clone()))),
        );
        let n = fields.len();
        prop_assume!(n > 1);

        let stmt = QueryBuilder::new("project", "project_id", style)
            .build(fields, Some(SqlValue::Int(id)))
            .unwrap();

        let where_at = stmt.sql.find(" WHERE ").unwrap();
        prop_assert_eq!(style.count(&stmt.sql[..where_at]), n - 1);
        prop_assert_eq!(style.count(&stmt.sql[where_at..]), 1);
        prop_assert_eq!(stmt.params.len(), n);
        prop_assert_eq!(stmt.params.last(), Some(&SqlValue::Int(id)));
    }
}
