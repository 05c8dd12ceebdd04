//! Predicate filtering for query execution
//!
//! Filters documents strictly according to predicates.
//! No type coercion, no expressions, exact match only.

use serde_json::Value;

use super::ast::{Filter, FilterOp, Predicate};

/// Evaluates filters against documents
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a document matches a filter (AND semantics)
    pub fn matches(document: &Value, filter: &Filter) -> bool {
        filter
            .predicates
            .iter()
            .all(|pred| Self::matches_predicate(document, pred))
    }

    /// Checks if a document matches a single predicate
    fn matches_predicate(document: &Value, predicate: &Predicate) -> bool {
        let field_value = match document.get(&predicate.field) {
            Some(v) => v,
            None => return false, // Missing field = no match
        };

        // Null values never match
        if field_value.is_null() {
            return false;
        }

        match &predicate.op {
            FilterOp::Eq(expected) => field_value == expected,
            FilterOp::Ne(expected) => field_value != expected,
            FilterOp::Gt(bound) => Self::ordered_match(field_value, bound, |o| o.is_gt()),
            FilterOp::Gte(bound) => Self::ordered_match(field_value, bound, |o| o.is_ge()),
            FilterOp::Lt(bound) => Self::ordered_match(field_value, bound, |o| o.is_lt()),
            FilterOp::Lte(bound) => Self::ordered_match(field_value, bound, |o| o.is_le()),
        }
    }

    /// Comparison match for numbers and strings.
    ///
    /// Values of other types (or mixed types) never match.
    fn ordered_match<F>(actual: &Value, bound: &Value, accept: F) -> bool
    where
        F: Fn(std::cmp::Ordering) -> bool,
    {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                match (a.as_f64(), b.as_f64()) {
                    (Some(af), Some(bf)) => af
                        .partial_cmp(&bf)
                        .map(&accept)
                        .unwrap_or(false),
                    _ => false,
                }
            }
            (Value::String(a), Value::String(b)) => accept(a.cmp(b)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ast::Predicate;
    use serde_json::json;

    fn single(pred: Predicate) -> Filter {
        Filter::new(vec![pred])
    }

    #[test]
    fn test_equality_match() {
        let doc = json!({"title": "Dune", "genre": "Fiction"});

        assert!(PredicateFilter::matches(
            &doc,
            &single(Predicate::eq("genre", json!("Fiction")))
        ));
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::eq("genre", json!("History")))
        ));
    }

    #[test]
    fn test_no_type_coercion() {
        let doc = json!({"published_year": 1965});

        // String "1965" does not match integer 1965
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::eq("published_year", json!("1965")))
        ));
        assert!(PredicateFilter::matches(
            &doc,
            &single(Predicate::eq("published_year", json!(1965)))
        ));
    }

    #[test]
    fn test_range_predicates() {
        let doc = json!({"price": 15.99});

        assert!(PredicateFilter::matches(
            &doc,
            &single(Predicate::gt("price", json!(10)))
        ));
        assert!(PredicateFilter::matches(
            &doc,
            &single(Predicate::lte("price", json!(15.99)))
        ));
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::lt("price", json!(15.99)))
        ));
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::gte("price", json!(16)))
        ));
    }

    #[test]
    fn test_string_range() {
        let doc = json!({"title": "Dune"});

        assert!(PredicateFilter::matches(
            &doc,
            &single(Predicate::gt("title", json!("Cryptonomicon")))
        ));
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::gt("title", json!("Hyperion")))
        ));
    }

    #[test]
    fn test_conjunction_semantics() {
        let doc = json!({"genre": "Fiction", "in_stock": true});

        let both = Filter::all()
            .field_eq("genre", json!("Fiction"))
            .field_eq("in_stock", json!(true));
        assert!(PredicateFilter::matches(&doc, &both));

        let one_wrong = Filter::all()
            .field_eq("genre", json!("Fiction"))
            .field_eq("in_stock", json!(false));
        assert!(!PredicateFilter::matches(&doc, &one_wrong));
    }

    #[test]
    fn test_empty_filter_matches() {
        let doc = json!({"anything": 1});
        assert!(PredicateFilter::matches(&doc, &Filter::all()));
    }

    #[test]
    fn test_missing_field_no_match() {
        let doc = json!({"title": "Dune"});
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::eq("author", json!("Frank Herbert")))
        ));
        // Ne also refuses to match on a missing field
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::ne("author", json!("Frank Herbert")))
        ));
    }

    #[test]
    fn test_null_value_no_match() {
        let doc = json!({"author": null});
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::eq("author", json!("Frank Herbert")))
        ));
    }

    #[test]
    fn test_mixed_type_range_no_match() {
        let doc = json!({"price": "cheap"});
        assert!(!PredicateFilter::matches(
            &doc,
            &single(Predicate::gt("price", json!(10)))
        ));
    }
}
