//! Aggregation pipeline tests
//!
//! Runs group/sort/limit pipelines through the facade:
//! - Average-price grouping
//! - Decade bucketing on the publication year
//! - Stage order and malformed-stage rejection

use serde_json::json;

use shelfdb::facade::CollectionFacade;
use shelfdb::pipeline::{Accumulator, GroupKey, PipelineStage};
use shelfdb::query::SortSpec;
use shelfdb::store::Connection;

// =============================================================================
// Helper Functions
// =============================================================================

fn seeded() -> Connection {
    let mut conn = Connection::open("memory://testdb").unwrap();
    let mut books = CollectionFacade::new(conn.collection("books"));
    books
        .insert_many(vec![
            json!({"title": "Dune", "genre": "Fiction", "published_year": 1965, "price": 10.00}),
            json!({"title": "Hyperion", "genre": "Fiction", "published_year": 1989, "price": 20.00}),
            json!({"title": "Cosmos", "genre": "Science", "published_year": 1980, "price": 18.50}),
            json!({"title": "The Guns of August", "genre": "History", "published_year": 1962, "price": 16.40}),
            json!({"title": "SPQR", "genre": "History", "published_year": 2015, "price": 22.00}),
        ])
        .unwrap();
    conn
}

fn avg_price_by_genre() -> PipelineStage {
    PipelineStage::group(
        GroupKey::Field("genre".into()),
        vec![("averagePrice".into(), Accumulator::Avg("price".into()))],
    )
}

// =============================================================================
// Grouping
// =============================================================================

/// Two Fiction books at 10.00 and 20.00 average to exactly 15.00.
#[test]
fn test_average_price_per_genre() {
    let mut conn = seeded();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let out = books
        .aggregate(&[avg_price_by_genre()])
        .unwrap()
        .collect_all();

    let fiction = out.iter().find(|g| g["_id"] == "Fiction").unwrap();
    assert_eq!(fiction["averagePrice"], 15.0);
    assert_eq!(out.len(), 3);
}

/// Group output follows first-seen key order.
#[test]
fn test_group_order_is_first_seen() {
    let mut conn = seeded();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let out = books
        .aggregate(&[avg_price_by_genre()])
        .unwrap()
        .collect_all();

    assert_eq!(out[0]["_id"], "Fiction");
    assert_eq!(out[1]["_id"], "Science");
    assert_eq!(out[2]["_id"], "History");
}

/// Years bucket into decade labels; 1962 and 1965 share the 1960s.
#[test]
fn test_titles_per_decade() {
    let mut conn = seeded();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let out = books
        .aggregate(&[
            PipelineStage::group(
                GroupKey::Decade("published_year".into()),
                vec![("titles".into(), Accumulator::Count)],
            ),
            PipelineStage::Sort(SortSpec::asc("_id")),
        ])
        .unwrap()
        .collect_all();

    assert_eq!(out.len(), 3);
    assert_eq!(out[0]["_id"], "1960s");
    assert_eq!(out[0]["titles"], 2);
    assert_eq!(out[1]["_id"], "1980s");
    assert_eq!(out[1]["titles"], 2);
    assert_eq!(out[2]["_id"], "2010s");
    assert_eq!(out[2]["titles"], 1);
}

// =============================================================================
// Stage Order
// =============================================================================

/// Sort and limit apply to the grouped stream in order.
#[test]
fn test_sort_then_limit_after_group() {
    let mut conn = seeded();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let out = books
        .aggregate(&[
            avg_price_by_genre(),
            PipelineStage::Sort(SortSpec::desc("averagePrice")),
            PipelineStage::Limit(1),
        ])
        .unwrap()
        .collect_all();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["_id"], "History");
    assert_eq!(out[0]["averagePrice"], 19.2);
}

/// A malformed stage rejects the whole pipeline as a query error.
#[test]
fn test_malformed_stage_rejected() {
    let mut conn = seeded();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let err = books
        .aggregate(&[PipelineStage::group(
            GroupKey::Field(String::new()),
            Vec::new(),
        )])
        .unwrap_err();

    assert!(!err.is_fatal());
    assert_eq!(err.code().code(), "SHELF_QUERY_REJECTED");
}

/// An empty pipeline returns the document stream unchanged.
#[test]
fn test_empty_pipeline_is_identity() {
    let mut conn = seeded();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let out = books.aggregate(&[]).unwrap().collect_all();
    assert_eq!(out.len(), 5);
    assert_eq!(out[0]["title"], "Dune");
}
