//! Pagination tests
//!
//! Skip/limit paging over a sorted result set:
//! - Page boundaries land exactly where the sort order says
//! - Pages past the end come back short or empty, never as errors

use serde_json::{json, Value};

use shelfdb::facade::CollectionFacade;
use shelfdb::query::{Filter, FindOptions, SortSpec};
use shelfdb::store::Connection;

// =============================================================================
// Helper Functions
// =============================================================================

/// Twelve books titled book-01 .. book-12, inserted out of title order
fn seeded_twelve() -> Connection {
    let mut conn = Connection::open("memory://testdb").unwrap();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let docs: Vec<Value> = [7, 1, 12, 3, 9, 5, 11, 2, 8, 4, 10, 6]
        .iter()
        .map(|n| {
            json!({
                "title": format!("book-{:02}", n),
                "genre": "Fiction",
                "price": 5.0 + *n as f64,
            })
        })
        .collect();
    books.insert_many(docs).unwrap();
    conn
}

fn titles(page: Vec<Value>) -> Vec<String> {
    page.iter()
        .map(|d| d["title"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Page Boundaries
// =============================================================================

/// Page 2 at size 5 over 12 documents returns exactly the 6th-10th
/// documents in the sort order.
#[test]
fn test_page_two_of_twelve() {
    let mut conn = seeded_twelve();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let page = books
        .find_many(
            &Filter::all(),
            &FindOptions::new()
                .with_sort(SortSpec::asc("title"))
                .page(2, 5),
        )
        .unwrap()
        .collect_all();

    assert_eq!(
        titles(page),
        vec!["book-06", "book-07", "book-08", "book-09", "book-10"]
    );
}

/// The last page is short; pages past the end are empty.
#[test]
fn test_final_and_past_the_end_pages() {
    let mut conn = seeded_twelve();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let last = books
        .find_many(
            &Filter::all(),
            &FindOptions::new()
                .with_sort(SortSpec::asc("title"))
                .page(3, 5),
        )
        .unwrap()
        .collect_all();
    assert_eq!(titles(last), vec!["book-11", "book-12"]);

    let beyond = books
        .find_many(
            &Filter::all(),
            &FindOptions::new()
                .with_sort(SortSpec::asc("title"))
                .page(4, 5),
        )
        .unwrap();
    assert_eq!(beyond.count(), 0);
}

/// Consecutive pages tile the full set with no overlap and no gaps.
#[test]
fn test_pages_tile_the_collection() {
    let mut conn = seeded_twelve();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let mut seen: Vec<String> = Vec::new();
    for page_number in 1..=3 {
        let page = books
            .find_many(
                &Filter::all(),
                &FindOptions::new()
                    .with_sort(SortSpec::asc("title"))
                    .page(page_number, 5),
            )
            .unwrap()
            .collect_all();
        seen.extend(titles(page));
    }

    let expected: Vec<String> = (1..=12).map(|n| format!("book-{:02}", n)).collect();
    assert_eq!(seen, expected);
}

/// Skip alone drops the head of the sorted stream; limit alone keeps it.
#[test]
fn test_skip_and_limit_independently() {
    let mut conn = seeded_twelve();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let tail = books
        .find_many(
            &Filter::all(),
            &FindOptions::new()
                .with_sort(SortSpec::asc("title"))
                .with_skip(10),
        )
        .unwrap()
        .collect_all();
    assert_eq!(titles(tail), vec!["book-11", "book-12"]);

    let head = books
        .find_many(
            &Filter::all(),
            &FindOptions::new()
                .with_sort(SortSpec::asc("title"))
                .with_limit(2),
        )
        .unwrap()
        .collect_all();
    assert_eq!(titles(head), vec!["book-01", "book-02"]);
}

/// Without a sort, pages follow insertion order.
#[test]
fn test_unsorted_pages_follow_insertion_order() {
    let mut conn = seeded_twelve();
    let mut books = CollectionFacade::new(conn.collection("books"));

    let page = books
        .find_many(&Filter::all(), &FindOptions::new().page(1, 3))
        .unwrap()
        .collect_all();

    assert_eq!(titles(page), vec!["book-07", "book-01", "book-12"]);
}
