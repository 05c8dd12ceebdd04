//! CLI command implementations
//!
//! The demo runs one fixed sequence of operations against a seeded
//! books collection, printing each result. A failure aborts the
//! remaining steps; the connection is released on every exit path by
//! scope.

use serde_json::{json, Value};

use crate::config::Config;
use crate::facade::CollectionFacade;
use crate::index::IndexSpec;
use crate::observability::{Logger, Severity};
use crate::pipeline::{Accumulator, GroupKey, PipelineStage};
use crate::query::{Filter, FindOptions, Predicate, Projection, SortSpec, UpdateSpec};
use crate::store::Connection;

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io;

/// The demo's one collection
const BOOKS_COLLECTION: &str = "books";

/// Dispatch a parsed CLI invocation
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Demo { uri } => demo(&load_config(uri)?),
        Command::Explain { uri } => explain(&load_config(uri)?),
    }
}

/// Resolve configuration: CLI flag wins over the environment
fn load_config(uri: Option<String>) -> CliResult<Config> {
    match uri {
        Some(uri) => Ok(Config::with_uri(uri)),
        None => Ok(Config::from_env()?),
    }
}

/// The fixed demo book set
fn seed_books() -> Vec<Value> {
    vec![
        json!({"title": "Dune", "author": "Frank Herbert", "genre": "Fiction", "published_year": 1965, "price": 10.99, "in_stock": true}),
        json!({"title": "Hyperion", "author": "Dan Simmons", "genre": "Fiction", "published_year": 1989, "price": 12.50, "in_stock": true}),
        json!({"title": "Foundation", "author": "Isaac Asimov", "genre": "Fiction", "published_year": 1951, "price": 9.99, "in_stock": false}),
        json!({"title": "Cosmos", "author": "Carl Sagan", "genre": "Science", "published_year": 1980, "price": 18.25, "in_stock": true}),
        json!({"title": "A Brief History of Time", "author": "Stephen Hawking", "genre": "Science", "published_year": 1988, "price": 15.00, "in_stock": true}),
        json!({"title": "The Selfish Gene", "author": "Richard Dawkins", "genre": "Science", "published_year": 1976, "price": 14.75, "in_stock": false}),
        json!({"title": "SPQR", "author": "Mary Beard", "genre": "History", "published_year": 2015, "price": 22.00, "in_stock": true}),
        json!({"title": "The Guns of August", "author": "Barbara Tuchman", "genre": "History", "published_year": 1962, "price": 16.40, "in_stock": true}),
        json!({"title": "1491", "author": "Charles C. Mann", "genre": "History", "published_year": 2005, "price": 17.80, "in_stock": false}),
        json!({"title": "The Hobbit", "author": "J.R.R. Tolkien", "genre": "Fantasy", "published_year": 1937, "price": 11.20, "in_stock": true}),
        json!({"title": "A Wizard of Earthsea", "author": "Ursula K. Le Guin", "genre": "Fantasy", "published_year": 1968, "price": 10.40, "in_stock": true}),
        json!({"title": "The Name of the Wind", "author": "Patrick Rothfuss", "genre": "Fantasy", "published_year": 2007, "price": 13.60, "in_stock": false}),
    ]
}

/// Run the fixed demo sequence
pub fn demo(config: &Config) -> CliResult<()> {
    let mut conn = Connection::open(&config.uri)?;
    let mut books = CollectionFacade::new(conn.collection(BOOKS_COLLECTION));

    // Seed
    io::write_section("seed books")?;
    let inserted = books.insert_many(seed_books())?;
    io::write_inserted(&inserted)?;

    // Reads
    io::write_section("all books, by title")?;
    let cursor = books.find_many(
        &Filter::all(),
        &FindOptions::new().with_sort(SortSpec::asc("title")),
    )?;
    io::write_documents(cursor)?;

    io::write_section("fiction books")?;
    let fiction = Filter::all().field_eq("genre", json!("Fiction"));
    let cursor = books.find_many(&fiction, &FindOptions::new())?;
    io::write_documents(cursor)?;

    io::write_section("published after 1980")?;
    let cursor = books.find_many(
        &Filter::all().with(Predicate::gt("published_year", json!(1980))),
        &FindOptions::new().with_sort(SortSpec::asc("published_year")),
    )?;
    io::write_documents(cursor)?;

    io::write_section("titles and authors only")?;
    let cursor = books.find_many(
        &Filter::all(),
        &FindOptions::new()
            .with_projection(Projection::include(["title", "author"]))
            .with_sort(SortSpec::asc("title"))
            .with_limit(3),
    )?;
    io::write_documents(cursor)?;

    io::write_section("three most expensive")?;
    let cursor = books.find_many(
        &Filter::all(),
        &FindOptions::new()
            .with_sort(SortSpec::desc("price"))
            .with_limit(3),
    )?;
    io::write_documents(cursor)?;

    io::write_section("page 2 of 5, by title")?;
    let cursor = books.find_many(
        &Filter::all(),
        &FindOptions::new()
            .with_sort(SortSpec::asc("title"))
            .page(2, 5),
    )?;
    io::write_documents(cursor)?;

    // Writes
    io::write_section("raise the price of Dune")?;
    let outcome = books.update_one(
        &Filter::all().field_eq("title", json!("Dune")),
        &UpdateSpec::new().set("price", json!(11.99)),
    )?;
    io::write_updated(&outcome)?;

    io::write_section("update with no match")?;
    let outcome = books.update_one(
        &Filter::all().field_eq("title", json!("Not A Book")),
        &UpdateSpec::new().set("price", json!(1.0)),
    )?;
    io::write_updated(&outcome)?;

    io::write_section("delete one out-of-stock fiction title")?;
    let out_of_stock_fiction = Filter::all()
        .field_eq("genre", json!("Fiction"))
        .field_eq("in_stock", json!(false));
    let outcome = books.delete_one(&out_of_stock_fiction)?;
    io::write_deleted(&outcome)?;

    io::write_section("delete the same target again")?;
    let outcome = books.delete_one(&out_of_stock_fiction)?;
    io::write_deleted(&outcome)?;

    // Aggregations
    io::write_section("average price per genre")?;
    let cursor = books.aggregate(&[
        PipelineStage::group(
            GroupKey::Field("genre".into()),
            vec![
                ("averagePrice".into(), Accumulator::Avg("price".into())),
                ("titles".into(), Accumulator::Count),
            ],
        ),
        PipelineStage::Sort(SortSpec::desc("averagePrice")),
    ])?;
    io::write_documents(cursor)?;

    io::write_section("titles per decade")?;
    let cursor = books.aggregate(&[
        PipelineStage::group(
            GroupKey::Decade("published_year".into()),
            vec![("titles".into(), Accumulator::Count)],
        ),
        PipelineStage::Sort(SortSpec::asc("_id")),
    ])?;
    io::write_documents(cursor)?;

    // Indexing
    io::write_section("index the genre field")?;
    let name = books.create_index(&IndexSpec::asc("genre"))?;
    io::write_index_name(&name)?;
    let again = books.create_index(&IndexSpec::asc("genre"))?;
    io::write_index_name(&again)?;

    io::write_section("explain the fiction filter")?;
    let report = books.explain(&fiction)?;
    io::write_explain(&report)?;

    Logger::log(
        Severity::Info,
        "demo_complete",
        &[("database", conn.database())],
    );
    Ok(())
}

/// One-shot explain over a freshly seeded collection
pub fn explain(config: &Config) -> CliResult<()> {
    let mut conn = Connection::open(&config.uri)?;
    let mut books = CollectionFacade::new(conn.collection(BOOKS_COLLECTION));

    books.insert_many(seed_books())?;
    books.create_index(&IndexSpec::asc("genre"))?;

    let report = books.explain(&Filter::all().field_eq("genre", json!("Fiction")))?;
    io::write_explain(&report)?;
    Ok(())
}
