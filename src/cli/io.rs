//! Console output for CLI commands
//!
//! Results go to stdout: one JSON object per document line, labeled
//! lines for outcome records. Logs go to stderr, so stdout stays
//! parseable.

use std::io::{self, Write};

use serde_json::Value;

use crate::facade::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::store::ExplainReport;

use super::errors::CliResult;

/// Write a section heading
pub fn write_section(title: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "--- {} ---", title)?;
    Ok(())
}

/// Write one document as a JSON line
pub fn write_document(document: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, document).map_err(io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}

/// Write every document from an iterator, returning the count
pub fn write_documents<I>(documents: I) -> CliResult<usize>
where
    I: Iterator<Item = Value>,
{
    let mut count = 0;
    for doc in documents {
        write_document(&doc)?;
        count += 1;
    }
    if count == 0 {
        writeln!(io::stdout(), "(no documents)")?;
    }
    Ok(count)
}

/// Write an insert outcome
pub fn write_inserted(outcome: &InsertOutcome) -> CliResult<()> {
    writeln!(io::stdout(), "inserted: {}", outcome.inserted_count)?;
    Ok(())
}

/// Write an update outcome
pub fn write_updated(outcome: &UpdateOutcome) -> CliResult<()> {
    writeln!(
        io::stdout(),
        "matched: {} modified: {}",
        outcome.matched_count, outcome.modified_count
    )?;
    Ok(())
}

/// Write a delete outcome
pub fn write_deleted(outcome: &DeleteOutcome) -> CliResult<()> {
    writeln!(io::stdout(), "deleted: {}", outcome.deleted_count)?;
    Ok(())
}

/// Write an index name
pub fn write_index_name(name: &str) -> CliResult<()> {
    writeln!(io::stdout(), "index: {}", name)?;
    Ok(())
}

/// Write an explain report
pub fn write_explain(report: &ExplainReport) -> CliResult<()> {
    write!(io::stdout(), "{}", report)?;
    Ok(())
}
