//! Aggregation pipeline executor
//!
//! Executes stages strictly in the given order. Execution is
//! deterministic: group output follows first-seen key order, sort is
//! stable, limit truncates.

use serde_json::{Map, Number, Value};

use crate::query::DocumentSorter;

use super::errors::{PipelineError, PipelineResult};
use super::stages::{Accumulator, GroupKey, PipelineStage};

/// Executes aggregation pipelines over a document stream
pub struct PipelineExecutor;

impl PipelineExecutor {
    /// Runs all stages in order and returns the transformed stream.
    pub fn run(documents: Vec<Value>, stages: &[PipelineStage]) -> PipelineResult<Vec<Value>> {
        Self::validate(stages)?;

        let mut stream = documents;
        for stage in stages {
            stream = match stage {
                PipelineStage::Group { key, accumulators } => {
                    Self::run_group(stream, key, accumulators)
                }
                PipelineStage::Sort(sort_spec) => {
                    let mut sorted = stream;
                    DocumentSorter::sort(&mut sorted, sort_spec);
                    sorted
                }
                PipelineStage::Limit(n) => {
                    let mut truncated = stream;
                    truncated.truncate(*n);
                    truncated
                }
            };
        }
        Ok(stream)
    }

    /// Rejects malformed stages before any document is touched.
    fn validate(stages: &[PipelineStage]) -> PipelineResult<()> {
        for stage in stages {
            match stage {
                PipelineStage::Group { key, accumulators } => {
                    if key.field().is_empty() {
                        return Err(PipelineError::rejected("group", "empty key field name"));
                    }
                    for (name, acc) in accumulators {
                        if name.is_empty() {
                            return Err(PipelineError::rejected(
                                "group",
                                "empty accumulator output name",
                            ));
                        }
                        if name == "_id" {
                            return Err(PipelineError::rejected(
                                "group",
                                "accumulator output may not be named _id",
                            ));
                        }
                        if acc.field().is_some_and(str::is_empty) {
                            return Err(PipelineError::rejected(
                                "group",
                                format!("{} accumulator has an empty field name", acc.op_name()),
                            ));
                        }
                    }
                }
                PipelineStage::Sort(sort_spec) => {
                    if sort_spec.field.is_empty() {
                        return Err(PipelineError::rejected("sort", "empty sort field name"));
                    }
                }
                PipelineStage::Limit(_) => {}
            }
        }
        Ok(())
    }

    /// Groups the stream, emitting one document per distinct key in
    /// first-seen order.
    fn run_group(
        documents: Vec<Value>,
        key: &GroupKey,
        accumulators: &[(String, Accumulator)],
    ) -> Vec<Value> {
        // First-seen key order; linear scan keeps it deterministic
        let mut groups: Vec<(Value, Vec<Value>)> = Vec::new();

        for doc in documents {
            let group_key = match Self::eval_key(&doc, key) {
                Some(k) => k,
                None => continue, // Excluded from the grouping
            };

            match groups.iter_mut().find(|(k, _)| *k == group_key) {
                Some((_, members)) => members.push(doc),
                None => groups.push((group_key, vec![doc])),
            }
        }

        groups
            .into_iter()
            .map(|(group_key, members)| {
                let mut out = Map::new();
                out.insert("_id".to_string(), group_key);
                for (name, acc) in accumulators {
                    out.insert(name.clone(), Self::accumulate(&members, acc));
                }
                Value::Object(out)
            })
            .collect()
    }

    /// Evaluates the group key for a document.
    ///
    /// Returns None when the document is excluded from the grouping
    /// (decade keys over values that are not non-negative integers).
    fn eval_key(doc: &Value, key: &GroupKey) -> Option<Value> {
        match key {
            GroupKey::Field(field) => Some(doc.get(field).cloned().unwrap_or(Value::Null)),
            GroupKey::Decade(field) => {
                let year = doc.get(field)?.as_u64()?;
                Some(Value::String(format!("{}s", (year / 10) * 10)))
            }
        }
    }

    /// Computes one accumulator output over the group's members.
    fn accumulate(members: &[Value], acc: &Accumulator) -> Value {
        match acc {
            Accumulator::Count => Value::Number(Number::from(members.len() as u64)),
            Accumulator::Sum(field) => {
                let sum: f64 = Self::numeric_values(members, field).sum();
                Self::number(sum)
            }
            Accumulator::Avg(field) => {
                let values: Vec<f64> = Self::numeric_values(members, field).collect();
                if values.is_empty() {
                    Value::Null
                } else {
                    Self::number(values.iter().sum::<f64>() / values.len() as f64)
                }
            }
            Accumulator::Min(field) => Self::extreme(members, field, std::cmp::Ordering::Less),
            Accumulator::Max(field) => Self::extreme(members, field, std::cmp::Ordering::Greater),
        }
    }

    /// Numeric values of a field across the group; other types are ignored
    fn numeric_values<'a>(
        members: &'a [Value],
        field: &'a str,
    ) -> impl Iterator<Item = f64> + 'a {
        members
            .iter()
            .filter_map(move |doc| doc.get(field).and_then(Value::as_f64))
    }

    /// Smallest or largest present non-null value of a field
    fn extreme(members: &[Value], field: &str, keep: std::cmp::Ordering) -> Value {
        let mut best: Option<&Value> = None;
        for doc in members {
            let candidate = match doc.get(field) {
                Some(v) if !v.is_null() => v,
                _ => continue,
            };
            best = match best {
                None => Some(candidate),
                Some(current)
                    if DocumentSorter::compare_values(Some(candidate), Some(current)) == keep =>
                {
                    Some(candidate)
                }
                Some(current) => Some(current),
            };
        }
        best.cloned().unwrap_or(Value::Null)
    }

    /// Builds a JSON number, preferring integer representation
    fn number(value: f64) -> Value {
        if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
            Value::Number(Number::from(value as i64))
        } else {
            Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
        }
    }
}
