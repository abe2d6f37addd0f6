use std::cell::Cell;
use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;

use token_census::config::DatasetSpec;
use token_census::hub::RecordSource;
use token_census::tokenizer::TokenCounter;
use token_census::{extract, pipeline, Result};

/// Serves a fixed row set and counts how often it is asked to load.
struct FixedSource {
    rows: Vec<Value>,
    loads: Cell<usize>,
}

impl FixedSource {
    fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            loads: Cell::new(0),
        }
    }
}

impl RecordSource for FixedSource {
    fn load(&self, _spec: &DatasetSpec) -> Result<Vec<Value>> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.rows.clone())
    }
}

/// Token count = whitespace-separated word count, so expected totals are easy
/// to read off the fixture texts.
struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> Result<usize> {
        Ok(text.split_whitespace().count())
    }
}

fn single_dataset() -> Vec<DatasetSpec> {
    vec![DatasetSpec {
        display_name: "X",
        source_id: "example/x",
        subset: None,
        extractor: extract::hellaswag,
    }]
}

// Three texts of word lengths 2, 5, 3.
fn three_rows() -> Vec<Value> {
    vec![
        json!({"ctx": "alpha beta"}),
        json!({"ctx": "one two three four five"}),
        json!({"ctx": "red green blue"}),
    ]
}

#[test]
fn run_writes_stats_and_returns_fresh_results() {
    let dir = TempDir::new().unwrap();
    let source = FixedSource::new(three_rows());

    let fresh = pipeline::run(&single_dataset(), &source, &WordCounter, dir.path()).unwrap();

    assert_eq!(fresh.len(), 1);
    let (name, stats) = &fresh[0];
    assert_eq!(name, "X");
    assert_eq!(stats.total_tokens, 10);
    assert_eq!(stats.num_samples, 3);
    assert!((stats.average_tokens - 10.0 / 3.0).abs() < 1e-9);

    let contents = fs::read_to_string(dir.path().join("X.txt")).unwrap();
    assert_eq!(
        contents,
        "total_tokens: 10, average_tokens: 3.33, num_samples: 3\n"
    );
}

#[test]
fn second_run_skips_completed_datasets_without_loading() {
    let dir = TempDir::new().unwrap();
    let source = FixedSource::new(three_rows());

    pipeline::run(&single_dataset(), &source, &WordCounter, dir.path()).unwrap();
    assert_eq!(source.loads.get(), 1);
    let first = fs::read_to_string(dir.path().join("X.txt")).unwrap();

    let fresh = pipeline::run(&single_dataset(), &source, &WordCounter, dir.path()).unwrap();

    assert_eq!(source.loads.get(), 1, "completed dataset must not reload");
    assert!(fresh.is_empty(), "skipped datasets report nothing");
    let second = fs::read_to_string(dir.path().join("X.txt")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pre_existing_result_file_is_a_skip_not_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("X.txt"), "left over from an earlier run\n").unwrap();
    let source = FixedSource::new(three_rows());

    let fresh = pipeline::run(&single_dataset(), &source, &WordCounter, dir.path()).unwrap();

    assert_eq!(source.loads.get(), 0);
    assert!(fresh.is_empty());
}

#[test]
fn empty_dataset_yields_zero_stats() {
    let dir = TempDir::new().unwrap();
    let source = FixedSource::new(Vec::new());

    let fresh = pipeline::run(&single_dataset(), &source, &WordCounter, dir.path()).unwrap();

    let (_, stats) = &fresh[0];
    assert_eq!(stats.total_tokens, 0);
    assert_eq!(stats.num_samples, 0);
    assert_eq!(stats.average_tokens, 0.0);
}

#[test]
fn schema_error_propagates_out_of_the_run() {
    let dir = TempDir::new().unwrap();
    let source = FixedSource::new(vec![json!({"context": "wrong field"})]);

    let result = pipeline::run(&single_dataset(), &source, &WordCounter, dir.path());

    assert!(result.is_err());
    assert!(
        !dir.path().join("X.txt").exists(),
        "failed dataset must not leave a completion marker"
    );
}

#[test]
fn datasets_process_in_table_order() {
    let dir = TempDir::new().unwrap();
    let specs = vec![
        DatasetSpec {
            display_name: "First",
            source_id: "example/a",
            subset: None,
            extractor: extract::hellaswag,
        },
        DatasetSpec {
            display_name: "Second",
            source_id: "example/b",
            subset: None,
            extractor: extract::hellaswag,
        },
    ];
    let source = FixedSource::new(three_rows());

    let fresh = pipeline::run(&specs, &source, &WordCounter, dir.path()).unwrap();

    let names: Vec<_> = fresh.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["First", "Second"]);
    assert_eq!(source.loads.get(), 2);
}
