use std::path::PathBuf;

use serde_json::Value;

use crate::error::Result;
use crate::extract;

/// Per-dataset extraction rule: raw rows in, one plain-text string per row out.
pub type Extractor = fn(&[Value]) -> Result<Vec<String>>;

/// One entry of the fixed dataset table. Datasets with named subsets (the two
/// ARC variants share one hub repo) carry the subset name here instead of
/// branching on entry arity.
#[derive(Clone)]
pub struct DatasetSpec {
    pub display_name: &'static str,
    pub source_id: &'static str,
    pub subset: Option<&'static str>,
    pub extractor: Extractor,
}

/// The datasets surveyed by a run, in processing order.
pub fn dataset_table() -> Vec<DatasetSpec> {
    vec![
        DatasetSpec {
            display_name: "HellaSwag",
            source_id: "Rowan/hellaswag",
            subset: None,
            extractor: extract::hellaswag,
        },
        DatasetSpec {
            display_name: "ARC-Challenge",
            source_id: "allenai/ai2_arc",
            subset: Some("ARC-Challenge"),
            extractor: extract::arc,
        },
        DatasetSpec {
            display_name: "ARC-Easy",
            source_id: "allenai/ai2_arc",
            subset: Some("ARC-Easy"),
            extractor: extract::arc,
        },
        DatasetSpec {
            display_name: "SciQA",
            source_id: "orkg/SciQA",
            subset: None,
            extractor: extract::sciqa,
        },
    ]
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub results_dir: PathBuf,
    pub tokenizer_repo: String,
    pub split: String,
}

impl AppConfig {
    pub fn new(
        results_dir: Option<PathBuf>,
        tokenizer_repo: Option<String>,
        split: Option<String>,
    ) -> Self {
        Self {
            results_dir: results_dir.unwrap_or_else(|| PathBuf::from("results")),
            tokenizer_repo: tokenizer_repo.unwrap_or_else(|| "gpt2".to_string()),
            split: split.unwrap_or_else(|| "train".to_string()),
        }
    }
}
