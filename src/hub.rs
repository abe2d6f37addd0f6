// Dataset loading from hub-hosted shard files. Rows come back as
// `serde_json::Value` so the extractors can access each dataset's own field
// layout without a shared schema.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hf_hub::{api::sync::Api, Repo, RepoType};
use parquet::file::reader::{FileReader, SerializedFileReader};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::DatasetSpec;
use crate::error::{Error, Result};

/// Produces the raw record rows for one dataset. Seam between the pipeline
/// and the hosting service.
pub trait RecordSource {
    fn load(&self, spec: &DatasetSpec) -> Result<Vec<Value>>;
}

/// Loads one split of a hub dataset by listing the repo's files, picking the
/// shard files for that split (and subset, when present), downloading them,
/// and decoding rows by file format.
pub struct HubSource {
    api: Api,
    split: String,
}

impl HubSource {
    pub fn new(split: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api: Api::new()?,
            split: split.into(),
        })
    }
}

impl RecordSource for HubSource {
    fn load(&self, spec: &DatasetSpec) -> Result<Vec<Value>> {
        let repo = self
            .api
            .repo(Repo::new(spec.source_id.to_string(), RepoType::Dataset));
        let repo_info = repo.info()?;
        let siblings: Vec<String> = repo_info
            .siblings
            .into_iter()
            .map(|s| s.rfilename)
            .collect();

        let shards = select_shards(&siblings, spec.subset, &self.split);
        if shards.is_empty() {
            return Err(Error::Dataset(format!(
                "no {} shard files found in {}",
                self.split, spec.source_id
            )));
        }

        let mut records = Vec::new();
        for shard in &shards {
            debug!("fetching shard {shard}");
            let local = repo.get(shard)?;
            read_rows(&local, &self.split, &mut records)?;
        }
        info!("loaded {} records from {}", records.len(), spec.source_id);

        Ok(records)
    }
}

/// Picks the shard files belonging to one split, and to one subset when the
/// dataset has named subsets. Hub repos lay shards out as
/// `<subset>/<split>-00000-of-00001.parquet` or `data/<split>.jsonl`; the
/// subset appears as a path component, the split in the file stem.
pub fn select_shards(siblings: &[String], subset: Option<&str>, split: &str) -> Vec<String> {
    let split_lower = split.to_lowercase();
    let mut shards: Vec<String> = siblings
        .iter()
        .filter(|path| {
            let lower = path.to_lowercase();
            let supported = lower.ends_with(".parquet")
                || lower.ends_with(".jsonl")
                || lower.ends_with(".ndjson")
                || lower.ends_with(".json");
            if !supported {
                return false;
            }

            let stem = Path::new(path.as_str())
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            if !stem.to_lowercase().contains(&split_lower) {
                return false;
            }

            match subset {
                Some(subset) => path.split('/').any(|part| part == subset),
                None => true,
            }
        })
        .cloned()
        .collect();

    shards.sort();
    shards
}

fn read_rows(path: &Path, split: &str, records: &mut Vec<Value>) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "parquet" => read_parquet_rows(path, records),
        "jsonl" | "ndjson" => read_jsonl_rows(path, records),
        "json" => read_json_rows(path, split, records),
        other => Err(Error::Dataset(format!(
            "unsupported shard format `{other}`: {}",
            path.display()
        ))),
    }
}

fn read_parquet_rows(path: &Path, records: &mut Vec<Value>) -> Result<()> {
    let file = File::open(path)?;
    let reader = SerializedFileReader::new(file)?;
    for row in reader.get_row_iter(None)? {
        records.push(row?.to_json_value());
    }
    Ok(())
}

fn read_jsonl_rows(path: &Path, records: &mut Vec<Value>) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(())
}

fn read_json_rows(path: &Path, split: &str, records: &mut Vec<Value>) -> Result<()> {
    let payload: Value = serde_json::from_reader(BufReader::new(File::open(path)?))?;

    match payload {
        Value::Array(rows) => {
            records.extend(rows);
            Ok(())
        }
        Value::Object(mut map) => {
            // Some repos wrap the rows in an object keyed by split name or a
            // conventional rows key.
            for key in [split, "rows", "data"] {
                if let Some(Value::Array(rows)) = map.remove(key) {
                    records.extend(rows);
                    return Ok(());
                }
            }
            Err(Error::Dataset(format!(
                "no row array found in {}",
                path.display()
            )))
        }
        _ => Err(Error::Dataset(format!(
            "unexpected JSON payload in {}",
            path.display()
        ))),
    }
}
