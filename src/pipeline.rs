use std::path::Path;

use tracing::debug;

use crate::config::DatasetSpec;
use crate::error::Result;
use crate::hub::RecordSource;
use crate::report;
use crate::stats::TokenStats;
use crate::tokenizer::TokenCounter;

/// One sequential pass over the dataset table: skip-if-done, load, extract,
/// count each text, aggregate, write. Returns the stats computed in this run,
/// in table order. A dataset whose result file already exists is skipped
/// before any load happens.
pub fn run(
    specs: &[DatasetSpec],
    source: &dyn RecordSource,
    counter: &dyn TokenCounter,
    results_dir: &Path,
) -> Result<Vec<(String, TokenStats)>> {
    report::ensure_results_dir(results_dir)?;

    let mut fresh = Vec::new();
    for spec in specs {
        println!("Processing {}...", spec.display_name);

        let path = report::result_path(results_dir, spec.display_name);
        if path.exists() {
            debug!("{} already present, skipping", path.display());
            continue;
        }

        let records = source.load(spec)?;
        let texts = (spec.extractor)(&records)?;

        let mut counts = Vec::with_capacity(texts.len());
        for text in &texts {
            counts.push(counter.count(text)?);
        }

        let stats = TokenStats::from_counts(&counts);
        report::write_result(results_dir, spec.display_name, &stats)?;
        fresh.push((spec.display_name.to_string(), stats));
    }

    Ok(fresh)
}
