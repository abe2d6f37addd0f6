use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::stats::TokenStats;

/// Result file for one dataset. Its presence is the sole completion marker:
/// a dataset whose file exists is skipped entirely on later runs.
pub fn result_path(results_dir: &Path, display_name: &str) -> PathBuf {
    results_dir.join(format!("{display_name}.txt"))
}

pub fn ensure_results_dir(results_dir: &Path) -> Result<()> {
    fs::create_dir_all(results_dir)?;
    Ok(())
}

/// Writes the stats record as a single human-readable line.
pub fn write_result(results_dir: &Path, display_name: &str, stats: &TokenStats) -> Result<()> {
    fs::write(result_path(results_dir, display_name), format!("{stats}\n"))?;
    Ok(())
}

/// Thousands-separated rendering of a count.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Summary block for every dataset computed in this run, in processing order.
/// Skipped datasets print nothing.
pub fn print_summary(results: &[(String, TokenStats)]) {
    println!("\nResults:");
    for (name, stats) in results {
        println!("\nDataset: {name}");
        println!("Total tokens: {}", group_thousands(stats.total_tokens));
        println!("Average tokens per sample: {:.2}", stats.average_tokens);
        println!("Number of samples: {}", group_thousands(stats.num_samples));
    }
}
