pub mod config;
pub mod error;
pub mod extract;
pub mod hub;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod tokenizer;

pub use config::{dataset_table, AppConfig, DatasetSpec};
pub use error::{Error, Result};
pub use stats::TokenStats;
