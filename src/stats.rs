use std::fmt;

use serde::{Deserialize, Serialize};

/// Token-count summary for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenStats {
    pub total_tokens: usize,
    pub average_tokens: f64,
    pub num_samples: usize,
}

impl TokenStats {
    /// Reduces per-text token counts into the summary record. An empty input
    /// yields an average of 0 rather than NaN.
    pub fn from_counts(counts: &[usize]) -> Self {
        let total_tokens: usize = counts.iter().sum();
        let num_samples = counts.len();
        let average_tokens = if num_samples == 0 {
            0.0
        } else {
            total_tokens as f64 / num_samples as f64
        };

        Self {
            total_tokens,
            average_tokens,
            num_samples,
        }
    }
}

impl fmt::Display for TokenStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total_tokens: {}, average_tokens: {:.2}, num_samples: {}",
            self.total_tokens, self.average_tokens, self.num_samples
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_sum_mean_and_count() {
        let stats = TokenStats::from_counts(&[2, 5, 3]);

        assert_eq!(stats.total_tokens, 10);
        assert_eq!(stats.num_samples, 3);
        assert!((stats.average_tokens - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_averages_to_zero() {
        let stats = TokenStats::from_counts(&[]);

        assert_eq!(stats.total_tokens, 0);
        assert_eq!(stats.num_samples, 0);
        assert_eq!(stats.average_tokens, 0.0);
        assert!(!stats.average_tokens.is_nan());
    }

    #[test]
    fn single_count_average_equals_count() {
        let stats = TokenStats::from_counts(&[7]);

        assert_eq!(stats.total_tokens, 7);
        assert_eq!(stats.average_tokens, 7.0);
        assert_eq!(stats.num_samples, 1);
    }

    #[test]
    fn display_renders_one_line_with_two_decimal_average() {
        let stats = TokenStats::from_counts(&[2, 5, 3]);

        assert_eq!(
            stats.to_string(),
            "total_tokens: 10, average_tokens: 3.33, num_samples: 3"
        );
    }
}
