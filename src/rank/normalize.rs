//! Score normalization for search-time blending
//!
//! Raw rank values cluster near zero on real graphs, so they are first
//! stretched with `ln(1 + raw * scaling_factor)` and then min-max scaled
//! into `[0, 1]`. When every page ends up with the same value (single page,
//! or a perfectly symmetric graph) there is no spread to scale, and every
//! score maps to 0.0.

/// Maps raw rank values into `[0, 1]`
///
/// Applies log-scaling followed by min-max normalization. The output
/// preserves the relative order of the input. If all inputs are equal the
/// whole output is 0.0.
///
/// # Arguments
///
/// * `raw` - Raw rank values, one per page
/// * `scaling_factor` - Multiplier applied before the log transform
pub fn normalize_scores(raw: &[f64], scaling_factor: f64) -> Vec<f64> {
    let scaled: Vec<f64> = raw.iter().map(|r| (r * scaling_factor).ln_1p()).collect();

    let min = scaled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;

    if !spread.is_finite() || spread < f64::EPSILON {
        return vec![0.0; raw.len()];
    }

    scaled.iter().map(|s| (s - min) / spread).collect()
}
