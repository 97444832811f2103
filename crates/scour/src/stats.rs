//! Statistical outlier detection over numeric fields.
//!
//! Quartiles are exact (sorted column, linear interpolation between ranks),
//! not approximated, so the fence test is a precise predicate on the data:
//! a value is an outlier iff it falls strictly outside
//! `[Q1 - k*IQR, Q3 + k*IQR]`. Detection only flags; nothing is removed.

use serde::{Deserialize, Serialize};

/// Exact first and third quartiles of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Compute quartiles from the non-null values of a column. Returns `None`
    /// for an empty column. Uses linear interpolation between the two nearest
    /// ranks (the pandas/NumPy default).
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            q1: percentile(&sorted, 0.25),
            q3: percentile(&sorted, 0.75),
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower fence for multiplier `k`. Not clamped at zero.
    pub fn lower_fence(&self, k: f64) -> f64 {
        self.q1 - k * self.iqr()
    }

    /// Upper fence for multiplier `k`.
    pub fn upper_fence(&self, k: f64) -> f64 {
        self.q3 + k * self.iqr()
    }

    /// Check if a value lies outside the fences.
    pub fn is_outlier(&self, value: f64, k: f64) -> bool {
        value < self.lower_fence(k) || value > self.upper_fence(k)
    }
}

/// Interpolated percentile of a sorted slice, `p` in `[0, 1]`.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Aggregate outlier findings for one numeric field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOutlierReport {
    /// Field name.
    pub field: String,
    /// Non-null values observed.
    pub observed: usize,
    /// Values flagged as outliers.
    pub outliers: usize,
    /// Outliers as a percentage of observed values.
    pub percentage: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

/// IQR-fence outlier detector for a whole-set pass over one field.
pub struct OutlierDetector {
    multiplier: f64,
}

impl OutlierDetector {
    /// Create a detector with the given fence multiplier.
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    /// Scan one field across the record set. `values[i]` is record i's value,
    /// `None` where the field is null. Returns a per-record outlier mask
    /// (always `false` for nulls) and the aggregate report, or `None` if the
    /// field has no observed values.
    pub fn detect(
        &self,
        field: &str,
        values: &[Option<f64>],
    ) -> (Vec<bool>, Option<FieldOutlierReport>) {
        let observed: Vec<f64> = values.iter().filter_map(|v| *v).collect();

        let Some(quartiles) = Quartiles::compute(&observed) else {
            return (vec![false; values.len()], None);
        };

        let mask: Vec<bool> = values
            .iter()
            .map(|v| v.is_some_and(|x| quartiles.is_outlier(x, self.multiplier)))
            .collect();

        let outliers = mask.iter().filter(|&&m| m).count();
        let report = FieldOutlierReport {
            field: field.to_string(),
            observed: observed.len(),
            outliers,
            percentage: (outliers as f64 / observed.len() as f64) * 100.0,
            q1: quartiles.q1,
            q3: quartiles.q3,
            iqr: quartiles.iqr(),
            lower_fence: quartiles.lower_fence(self.multiplier),
            upper_fence: quartiles.upper_fence(self.multiplier),
        };

        (mask, Some(report))
    }
}
