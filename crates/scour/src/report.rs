//! Quality report assembled by the pipeline.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::stats::FieldOutlierReport;

/// Structured summary of one cleaning run: counts, percentages, and the
/// fence bounds used for outlier detection. Serializable as JSON and
/// renderable as plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Records processed (none are ever dropped).
    pub total_records: usize,
    /// Missing names filled with a `VERIFY:` marker.
    pub names_resolved: usize,
    /// Records with a missing name and no contact evidence.
    pub unresolvable: usize,
    pub invalid_emails: usize,
    pub invalid_phones: usize,
    pub invalid_dates: usize,
    pub invalid_prices: usize,
    pub invalid_quantities: usize,
    /// Per-field outlier findings (fields with no observed values omitted).
    pub outliers: Vec<FieldOutlierReport>,
    /// Duplicate groups found.
    pub duplicate_groups: usize,
    /// Records belonging to any duplicate group.
    pub duplicate_records: usize,
    /// Fence multiplier the run was configured with.
    pub fence_multiplier: f64,
}

impl QualityReport {
    /// Render the report as plain text for terminals and logs.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let pct = |n: usize| {
            if self.total_records == 0 {
                0.0
            } else {
                (n as f64 / self.total_records as f64) * 100.0
            }
        };

        let _ = writeln!(out, "Quality report ({} records)", self.total_records);
        let _ = writeln!(
            out,
            "  names resolved:     {} ({:.1}%)",
            self.names_resolved,
            pct(self.names_resolved)
        );
        let _ = writeln!(
            out,
            "  unresolvable:       {} ({:.1}%)",
            self.unresolvable,
            pct(self.unresolvable)
        );
        let _ = writeln!(out, "  invalid emails:     {}", self.invalid_emails);
        let _ = writeln!(out, "  invalid phones:     {}", self.invalid_phones);
        let _ = writeln!(out, "  invalid dates:      {}", self.invalid_dates);
        let _ = writeln!(out, "  invalid prices:     {}", self.invalid_prices);
        let _ = writeln!(out, "  invalid quantities: {}", self.invalid_quantities);
        let _ = writeln!(
            out,
            "  duplicates:         {} records in {} groups",
            self.duplicate_records, self.duplicate_groups
        );

        for field in &self.outliers {
            let _ = writeln!(
                out,
                "  {} outliers: {} of {} ({:.1}%), fences [{:.2}, {:.2}] (q1={:.2}, q3={:.2}, iqr={:.2}, k={})",
                field.field,
                field.outliers,
                field.observed,
                field.percentage,
                field.lower_fence,
                field.upper_fence,
                field.q1,
                field.q3,
                field.iqr,
                self.fence_multiplier
            );
        }

        out
    }
}
