//! Pipeline orchestration: normalization, resolution, and the whole-set
//! statistical passes, in a fixed order.

use crate::duplicate::identify_duplicates;
use crate::error::{Result, ScourError};
use crate::normalize::Field;
use crate::record::{CleanRecord, Issue, RawRecord};
use crate::report::QualityReport;
use crate::resolve::resolve_missing_name;
use crate::stats::OutlierDetector;

/// Configuration for a cleaning run. Read once at construction and immutable
/// for the run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// IQR fence multiplier for outlier detection.
    pub fence_multiplier: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: 1.5,
        }
    }
}

impl PipelineConfig {
    /// Reject out-of-range values before any cleaning runs.
    pub fn validate(&self) -> Result<()> {
        if !self.fence_multiplier.is_finite() || self.fence_multiplier <= 0.0 {
            return Err(ScourError::Config(format!(
                "fence multiplier must be a positive number, got {}",
                self.fence_multiplier
            )));
        }
        Ok(())
    }
}

/// Result of one cleaning run: the annotated record set and its report.
#[derive(Debug, Clone)]
pub struct CleanResult {
    pub records: Vec<CleanRecord>,
    pub report: QualityReport,
}

/// The cleaning pipeline.
///
/// Stages run in a fixed order: per-record field normalization, per-record
/// missing-value resolution, then the two whole-set passes (outlier
/// detection and duplicate identification, which are independent of each
/// other), then report assembly. The pipeline does no I/O and never drops a
/// record; every detected problem becomes a flag on the record.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with a validated custom configuration.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Clean a batch of raw records.
    ///
    /// Idempotent over its own output: serializing the cleaned canonical
    /// fields and running them through again changes no value and reproduces
    /// the same flags.
    pub fn clean(&self, raw: &[RawRecord]) -> CleanResult {
        // Stage 1: per-record normalization. Each record is independent.
        let mut records: Vec<CleanRecord> = raw.iter().map(normalize_record).collect();

        // Stage 2: per-record resolution, which reads normalized fields and
        // falls back to the raw contact cells as evidence.
        for (record, raw_record) in records.iter_mut().zip(raw) {
            resolve_missing_name(record, raw_record);
        }

        // Stage 3: whole-set passes over the normalized data.
        let detector = OutlierDetector::new(self.config.fence_multiplier);

        let prices: Vec<Option<f64>> = records.iter().map(|r| r.price).collect();
        let (price_mask, price_report) = detector.detect("price", &prices);

        let quantities: Vec<Option<f64>> =
            records.iter().map(|r| r.quantity.map(|q| q as f64)).collect();
        let (quantity_mask, quantity_report) = detector.detect("quantity", &quantities);

        let totals: Vec<Option<f64>> = records.iter().map(|r| r.total_value).collect();
        let (total_mask, total_report) = detector.detect("total_value", &totals);

        for (idx, record) in records.iter_mut().enumerate() {
            if price_mask[idx] {
                record.flag(Issue::PriceOutlier);
            }
            if quantity_mask[idx] {
                record.flag(Issue::QuantityOutlier);
            }
            if total_mask[idx] {
                record.flag(Issue::TotalValueOutlier);
            }
        }

        let duplicates = identify_duplicates(&mut records);

        // Stage 4: report assembly.
        let count = |issue: Issue| records.iter().filter(|r| r.has_issue(issue)).count();
        let report = QualityReport {
            total_records: records.len(),
            names_resolved: count(Issue::NameVerified),
            unresolvable: count(Issue::Unresolvable),
            invalid_emails: count(Issue::InvalidEmail),
            invalid_phones: count(Issue::InvalidPhone),
            invalid_dates: count(Issue::InvalidDate),
            invalid_prices: count(Issue::InvalidPrice),
            invalid_quantities: count(Issue::InvalidQuantity),
            outliers: [price_report, quantity_report, total_report]
                .into_iter()
                .flatten()
                .collect(),
            duplicate_groups: duplicates.groups,
            duplicate_records: duplicates.records,
            fence_multiplier: self.config.fence_multiplier,
        };

        CleanResult { records, report }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run every field of one raw record through its normalizer.
fn normalize_record(raw: &RawRecord) -> CleanRecord {
    let mut record = CleanRecord::empty();

    for issue in &raw.carried_issues {
        record.flag(*issue);
    }

    for field in Field::ALL {
        let out = field.normalize(raw_field(raw, field));
        if let Some(issue) = out.issue {
            record.flag(issue);
        }
        match field {
            Field::Name => record.customer_name = out.value,
            Field::Email => record.customer_email = out.value,
            Field::Phone => record.customer_phone = out.value,
            Field::OrderDate => record.order_date = out.value,
            Field::ProductId => record.product_id = out.value,
            // Canonical numeric strings always re-parse.
            Field::Price => record.price = out.value.and_then(|s| s.parse().ok()),
            Field::Quantity => record.quantity = out.value.and_then(|s| s.parse().ok()),
        }
    }

    record.total_value = match (record.price, record.quantity) {
        (Some(price), Some(quantity)) => Some(price * quantity as f64),
        _ => None,
    };

    record
}

fn raw_field(raw: &RawRecord, field: Field) -> &str {
    match field {
        Field::Name => &raw.customer_name,
        Field::Email => &raw.customer_email,
        Field::Phone => &raw.customer_phone,
        Field::OrderDate => &raw.order_date,
        Field::ProductId => &raw.product_id,
        Field::Price => &raw.price,
        Field::Quantity => &raw.quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(
        name: &str,
        email: &str,
        phone: &str,
        date: &str,
        product: &str,
        price: &str,
        quantity: &str,
    ) -> RawRecord {
        RawRecord {
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            customer_phone: phone.to_string(),
            order_date: date.to_string(),
            product_id: product.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
            carried_issues: Vec::new(),
        }
    }

    #[test]
    fn test_config_rejects_bad_multiplier() {
        let bad = PipelineConfig { fence_multiplier: -1.0 };
        assert!(matches!(
            Pipeline::with_config(bad).unwrap_err(),
            ScourError::Config(_)
        ));

        let zero = PipelineConfig { fence_multiplier: 0.0 };
        assert!(Pipeline::with_config(zero).is_err());
    }

    #[test]
    fn test_end_to_end_scenario() {
        // The record from the acceptance scenario, padded with clean rows so
        // the statistical pass has a distribution to work against.
        let mut batch = vec![raw(
            "",
            "A.Smith@EXAMPLE.com",
            "(555) 123-4567",
            "03/04/2020",
            "Laptop",
            "-5",
            "0",
        )];
        for i in 0..8 {
            batch.push(raw(
                "Jane Doe",
                "jane@example.com",
                "5559876543",
                "2020-05-01",
                "Mouse",
                &format!("{}", 20 + i),
                "2",
            ));
        }

        let result = Pipeline::new().clean(&batch);
        let rec = &result.records[0];

        assert_eq!(rec.customer_name.as_deref(), Some("VERIFY: a.smith@example.com"));
        assert_eq!(rec.customer_email.as_deref(), Some("a.smith@example.com"));
        assert_eq!(rec.customer_phone.as_deref(), Some("5551234567"));
        assert_eq!(rec.order_date.as_deref(), Some("2020-03-04"));
        assert_eq!(rec.price, Some(-5.0));
        assert_eq!(rec.quantity, Some(0));
        assert!(rec.has_issue(Issue::InvalidPrice));
        assert!(rec.has_issue(Issue::InvalidQuantity));
        assert!(rec.has_issue(Issue::NameVerified));
        // -5 sits far below the 20..27 price cluster.
        assert!(rec.has_issue(Issue::PriceOutlier));
    }

    #[test]
    fn test_no_record_dropped() {
        let batch = vec![
            raw("", "", "", "junk", "", "junk", "junk"),
            raw("Jo", "jo@x.com", "5551234567", "2020-01-01", "Laptop", "10", "1"),
        ];

        let result = Pipeline::new().clean(&batch);
        assert_eq!(result.records.len(), 2);
        assert!(result.records[0].has_issue(Issue::Unresolvable));
        assert_eq!(result.report.unresolvable, 1);
    }

    #[test]
    fn test_malformed_contact_still_resolves_name() {
        let batch = vec![raw("", "bob#gmail.com", "", "2020-01-01", "X", "1", "1")];

        let result = Pipeline::new().clean(&batch);
        let rec = &result.records[0];

        assert_eq!(rec.customer_name.as_deref(), Some("VERIFY: bob#gmail.com"));
        assert!(rec.has_issue(Issue::InvalidEmail));
        assert!(rec.has_issue(Issue::NameVerified));
        assert!(!rec.has_issue(Issue::Unresolvable));
        assert_eq!(result.report.unresolvable, 0);
    }

    #[test]
    fn test_total_value_outliers_detected() {
        // Both factors and their product are extreme for this row.
        let mut batch = vec![raw("Zed Quo", "z@x.com", "", "2020-02-02", "Z", "1000", "10")];
        for i in 0..8 {
            batch.push(raw(
                "Jane Doe",
                "jane@example.com",
                "5559876543",
                "2020-05-01",
                "Mouse",
                &format!("{}", 20 + i),
                "2",
            ));
        }

        let result = Pipeline::new().clean(&batch);
        let rec = &result.records[0];

        assert_eq!(rec.total_value, Some(10000.0));
        assert!(rec.has_issue(Issue::TotalValueOutlier));

        let total = result
            .report
            .outliers
            .iter()
            .find(|f| f.field == "total_value")
            .unwrap();
        assert_eq!(total.observed, 9);
        assert_eq!(total.outliers, 1);
    }

    #[test]
    fn test_total_value_null_when_factor_missing() {
        let batch = vec![raw("Jo Na", "jo@x.com", "", "2020-01-01", "X", "10", "")];

        let result = Pipeline::new().clean(&batch);
        assert_eq!(result.records[0].price, Some(10.0));
        assert_eq!(result.records[0].quantity, None);
        assert_eq!(result.records[0].total_value, None);
    }

    #[test]
    fn test_report_counts() {
        let batch = vec![
            raw("a b", "bad-email", "123", "13/13/2021", "X", "1", "1"),
            raw("c d", "ok@x.com", "5551234567", "2020-01-01", "X", "2", "1"),
        ];

        let report = Pipeline::new().clean(&batch).report;
        assert_eq!(report.total_records, 2);
        assert_eq!(report.invalid_emails, 1);
        assert_eq!(report.invalid_phones, 1);
        assert_eq!(report.invalid_dates, 1);
    }

    #[test]
    fn test_duplicates_share_group() {
        let batch = vec![
            raw("a b", "a@x.com", "", "2020-01-01", "Laptop", "10", "1"),
            raw("c d", "a@x.com", "", "01/01/2020", "Laptop", "12", "1"),
        ];

        let result = Pipeline::new().clean(&batch);
        assert_eq!(result.report.duplicate_groups, 1);
        assert_eq!(result.report.duplicate_records, 2);

        let tag = result.records[0].duplicate.as_ref().unwrap();
        assert_eq!(tag.key, "a@x.com|Laptop|2020-01-01");
    }
}
