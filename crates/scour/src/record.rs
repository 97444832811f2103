//! Record model: raw input rows, cleaned rows, and issue flags.

use serde::{Deserialize, Serialize};

/// One order row exactly as read from the input, all fields as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub order_date: String,
    pub product_id: String,
    pub price: String,
    pub quantity: String,
    /// Flags parsed from the optional `issues` column of a previous cleaning
    /// run. Carried forward so re-cleaning cleaned output reproduces the
    /// exact flag set (cleaning never discards information).
    pub carried_issues: Vec<Issue>,
}

/// Check if a value represents a missing/null value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("missing")
        || trimmed.eq_ignore_ascii_case("pending")
        || trimmed == "."
        || trimmed == "-"
}

/// A non-destructive annotation attached to a record during cleaning.
///
/// Declaration order is the serialization order in the `issues` output
/// column, so flag lists are stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    /// Email failed the syntax rule; field nulled.
    InvalidEmail,
    /// Phone did not reduce to a 10-digit number; field nulled.
    InvalidPhone,
    /// No candidate date format matched; field nulled.
    InvalidDate,
    /// Price unparseable (nulled) or negative (preserved).
    InvalidPrice,
    /// Quantity unparseable (nulled) or zero/negative (preserved).
    InvalidQuantity,
    /// Name was missing; filled with `VERIFY: <evidence>`.
    NameVerified,
    /// Name missing and no contact evidence exists.
    Unresolvable,
    /// Price outside the IQR fences.
    PriceOutlier,
    /// Quantity outside the IQR fences.
    QuantityOutlier,
    /// Derived order total (price x quantity) outside the IQR fences.
    TotalValueOutlier,
    /// Member of a duplicate group.
    Duplicate,
}

impl Issue {
    /// Parse a token from the CSV `issues` column. Unknown tokens are `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "invalid_email" => Some(Issue::InvalidEmail),
            "invalid_phone" => Some(Issue::InvalidPhone),
            "invalid_date" => Some(Issue::InvalidDate),
            "invalid_price" => Some(Issue::InvalidPrice),
            "invalid_quantity" => Some(Issue::InvalidQuantity),
            "name_verified" => Some(Issue::NameVerified),
            "unresolvable" => Some(Issue::Unresolvable),
            "price_outlier" => Some(Issue::PriceOutlier),
            "quantity_outlier" => Some(Issue::QuantityOutlier),
            "total_value_outlier" => Some(Issue::TotalValueOutlier),
            "duplicate" => Some(Issue::Duplicate),
            _ => None,
        }
    }

    /// Stable text token used in the CSV `issues` column.
    pub fn token(&self) -> &'static str {
        match self {
            Issue::InvalidEmail => "invalid_email",
            Issue::InvalidPhone => "invalid_phone",
            Issue::InvalidDate => "invalid_date",
            Issue::InvalidPrice => "invalid_price",
            Issue::InvalidQuantity => "invalid_quantity",
            Issue::NameVerified => "name_verified",
            Issue::Unresolvable => "unresolvable",
            Issue::PriceOutlier => "price_outlier",
            Issue::QuantityOutlier => "quantity_outlier",
            Issue::TotalValueOutlier => "total_value_outlier",
            Issue::Duplicate => "duplicate",
        }
    }
}

/// Membership details for a record in a duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateTag {
    /// Group key as `email|product|date`.
    pub key: String,
    /// 1-based position within the group, in input order.
    pub position: usize,
    /// Total records in the group.
    pub size: usize,
}

impl DuplicateTag {
    /// Render as `key (position/size)` for the `duplicate_group` column.
    pub fn render(&self) -> String {
        format!("{} ({}/{})", self.key, self.position, self.size)
    }
}

/// One order row after cleaning: canonical fields plus flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    /// Canonical `YYYY-MM-DD`.
    pub order_date: Option<String>,
    pub product_id: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    /// Derived `price * quantity`, present when both factors are.
    pub total_value: Option<f64>,
    /// Detected issues, deduplicated, in `Issue` declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    /// Duplicate group membership, when detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<DuplicateTag>,
}

impl CleanRecord {
    /// Create an empty record with no fields and no issues.
    pub fn empty() -> Self {
        Self {
            customer_name: None,
            customer_email: None,
            customer_phone: None,
            order_date: None,
            product_id: None,
            price: None,
            quantity: None,
            total_value: None,
            issues: Vec::new(),
            duplicate: None,
        }
    }

    /// Add an issue, keeping the list deduplicated and ordered.
    pub fn flag(&mut self, issue: Issue) {
        if let Err(pos) = self.issues.binary_search(&issue) {
            self.issues.insert(pos, issue);
        }
    }

    /// Check whether an issue is present.
    pub fn has_issue(&self, issue: Issue) -> bool {
        self.issues.binary_search(&issue).is_ok()
    }

    /// Render the issue list for the CSV `issues` column.
    pub fn issues_token(&self) -> String {
        self.issues
            .iter()
            .map(|i| i.token())
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_value() {
        assert!(is_null_value(""));
        assert!(is_null_value("  "));
        assert!(is_null_value("NA"));
        assert!(is_null_value("n/a"));
        assert!(is_null_value("NaN"));
        assert!(is_null_value("pending"));
        assert!(is_null_value("missing"));
        assert!(is_null_value("."));
        assert!(!is_null_value("value"));
        assert!(!is_null_value("0"));
    }

    #[test]
    fn test_flag_dedup_and_order() {
        let mut rec = CleanRecord::empty();
        rec.flag(Issue::PriceOutlier);
        rec.flag(Issue::InvalidEmail);
        rec.flag(Issue::PriceOutlier);

        assert_eq!(rec.issues, vec![Issue::InvalidEmail, Issue::PriceOutlier]);
        assert_eq!(rec.issues_token(), "invalid_email;price_outlier");
    }

    #[test]
    fn test_duplicate_tag_render() {
        let tag = DuplicateTag {
            key: "a@b.com|Laptop|2020-03-04".to_string(),
            position: 2,
            size: 3,
        };
        assert_eq!(tag.render(), "a@b.com|Laptop|2020-03-04 (2/3)");
    }
}
