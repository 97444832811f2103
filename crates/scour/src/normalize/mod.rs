//! Per-field normalization: pure functions from raw text to canonical form.

mod fields;

pub use fields::{
    VERIFY_PREFIX, normalize_date, normalize_email, normalize_name, normalize_phone,
    normalize_price, normalize_product_id, normalize_quantity,
};

use crate::record::Issue;

/// Result of normalizing one field: a canonical value (or the null sentinel)
/// plus the issue to attach when the input failed its rule. Normalizers are
/// total; they never error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Canonical text form, `None` for missing or unrecoverable input.
    pub value: Option<String>,
    /// Issue to flag on the record, if any.
    pub issue: Option<Issue>,
}

impl Normalized {
    /// A missing value with no issue attached.
    pub fn null() -> Self {
        Self { value: None, issue: None }
    }

    /// A canonical value with no issue attached.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            issue: None,
        }
    }

    /// An invalid input: nulled value plus an issue flag.
    pub fn invalid(issue: Issue) -> Self {
        Self {
            value: None,
            issue: Some(issue),
        }
    }

    /// A suspect value that is preserved but flagged for review.
    pub fn flagged(value: impl Into<String>, issue: Issue) -> Self {
        Self {
            value: Some(value.into()),
            issue: Some(issue),
        }
    }
}

/// The fields of an order record, in input column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    OrderDate,
    ProductId,
    Price,
    Quantity,
}

impl Field {
    /// All fields, in column order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::OrderDate,
        Field::ProductId,
        Field::Price,
        Field::Quantity,
    ];

    /// Input column name for this field.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Name => "customer_name",
            Field::Email => "customer_email",
            Field::Phone => "customer_phone",
            Field::OrderDate => "order_date",
            Field::ProductId => "product_id",
            Field::Price => "price",
            Field::Quantity => "quantity",
        }
    }

    /// Normalize one raw value through this field's rule.
    pub fn normalize(&self, raw: &str) -> Normalized {
        match self {
            Field::Name => normalize_name(raw),
            Field::Email => normalize_email(raw),
            Field::Phone => normalize_phone(raw),
            Field::OrderDate => normalize_date(raw),
            Field::ProductId => normalize_product_id(raw),
            Field::Price => normalize_price(raw),
            Field::Quantity => normalize_quantity(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_direct_call() {
        for field in Field::ALL {
            // The dispatch table and the free functions must agree.
            let direct = match field {
                Field::Name => normalize_name(" ann  lee "),
                Field::Email => normalize_email(" ann  lee "),
                Field::Phone => normalize_phone(" ann  lee "),
                Field::OrderDate => normalize_date(" ann  lee "),
                Field::ProductId => normalize_product_id(" ann  lee "),
                Field::Price => normalize_price(" ann  lee "),
                Field::Quantity => normalize_quantity(" ann  lee "),
            };
            assert_eq!(field.normalize(" ann  lee "), direct);
        }
    }

    #[test]
    fn test_column_names() {
        assert_eq!(Field::Name.column(), "customer_name");
        assert_eq!(Field::Quantity.column(), "quantity");
    }
}
