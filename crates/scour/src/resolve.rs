//! Missing-value resolution for identity fields.

use crate::normalize::VERIFY_PREFIX;
use crate::record::{CleanRecord, Issue, RawRecord, is_null_value};

/// Fill a missing name from contact evidence already on the record.
///
/// Preference order: valid (normalized) email, valid phone, then a raw
/// email or phone that is present but failed its syntax rule. Even a
/// malformed contact value still identifies the record well enough for a
/// reviewer to chase. The fill is the literal marker `VERIFY: <evidence>`;
/// no value is ever fabricated. A record with no evidence at all keeps a
/// null name and is tagged unresolvable. Names already carrying the marker
/// are re-tagged without modification so flags reproduce on a second pass.
pub fn resolve_missing_name(record: &mut CleanRecord, raw: &RawRecord) {
    if let Some(name) = &record.customer_name {
        if name.starts_with(VERIFY_PREFIX) {
            record.flag(Issue::NameVerified);
        }
        return;
    }

    let evidence = record
        .customer_email
        .as_deref()
        .or(record.customer_phone.as_deref())
        .or_else(|| present(&raw.customer_email))
        .or_else(|| present(&raw.customer_phone));

    match evidence {
        Some(e) => {
            let marker = format!("{VERIFY_PREFIX} {e}");
            record.customer_name = Some(marker);
            record.flag(Issue::NameVerified);
        }
        None => record.flag(Issue::Unresolvable),
    }
}

/// A raw cell counts as evidence when it is not a null sentinel.
fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if is_null_value(trimmed) { None } else { Some(trimmed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(email: Option<&str>, phone: Option<&str>) -> CleanRecord {
        let mut rec = CleanRecord::empty();
        rec.customer_email = email.map(String::from);
        rec.customer_phone = phone.map(String::from);
        rec
    }

    #[test]
    fn test_email_preferred_over_phone() {
        let mut rec = record_with(Some("a.smith@example.com"), Some("5551234567"));
        resolve_missing_name(&mut rec, &RawRecord::default());

        assert_eq!(
            rec.customer_name.as_deref(),
            Some("VERIFY: a.smith@example.com")
        );
        assert!(rec.has_issue(Issue::NameVerified));
    }

    #[test]
    fn test_phone_as_fallback_evidence() {
        let mut rec = record_with(None, Some("5551234567"));
        resolve_missing_name(&mut rec, &RawRecord::default());

        assert_eq!(rec.customer_name.as_deref(), Some("VERIFY: 5551234567"));
    }

    #[test]
    fn test_malformed_raw_contact_is_still_evidence() {
        // The email failed its syntax rule and was nulled, but the raw
        // value is present and names the record.
        let mut rec = record_with(None, None);
        let raw = RawRecord {
            customer_email: "bob#gmail.com".to_string(),
            ..RawRecord::default()
        };
        resolve_missing_name(&mut rec, &raw);

        assert_eq!(rec.customer_name.as_deref(), Some("VERIFY: bob#gmail.com"));
        assert!(rec.has_issue(Issue::NameVerified));
        assert!(!rec.has_issue(Issue::Unresolvable));
    }

    #[test]
    fn test_valid_evidence_preferred_over_raw() {
        let mut rec = record_with(Some("a@b.com"), None);
        let raw = RawRecord {
            customer_phone: "junk-phone".to_string(),
            ..RawRecord::default()
        };
        resolve_missing_name(&mut rec, &raw);

        assert_eq!(rec.customer_name.as_deref(), Some("VERIFY: a@b.com"));
    }

    #[test]
    fn test_sentinel_raw_contact_is_not_evidence() {
        let mut rec = record_with(None, None);
        let raw = RawRecord {
            customer_email: "N/A".to_string(),
            customer_phone: "  ".to_string(),
            ..RawRecord::default()
        };
        resolve_missing_name(&mut rec, &raw);

        assert_eq!(rec.customer_name, None);
        assert!(rec.has_issue(Issue::Unresolvable));
    }

    #[test]
    fn test_present_name_untouched() {
        let mut rec = record_with(Some("a@b.com"), None);
        rec.customer_name = Some("Ann Lee".to_string());
        resolve_missing_name(&mut rec, &RawRecord::default());

        assert_eq!(rec.customer_name.as_deref(), Some("Ann Lee"));
        assert!(rec.issues.is_empty());
    }

    #[test]
    fn test_verify_marker_retagged_not_rewritten() {
        let mut rec = record_with(Some("a@b.com"), None);
        rec.customer_name = Some("VERIFY: 5551234567".to_string());
        resolve_missing_name(&mut rec, &RawRecord::default());

        // Evidence is not re-selected; the existing marker stands.
        assert_eq!(rec.customer_name.as_deref(), Some("VERIFY: 5551234567"));
        assert!(rec.has_issue(Issue::NameVerified));
    }
}
