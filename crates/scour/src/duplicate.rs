//! Duplicate detection over the business key (email, product, order date).

use indexmap::IndexMap;

use crate::record::{CleanRecord, DuplicateTag, Issue};

/// Counts from a duplicate-identification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuplicateSummary {
    /// Groups with more than one member.
    pub groups: usize,
    /// Records tagged as duplicates (members of any such group).
    pub records: usize,
}

/// Group the record set by `(customer_email, product_id, order_date)` and tag
/// every member of a group with more than one record.
///
/// A record with any null key component never participates: null does not
/// match null, so two records that both lack an email are distinct even if
/// the rest of the key coincides. Groups are discovered in input order and
/// positions within a group follow input order. Records are never removed.
pub fn identify_duplicates(records: &mut [CleanRecord]) -> DuplicateSummary {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();

    for (idx, record) in records.iter().enumerate() {
        let (Some(email), Some(product), Some(date)) = (
            record.customer_email.as_deref(),
            record.product_id.as_deref(),
            record.order_date.as_deref(),
        ) else {
            continue;
        };

        groups
            .entry(format!("{email}|{product}|{date}"))
            .or_default()
            .push(idx);
    }

    groups.retain(|_, members| members.len() > 1);

    let mut summary = DuplicateSummary {
        groups: groups.len(),
        records: 0,
    };

    for (key, members) in &groups {
        let size = members.len();
        summary.records += size;
        for (pos, &idx) in members.iter().enumerate() {
            records[idx].duplicate = Some(DuplicateTag {
                key: key.clone(),
                position: pos + 1,
                size,
            });
            records[idx].flag(Issue::Duplicate);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: Option<&str>, product: Option<&str>, date: Option<&str>) -> CleanRecord {
        let mut rec = CleanRecord::empty();
        rec.customer_email = email.map(String::from);
        rec.product_id = product.map(String::from);
        rec.order_date = date.map(String::from);
        rec
    }

    #[test]
    fn test_same_key_grouped() {
        let mut records = vec![
            record(Some("a@b.com"), Some("Laptop"), Some("2020-01-01")),
            record(Some("c@d.com"), Some("Mouse"), Some("2020-01-02")),
            record(Some("a@b.com"), Some("Laptop"), Some("2020-01-01")),
        ];

        let summary = identify_duplicates(&mut records);

        assert_eq!(summary, DuplicateSummary { groups: 1, records: 2 });
        assert!(records[0].has_issue(Issue::Duplicate));
        assert!(!records[1].has_issue(Issue::Duplicate));
        assert!(records[2].has_issue(Issue::Duplicate));

        let first = records[0].duplicate.as_ref().unwrap();
        let second = records[2].duplicate.as_ref().unwrap();
        assert_eq!(first.key, "a@b.com|Laptop|2020-01-01");
        assert_eq!((first.position, first.size), (1, 2));
        assert_eq!((second.position, second.size), (2, 2));
    }

    #[test]
    fn test_null_email_never_matches_null_email() {
        let mut records = vec![
            record(None, Some("Laptop"), Some("2020-01-01")),
            record(None, Some("Laptop"), Some("2020-01-01")),
        ];

        let summary = identify_duplicates(&mut records);

        assert_eq!(summary, DuplicateSummary::default());
        assert!(records.iter().all(|r| r.duplicate.is_none()));
    }

    #[test]
    fn test_differing_component_not_grouped() {
        let mut records = vec![
            record(Some("a@b.com"), Some("Laptop"), Some("2020-01-01")),
            record(Some("a@b.com"), Some("Laptop"), Some("2020-01-02")),
        ];

        let summary = identify_duplicates(&mut records);
        assert_eq!(summary.groups, 0);
    }

    #[test]
    fn test_rerun_is_stable() {
        let mut records = vec![
            record(Some("a@b.com"), Some("Laptop"), Some("2020-01-01")),
            record(Some("a@b.com"), Some("Laptop"), Some("2020-01-01")),
        ];

        identify_duplicates(&mut records);
        let snapshot = records.clone();
        identify_duplicates(&mut records);

        assert_eq!(records, snapshot);
    }
}
