//! Membership differ.
//!
//! Memberships are append-only: the differ only ever reports contributors to
//! add. A contributor present remotely but absent from the row is left alone.

use populator_core::NameId;

/// Contributors in `desired` that are not in `existing`, in `desired` order.
///
/// An unreported existing list (`None`) is treated as empty. Matching is
/// exact and case-sensitive.
pub fn contributors_to_add(existing: Option<&[NameId]>, desired: &[NameId]) -> Vec<NameId> {
    let existing = existing.unwrap_or_default();
    desired
        .iter()
        .filter(|candidate| !existing.contains(candidate))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(raw: &[&str]) -> Vec<NameId> {
        raw.iter().map(|s| NameId::from(*s)).collect()
    }

    #[rstest]
    #[case(&["a", "b"], &["b", "c", "a", "d"], &["c", "d"])]
    #[case(&[], &["x", "y"], &["x", "y"])]
    #[case(&["a"], &[], &[])]
    #[case(&["a", "b"], &["a", "b"], &[])]
    #[case(&["Acme"], &["acme", "Acme"], &["acme"])]
    fn adds_only_missing_in_desired_order(
        #[case] existing: &[&str],
        #[case] desired: &[&str],
        #[case] expected: &[&str],
    ) {
        let existing = ids(existing);
        let result = contributors_to_add(Some(&existing), &ids(desired));
        assert_eq!(result, ids(expected));
        assert!(result.iter().all(|id| !existing.contains(id)));
    }

    #[test]
    fn unreported_existing_adds_everything() {
        let desired = ids(&["acme", "globex"]);
        assert_eq!(contributors_to_add(None, &desired), desired);
    }

    #[test]
    fn never_removes_extra_existing() {
        let existing = ids(&["old", "older"]);
        assert!(contributors_to_add(Some(&existing), &ids(&["old"])).is_empty());
    }
}
