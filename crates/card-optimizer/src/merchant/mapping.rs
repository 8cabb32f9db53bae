/// Well-known merchants matched by substring when the local table has no entry.
const FALLBACK_MERCHANTS: &[(&str, &str, &str)] = &[
    ("chipotle", "Dining", "5812"),
    ("walmart", "Groceries", "5411"),
    ("amazon", "Online Shopping", "5999"),
    ("costco", "Gas", "5542"),
    ("target", "Groceries", "5411"),
    ("walgreens", "Drugstores", "5912"),
];

/// Category and MCC for the first fallback key contained in `normalized`.
pub(crate) fn fallback_category(normalized: &str) -> Option<(&'static str, &'static str)> {
    let lowered = normalized.to_lowercase();
    FALLBACK_MERCHANTS
        .iter()
        .find(|(key, _, _)| lowered.contains(key))
        .map(|(_, category, mcc)| (*category, *mcc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_substring() {
        assert_eq!(
            fallback_category("Amazon Prime Video"),
            Some(("Online Shopping", "5999"))
        );
        assert_eq!(fallback_category("WALGREENS 0042"), Some(("Drugstores", "5912")));
    }

    #[test]
    fn unknown_merchant_has_no_fallback() {
        assert_eq!(fallback_category("Corner Bakery"), None);
    }
}
