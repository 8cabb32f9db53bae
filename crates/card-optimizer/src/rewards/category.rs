/// Spend-vector keys accepted from front ends and the catalog label each maps to.
const SPEND_CATEGORY_LABELS: &[(&str, &str)] = &[
    ("groceries", "Groceries"),
    ("travel", "Travel"),
    ("gas", "Gas"),
    ("dining", "Dining"),
    ("online_shopping", "Online Shopping"),
];

/// Translation from caller-facing spend keys to canonical catalog categories.
///
/// Card reward tables are matched by exact label, so every key the front end
/// is known to send lives in one table. Unknown keys fall back to title case.
#[derive(Debug, Clone, Copy)]
pub struct CategoryMap {
    labels: &'static [(&'static str, &'static str)],
}

impl CategoryMap {
    pub const fn standard() -> Self {
        Self {
            labels: SPEND_CATEGORY_LABELS,
        }
    }

    pub fn canonical(&self, key: &str) -> String {
        self.labels
            .iter()
            .find(|(spend_key, _)| *spend_key == key)
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| title_case(key))
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::standard()
    }
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest.
pub(crate) fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}
