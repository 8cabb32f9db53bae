use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    leading_article: Regex,
    corporate_suffix: Regex,
    punctuation: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        leading_article: Regex::new(r"(?i)^(?:the|a)\s+").expect("leading article pattern"),
        corporate_suffix: Regex::new(r"(?i)\s+(?:inc|llc|corp|ltd)\.?$")
            .expect("corporate suffix pattern"),
        punctuation: Regex::new(r"[^\w\s-]").expect("punctuation pattern"),
    })
}

/// Strip articles, corporate suffixes, and punctuation from a merchant string.
pub fn normalize_merchant_name(merchant: &str) -> String {
    let patterns = patterns();
    let trimmed = merchant.trim();
    let without_article = patterns.leading_article.replace(trimmed, "");
    let without_suffix = patterns.corporate_suffix.replace(&without_article, "");
    let cleaned = patterns.punctuation.replace_all(&without_suffix, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_articles_and_suffixes() {
        assert_eq!(normalize_merchant_name("  The Home Depot Inc. "), "Home Depot");
        assert_eq!(normalize_merchant_name("a Chipotle LLC"), "Chipotle");
    }

    #[test]
    fn removes_punctuation_but_keeps_hyphens() {
        assert_eq!(normalize_merchant_name("WAL-MART #1234"), "WAL-MART 1234");
        assert_eq!(normalize_merchant_name("Amazon.com*Marketplace"), "AmazoncomMarketplace");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_merchant_name("Trader   Joe's\tMarket"), "Trader Joes Market");
    }
}
