//! Fixed keyword tables for the rule-based baseline.
//! Matching is case-insensitive substring containment; each term counts once.

/// Terms that push the sentiment score up by one
pub const POSITIVE_TERMS: &[&str] = &["good", "great", "excellent", "love"];

/// Terms that push the sentiment score down by one
pub const NEGATIVE_TERMS: &[&str] = &["confusing", "crash", "slow", "error", "expensive"];

/// A theme label and the keywords that trigger it
#[derive(Debug, Clone, Copy)]
pub struct ThemeRule {
    pub theme: &'static str,
    pub keywords: &'static [&'static str],
}

/// Theme rules in reporting order. Rules are independent and cumulative.
pub const THEME_RULES: &[ThemeRule] = &[
    ThemeRule {
        theme: "Pricing",
        keywords: &["price"],
    },
    ThemeRule {
        theme: "Authentication",
        keywords: &["login", "password"],
    },
    ThemeRule {
        theme: "Stability",
        keywords: &["crash"],
    },
];

/// Summary text attached to every baseline result
pub const BASELINE_SUMMARY: &str = "Derived using rule-based logic";

/// The single advisory emitted for negative feedback
pub const NEGATIVE_ADVISORY: &str = "Manual review suggested";

/// Number of `terms` present in already-lowercased `text`
pub fn count_matches(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text.contains(*term)).count()
}

impl ThemeRule {
    /// True if any keyword occurs in already-lowercased `text`
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw))
    }
}
