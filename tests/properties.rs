//! Property tests for the baseline analyzer, loader and verdict

use insights::analyzer::vocabulary::{NEGATIVE_TERMS, POSITIVE_TERMS, THEME_RULES};
use insights::analyzer::BaselineAnalyzer;
use insights::loader::{load, FeedbackFormat, MaxRows};
use insights::pipeline::compute_verdict;
use insights::{ComparisonRecord, Sentiment};
use proptest::prelude::*;

fn contains_any_term(text: &str) -> bool {
    let lowered = text.to_lowercase();
    POSITIVE_TERMS
        .iter()
        .chain(NEGATIVE_TERMS)
        .any(|t| lowered.contains(t))
}

/// Words that never contain a vocabulary term
fn filler_word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "the", "app", "support", "team", "checkout", "screen", "today", "works", "fine", "okay",
        "menu", "order", "delivery", "button",
    ])
}

fn sentence(words: impl Strategy<Value = &'static str>) -> impl Strategy<Value = String> {
    prop::collection::vec(words, 0..12).prop_map(|w| w.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn no_terms_means_neutral_and_free(ref text in "[a-zA-Z0-9 ,.!?]{0,80}") {
        prop_assume!(!contains_any_term(text));
        let r = BaselineAnalyzer::new().analyze(text);
        prop_assert_eq!(r.sentiment, Some(Sentiment::Neutral));
        prop_assert_eq!(r.meta.cost_usd, 0.0);
        prop_assert!(r.recommendations().is_empty());
    }

    #[test]
    fn positive_terms_only_means_positive(
        ref filler in sentence(filler_word()),
        ref positive in prop::sample::select(POSITIVE_TERMS.to_vec()),
        upper in any::<bool>(),
    ) {
        let term = if upper { positive.to_uppercase() } else { positive.to_string() };
        let text = format!("{} {}", filler, term);
        let r = BaselineAnalyzer::new().analyze(&text);
        prop_assert_eq!(r.sentiment, Some(Sentiment::Positive));
        prop_assert_eq!(r.meta.cost_usd, 0.0);
    }

    #[test]
    fn baseline_never_mixed(ref text in ".{0,120}") {
        let r = BaselineAnalyzer::new().analyze(text);
        prop_assert_ne!(r.sentiment, Some(Sentiment::Mixed));
    }

    #[test]
    fn adding_login_keeps_authentication(ref text in ".{0,80}", ref suffix in ".{0,20}") {
        let before = BaselineAnalyzer::new().analyze(text);
        let after = BaselineAnalyzer::new().analyze(&format!("{}login{}", text, suffix));
        prop_assert!(after.themes().iter().any(|t| t == "Authentication"));
        for theme in before.themes() {
            prop_assert!(after.themes().contains(theme));
        }
    }

    #[test]
    fn themes_follow_rule_order(ref text in ".{0,120}") {
        let r = BaselineAnalyzer::new().analyze(text);
        let order: Vec<&str> = THEME_RULES.iter().map(|rule| rule.theme).collect();
        let positions: Vec<usize> = r
            .themes()
            .iter()
            .map(|t| order.iter().position(|o| o == t).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn line_loading_is_idempotent(ref lines in prop::collection::vec("[ a-z]{0,12}", 0..30)) {
        let content = lines.join("\n");
        let a = load(content.as_bytes(), FeedbackFormat::Text, MaxRows::new(20).unwrap()).unwrap();
        let b = load(content.as_bytes(), FeedbackFormat::Text, MaxRows::new(20).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn truncation_keeps_first_k_in_order(m in 1usize..40, k in 1u8..=20) {
        let content: String = (0..m).map(|i| format!("record {}\n", i)).collect();
        let records = load(content.as_bytes(), FeedbackFormat::Text, MaxRows::new(k).unwrap()).unwrap();
        let expected = m.min(k as usize);
        prop_assert_eq!(records.len(), expected);
        for (i, r) in records.iter().enumerate() {
            prop_assert_eq!(&r.text, &format!("record {}", i));
            prop_assert_eq!(r.id, i + 1);
        }
    }

    #[test]
    fn verdict_is_deterministic(ref texts in prop::collection::vec(".{0,40}", 0..8)) {
        let records: Vec<ComparisonRecord> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let baseline = BaselineAnalyzer::new().analyze(t);
                let mut model = baseline.clone();
                model.complaints = Some(vec![]);
                ComparisonRecord { id: i + 1, text: t.clone(), baseline, model }
            })
            .collect();
        let first = compute_verdict(&records);
        let second = compute_verdict(&records);
        prop_assert_eq!(&first, &second);
        // model carries one extra field per record
        prop_assert!(first.model_score >= records.len() as u32);
    }
}
