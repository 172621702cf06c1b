pub mod rules;

pub use rules::{AUDIENCE_RULES, CHANNEL_RULES, FRAUD_TYPE_RULES, GENERAL_POPULATION, NOT_INFORMED, OTHER};

use rules::Rule;

/// Classify free text with an ordered rule table.
///
/// Text that already is one of the table's labels maps to itself, so values
/// coming back already normalized are not re-routed by an earlier keyword
/// ("Máquina de Cartão" contains "cartão"). Otherwise the first keyword found
/// in the lower-cased text wins; no match yields [`OTHER`].
pub fn classify(text: &str, rules: &[Rule]) -> &'static str {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return OTHER;
    }
    if let Some((_, label)) = rules.iter().find(|(_, label)| label.to_lowercase() == lowered) {
        return *label;
    }
    rules
        .iter()
        .find(|(keyword, _)| lowered.contains(*keyword))
        .map(|(_, label)| *label)
        .unwrap_or(OTHER)
}

pub fn normalize_fraud_type(text: &str) -> &'static str {
    classify(text, FRAUD_TYPE_RULES)
}

pub fn normalize_channel(text: &str) -> &'static str {
    classify(text, CHANNEL_RULES)
}

pub fn normalize_audience(text: &str) -> &'static str {
    classify(text, AUDIENCE_RULES)
}
