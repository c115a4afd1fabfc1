//! Query construction for notice number lookups

use crate::numeral::{to_digit_kanji, to_formal_kanji};

/// A notice number together with every textual form it may take in the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralQuery {
    pub number: u64,
    pub arabic: String,
    pub formal: String,
    pub digits: String,
}

impl NumeralQuery {
    pub fn new(number: u64) -> Self {
        Self {
            number,
            arabic: number.to_string(),
            formal: to_formal_kanji(number),
            digits: to_digit_kanji(number),
        }
    }

    /// Non-empty forms in arabic, formal, digit order with duplicates removed
    pub fn alternatives(&self) -> Vec<&str> {
        let mut alternatives: Vec<&str> = Vec::with_capacity(3);
        for form in [&self.arabic, &self.formal, &self.digits] {
            if !form.is_empty() && !alternatives.contains(&form.as_str()) {
                alternatives.push(form.as_str());
            }
        }
        alternatives
    }

    /// Alternatives joined as a `|` pattern, for messages and logs
    pub fn pattern(&self) -> String {
        self.alternatives().join("|")
    }

    /// True when `text` contains any of the alternatives
    pub fn matches(&self, text: &str) -> bool {
        self.alternatives().iter().any(|alt| text.contains(alt))
    }
}
