//! Language signals: absolutist and hedging vocabulary counts

use crate::lexicon::{ABSOLUTE_TERMS, HEDGING_TERMS};
use serde::{Deserialize, Serialize};

/// Tokens per normalization window for the hedging score
pub const HEDGING_WINDOW: f64 = 50.0;

/// Certainty markers found in a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSignals {
    /// Occurrences of absolutist words
    pub absolutes: usize,
    /// Hedging words per 50 tokens
    pub hedging_score: f64,
}

/// Lowercase word tokens: maximal runs of ASCII letters, digits and `_`
pub(crate) fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count absolutist and hedging words
///
/// Short and long texts are comparable because the hedging count is
/// normalized per 50 tokens (texts shorter than that count as one window).
pub fn extract_language_signals(text: &str) -> LanguageSignals {
    let tokens = word_tokens(text);
    let absolutes = tokens
        .iter()
        .filter(|t| ABSOLUTE_TERMS.contains(&t.as_str()))
        .count();
    let hedging = tokens
        .iter()
        .filter(|t| HEDGING_TERMS.contains(&t.as_str()))
        .count();

    let windows = (tokens.len() as f64 / HEDGING_WINDOW).max(1.0);
    LanguageSignals {
        absolutes,
        hedging_score: hedging as f64 / windows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_absolutes() {
        let s = extract_language_signals("This clearly proves an undeniable fact.");
        assert_eq!(s.absolutes, 4);
        assert_eq!(s.hedging_score, 0.0);
    }

    #[test]
    fn test_whole_words_only() {
        // "factory" is not "fact"
        let s = extract_language_signals("The factory is provisional.");
        assert_eq!(s.absolutes, 0);
        assert_eq!(s.hedging_score, 1.0);
    }

    #[test]
    fn test_hedging_normalized_per_window() {
        let filler = "word ".repeat(98);
        let text = format!("{}might likely", filler);
        let s = extract_language_signals(&text);
        // 100 tokens = 2 windows, 2 hedges
        assert!((s.hedging_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_language_signals(""), LanguageSignals::default());
    }

    #[test]
    fn test_tokens_split_on_punctuation() {
        assert_eq!(word_tokens("It's NOT-true"), vec!["it", "s", "not", "true"]);
    }
}
