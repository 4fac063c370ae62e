//! Vocabulary tables shared by every heuristic
//!
//! All phrase and keyword lists live here so they can be tuned and tested
//! independently of the algorithms that read them. Bump [`LEXICON_VERSION`]
//! whenever a table changes.

/// Version of the tables below
pub const LEXICON_VERSION: u32 = 1;

/// Phrases that introduce an implicit claim, in scan order
///
/// The trailing space is part of the phrase: the claim starts right after it.
pub const ASSUMPTION_TRIGGERS: &[&str] = &[
    "this suggests that ",
    "it is likely that ",
    "the evidence shows ",
    "this means that ",
    "appears to be ",
    "indicates that ",
];

/// Words that signal unwarranted certainty
pub const ABSOLUTE_TERMS: &[&str] = &[
    "clearly",
    "proves",
    "undeniable",
    "absolute",
    "fact",
    "certainly",
    "obviously",
];

/// Words that signal appropriate epistemic caution
pub const HEDGING_TERMS: &[&str] = &[
    "suggests",
    "might",
    "potentially",
    "likely",
    "provisional",
    "hypothesized",
];

/// Negation markers, matched as substrings
pub const NEGATION_TERMS: &[&str] = &["not", "never", "no", "fail", "contrary", "unlikely", "false"];

/// Speculative language counted by legal review, matched as substrings
pub const SPECULATIVE_TERMS: &[&str] = &["perhaps", "maybe", "likely", "appears"];

/// Medical-domain keywords
pub const MEDICAL_KEYWORDS: &[&str] = &["treatment", "study", "clinical"];

/// Legal-domain keywords
pub const LEGAL_KEYWORDS: &[&str] = &["statute", "court", "law"];

/// Tech-domain keywords
pub const TECH_KEYWORDS: &[&str] = &["api", "software", "version"];

/// Critique phrases that mark a severe flaw
pub const CRITICAL_FLAW_TERMS: &[&str] = &["no evidence", "fallacy"];

/// Critique phrases that mark a moderate flaw
pub const MODERATE_FLAW_TERMS: &[&str] = &["weak assumption", "speculative"];

/// Falsification query templates; `{}` is replaced by the claim
pub const FALSIFICATION_QUERIES: &[&str] = &[
    "evidence against {}",
    "{} debunked",
    "criticisms of {}",
    "studies contradicting {}",
];

/// Whether `haystack` contains any of `terms` as a substring
pub fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(t))
}

/// Fill every falsification template with `claim`
pub fn falsification_queries(claim: &str) -> Vec<String> {
    FALSIFICATION_QUERIES
        .iter()
        .map(|template| template.replace("{}", claim))
        .collect()
}
