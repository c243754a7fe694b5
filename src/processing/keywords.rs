//! Keyword extraction and frequency counting

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Anything that is neither a word character nor whitespace
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"));

/// Words made only of decimal digits, in any script
static ALL_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("Invalid digits regex"));

static DEFAULT_EXCLUSIONS: LazyLock<ExclusionSets> = LazyLock::new(ExclusionSets::new);

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
    "by", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "can",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
    "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
    "mine", "yours", "hers", "ours", "theirs", "am", "must", "shall", "cannot", "cant",
];

/// Terms too generic to tell one job posting from another
const COMMON_WORDS: &[&str] = &[
    "experience", "work", "job", "position", "role", "team", "company", "business",
    "project", "development", "management", "support", "service", "system",
    "technology", "software", "application", "data", "information", "process",
    "analysis", "design", "implementation", "testing", "deployment", "maintenance",
    "documentation", "training", "communication", "collaboration", "leadership",
    "problem", "solution", "improvement", "optimization", "efficiency", "quality",
    "performance", "security", "reliability", "scalability", "integration",
    "responsibility", "duties", "requirements", "skills", "knowledge", "ability",
    "years", "month", "day", "time", "period", "duration", "level",
    "senior", "junior", "entry", "mid", "advanced", "expert", "beginner", "intermediate",
];

/// Immutable word lists a token must avoid to count as a keyword
#[derive(Debug, Clone)]
pub struct ExclusionSets {
    stop_words: HashSet<String>,
    common_words: HashSet<String>,
}

impl Default for ExclusionSets {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusionSets {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|&s| s.to_string()).collect(),
            common_words: COMMON_WORDS.iter().map(|&s| s.to_string()).collect(),
        }
    }

    /// Process-wide built-in sets
    pub fn builtin() -> &'static ExclusionSets {
        &DEFAULT_EXCLUSIONS
    }

    /// Extend the stop-word set, lower-casing each entry
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn is_common_word(&self, word: &str) -> bool {
        self.common_words.contains(word)
    }
}

/// Turns raw text into an ordered sequence of keyword tokens
#[derive(Debug, Clone, Copy)]
pub struct KeywordExtractor<'a> {
    min_length: usize,
    exclusions: &'a ExclusionSets,
}

impl Default for KeywordExtractor<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl KeywordExtractor<'static> {
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            exclusions: ExclusionSets::builtin(),
        }
    }
}

impl<'a> KeywordExtractor<'a> {
    pub fn with_exclusions(min_length: usize, exclusions: &'a ExclusionSets) -> Self {
        Self { min_length, exclusions }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Extract keywords in input order, keeping duplicates
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned = NON_WORD.replace_all(&lowered, " ");

        cleaned
            .split_whitespace()
            .filter(|word| self.is_keyword(word))
            .map(str::to_string)
            .collect()
    }

    fn is_keyword(&self, word: &str) -> bool {
        word.chars().count() >= self.min_length
            && !self.exclusions.is_stop_word(word)
            && !self.exclusions.is_common_word(word)
            && !ALL_DIGITS.is_match(word)
    }
}

/// Extract keywords with the built-in exclusion sets
pub fn extract_keywords(text: &str, min_length: usize) -> Vec<String> {
    KeywordExtractor::new(min_length).extract(text)
}

/// Count occurrences of each token
pub fn keyword_frequency<S: AsRef<str>>(keywords: &[S]) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for keyword in keywords {
        *freq.entry(keyword.as_ref().to_string()).or_insert(0) += 1;
    }
    freq
}
