//! Keyword overlap between a resume and a job description

use crate::config::MatchingConfig;
use crate::processing::keywords::{keyword_frequency, ExclusionSets, KeywordExtractor, DEFAULT_MIN_LENGTH};
use crate::processing::recommendations::generate_recommendations;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DEFAULT_TOP_KEYWORDS: usize = 10;
const DEFAULT_RECOMMENDATION_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Percentage of unique job keywords found in the resume, one decimal
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub extra_keywords: Vec<String>,
    pub total_job_keywords: usize,
    pub total_resume_keywords: usize,
    pub matched_count: usize,
    pub missing_count: usize,
    pub recommendations: Vec<String>,
}

/// Compares two documents keyword by keyword.
///
/// Ranked lists break ties by first appearance in the job description
/// (matched, missing) or the resume (extra), so repeated calls with the
/// same input always agree.
#[derive(Debug, Clone)]
pub struct KeywordComparator<'a> {
    extractor: KeywordExtractor<'a>,
    top_keywords: usize,
    recommendation_keywords: usize,
}

impl Default for KeywordComparator<'static> {
    fn default() -> Self {
        Self {
            extractor: KeywordExtractor::new(DEFAULT_MIN_LENGTH),
            top_keywords: DEFAULT_TOP_KEYWORDS,
            recommendation_keywords: DEFAULT_RECOMMENDATION_KEYWORDS,
        }
    }
}

impl<'a> KeywordComparator<'a> {
    pub fn new(extractor: KeywordExtractor<'a>, top_keywords: usize, recommendation_keywords: usize) -> Self {
        Self {
            extractor,
            top_keywords,
            recommendation_keywords,
        }
    }

    pub fn from_config(config: &MatchingConfig, exclusions: &'a ExclusionSets) -> Self {
        Self::new(
            KeywordExtractor::with_exclusions(config.min_keyword_length, exclusions),
            config.top_keywords,
            config.recommendation_keywords,
        )
    }

    pub fn compare(&self, resume_text: &str, job_description: &str) -> ComparisonResult {
        let resume_keywords = self.extractor.extract(resume_text);
        let job_keywords = self.extractor.extract(job_description);

        let resume_freq = keyword_frequency(&resume_keywords);
        let job_freq = keyword_frequency(&job_keywords);

        let resume_unique = unique_in_order(&resume_keywords);
        let job_unique = unique_in_order(&job_keywords);

        let (matched, missing): (Vec<&str>, Vec<&str>) = job_unique
            .iter()
            .copied()
            .partition(|word| resume_freq.contains_key(*word));
        let extra: Vec<&str> = resume_unique
            .iter()
            .copied()
            .filter(|word| !job_freq.contains_key(*word))
            .collect();

        let total_job_keywords = job_unique.len();
        let raw_score = if total_job_keywords > 0 {
            matched.len() as f64 / total_job_keywords as f64 * 100.0
        } else {
            0.0
        };

        let ranked_matched = rank_by(&matched, |word| resume_freq[word].min(job_freq[word]));
        let ranked_missing = rank_by(&missing, |word| job_freq[word]);

        let recommendation_input: Vec<String> = ranked_missing
            .iter()
            .take(self.recommendation_keywords)
            .cloned()
            .collect();

        ComparisonResult {
            match_score: round_to_tenth(raw_score),
            matched_keywords: truncated(ranked_matched, self.top_keywords),
            missing_keywords: truncated(ranked_missing, self.top_keywords),
            extra_keywords: extra
                .iter()
                .take(self.top_keywords)
                .map(|w| w.to_string())
                .collect(),
            total_job_keywords,
            total_resume_keywords: resume_unique.len(),
            matched_count: matched.len(),
            missing_count: missing.len(),
            recommendations: generate_recommendations(raw_score, &recommendation_input),
        }
    }
}

/// Compare with the default extractor settings and exclusion sets
pub fn compare_keywords(resume_text: &str, job_description: &str) -> ComparisonResult {
    KeywordComparator::default().compare(resume_text, job_description)
}

fn unique_in_order(keywords: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(String::as_str)
        .filter(|word| seen.insert(*word))
        .collect()
}

/// Descending by weight; the stable sort keeps input order among equals
fn rank_by<F>(words: &[&str], weight: F) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    let mut weighted: Vec<(&str, usize)> = words.iter().map(|&w| (w, weight(w))).collect();
    weighted.sort_by(|a, b| b.1.cmp(&a.1));
    weighted.into_iter().map(|(w, _)| w.to_string()).collect()
}

fn truncated(mut words: Vec<String>, limit: usize) -> Vec<String> {
    words.truncate(limit);
    words
}

/// Halves go to the even neighbour: 6.25 becomes 6.2
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
