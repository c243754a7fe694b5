//! AI feedback collaborator.
//!
//! Sends the resume and job description to a chat-completion service and
//! returns a structured critique. Every failure, from a missing API key to a
//! reply that is not JSON, degrades to [`ResumeFeedback::fallback`].

pub mod client;
pub mod parser;
pub mod prompts;

use crate::config::FeedbackConfig;
use log::warn;
use serde::{Deserialize, Serialize};

pub use client::FeedbackClient;
pub use parser::parse_feedback;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeedback {
    pub match_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip)]
    fallback: bool,
}

impl ResumeFeedback {
    pub fn new(match_score: f64, strengths: Vec<String>, weaknesses: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            match_score,
            strengths,
            weaknesses,
            suggestions,
            fallback: false,
        }
        .normalized()
    }

    /// Score 0, nothing learned, one diagnostic suggestion
    pub fn fallback(diagnostic: impl Into<String>) -> Self {
        Self {
            match_score: 0.0,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            suggestions: vec![diagnostic.into()],
            fallback: true,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.match_score = if self.match_score.is_finite() {
            self.match_score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self
    }
}

/// Ask the feedback service for a critique; never fails
pub async fn get_resume_feedback(
    resume_text: &str,
    job_description: &str,
    api_key: Option<&str>,
    config: &FeedbackConfig,
) -> ResumeFeedback {
    let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
        warn!("No API key configured; skipping AI feedback");
        return ResumeFeedback::fallback(format!(
            "AI feedback unavailable: set the {} environment variable",
            config.api_key_env
        ));
    };

    match FeedbackClient::new(config.clone(), api_key.to_string()) {
        Ok(client) => client.get_feedback(resume_text, job_description).await,
        Err(e) => {
            warn!("Could not build feedback client: {}", e);
            ResumeFeedback::fallback(format!("Error contacting AI service: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let feedback = ResumeFeedback::fallback("service down");
        assert!(feedback.is_fallback());
        assert_eq!(feedback.match_score, 0.0);
        assert!(feedback.strengths.is_empty());
        assert!(feedback.weaknesses.is_empty());
        assert_eq!(feedback.suggestions, vec!["service down"]);
    }

    #[test]
    fn test_new_clamps_score() {
        let feedback = ResumeFeedback::new(-5.0, vec![], vec![], vec![]);
        assert_eq!(feedback.match_score, 0.0);
        assert!(!feedback.is_fallback());

        let feedback = ResumeFeedback::new(f64::NAN, vec![], vec![], vec![]);
        assert_eq!(feedback.match_score, 0.0);
    }

    #[test]
    fn test_serialized_shape_has_four_keys() {
        let feedback = ResumeFeedback::new(70.0, vec!["a".into()], vec![], vec!["b".into()]);
        let value = serde_json::to_value(&feedback).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(object.contains_key("match_score"));
        assert!(object.contains_key("suggestions"));
    }

    #[tokio::test]
    async fn test_missing_api_key_falls_back() {
        let config = FeedbackConfig::default();
        let feedback = get_resume_feedback("resume", "job", None, &config).await;
        assert!(feedback.is_fallback());
        assert!(feedback.suggestions[0].contains("OPENAI_API_KEY"));

        let feedback = get_resume_feedback("resume", "job", Some("  "), &config).await;
        assert!(feedback.is_fallback());
    }
}
