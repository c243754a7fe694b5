//! Report combining the keyword comparison with the AI critique

use crate::feedback::ResumeFeedback;
use crate::input::Document;
use crate::processing::ComparisonResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Deterministic keyword overlap
    pub keyword_analysis: ComparisonResult,

    /// Narrative critique; absent when AI feedback was disabled
    pub ai_feedback: Option<ResumeFeedback>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    pub resume_chars: usize,
    pub job_chars: usize,
    pub version: String,
}

/// Coarse verdict for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl ScoreBand {
    /// Bands follow the scoring criteria given to the reviewer model
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ScoreBand::Excellent,
            s if s >= 80.0 => ScoreBand::VeryGood,
            s if s >= 70.0 => ScoreBand::Good,
            s if s >= 60.0 => ScoreBand::Fair,
            s if s >= 50.0 => ScoreBand::Poor,
            _ => ScoreBand::VeryPoor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::VeryGood => "VERY GOOD",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
            ScoreBand::VeryPoor => "VERY POOR",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent | ScoreBand::VeryGood => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::Poor | ScoreBand::VeryPoor => "score-poor",
        }
    }
}

impl AnalysisReport {
    pub fn new(
        resume: &Document,
        job: &Document,
        keyword_analysis: ComparisonResult,
        ai_feedback: Option<ResumeFeedback>,
    ) -> Self {
        Self {
            keyword_analysis,
            ai_feedback,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                resume_source: resume.source.clone(),
                job_source: job.source.clone(),
                resume_chars: resume.char_count(),
                job_chars: job.char_count(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn keyword_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.keyword_analysis.match_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DocumentKind;
    use crate::processing::compare_keywords;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(85.0), ScoreBand::VeryGood);
        assert_eq!(ScoreBand::from_score(70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(69.9), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(50.0), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::VeryPoor);
    }

    #[test]
    fn test_report_metadata() {
        let resume = Document::new(DocumentKind::Resume, "cv.txt", "Rust Tokio");
        let job = Document::new(DocumentKind::JobDescription, "pasted text", "Rust Kafka");
        let result = compare_keywords(&resume.text, &job.text);

        let report = AnalysisReport::new(&resume, &job, result, None);
        assert_eq!(report.metadata.resume_source, "cv.txt");
        assert_eq!(report.metadata.job_chars, 10);
        assert_eq!(report.keyword_analysis.match_score, 50.0);
        assert_eq!(report.keyword_band(), ScoreBand::Poor);
    }
}
