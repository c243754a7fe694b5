//! Reviewer prompt sent to the feedback service

use log::info;
use unicode_segmentation::UnicodeSegmentation;

pub const SYSTEM_PROMPT: &str =
    "You are a JSON-only response assistant. You must respond with valid JSON only, no other text.";

/// Prompt template with `{resume}` and `{job}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: REVIEW_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Single pass over the template; inserted text is never rescanned
    pub fn render(&self, resume_text: &str, job_description: &str) -> String {
        let mut output = String::with_capacity(self.template.len() + resume_text.len() + job_description.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            output.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{resume}") {
                output.push_str(resume_text);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{job}") {
                output.push_str(job_description);
                rest = after;
            } else {
                output.push('{');
                rest = &tail[1..];
            }
        }

        output.push_str(rest);
        output
    }
}

/// Cut `text` to at most `max_chars` grapheme clusters, appending "..." when cut
pub fn truncate_for_prompt(text: &str, max_chars: usize, label: &str) -> String {
    let mut graphemes = text.grapheme_indices(true);
    match graphemes.nth(max_chars) {
        Some((byte_index, _)) => {
            info!("{} text truncated to {} characters", label, max_chars);
            format!("{}...", &text[..byte_index])
        }
        None => text.to_string(),
    }
}

const REVIEW_TEMPLATE: &str = r#"You are a professional resume reviewer. You MUST respond with valid JSON only.
Given the following resume and job description, provide a detailed analysis and feedback on the resume.

SCORING CRITERIA:
- 90-100: Excellent match - resume perfectly aligns with job requirements
- 80-89: Very good match - resume strongly matches job requirements
- 70-79: Good match - resume generally matches job requirements
- 60-69: Fair match - resume partially matches job requirements
- 50-59: Poor match - resume has limited alignment with job requirements
- 0-49: Very poor match - resume does not align with job requirements

Your response must be a valid JSON object with exactly these keys:
- match_score (number 0-100, based on alignment between resume and job description)
- strengths (array of 3-5 specific strengths from the resume)
- weaknesses (array of 3-5 specific weaknesses or gaps)
- suggestions (array of exactly 3 specific improvement suggestions)

CRITICAL: Your response must be valid JSON. Do not include any text before or after the JSON object.
Do not use markdown formatting, code blocks, or any other formatting.
Start your response with { and end with } only.

Example response format (copy this exact structure):
{
  "match_score": 75,
  "strengths": ["Strong Python programming skills", "Relevant Flask framework experience", "Database management expertise"],
  "weaknesses": ["Missing cloud platform experience", "Limited team leadership examples", "No mention of API development"],
  "suggestions": ["Add AWS or Azure cloud experience", "Include leadership and team collaboration examples", "Highlight API development and integration work"]
}

Resume:
{resume}

Job Description:
{job}

IMPORTANT: Respond with ONLY the JSON object, no additional text, explanations, or markdown formatting."#;
