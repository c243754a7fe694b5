//! Turns the service's reply into `ResumeFeedback`, or the fallback

use crate::feedback::ResumeFeedback;
use log::{debug, warn};

/// Parse a model reply; anything unusable becomes the fallback object
pub fn parse_feedback(content: &str) -> ResumeFeedback {
    let cleaned = strip_json_fences(content);
    debug!("Cleaned feedback content: {}", cleaned);

    let strict_error = match serde_json::from_str::<ResumeFeedback>(cleaned) {
        Ok(feedback) => return feedback.normalized(),
        Err(e) => e,
    };

    if let Some(candidate) = first_json_object(cleaned) {
        if let Ok(feedback) = serde_json::from_str::<ResumeFeedback>(candidate) {
            debug!("Recovered feedback object embedded in surrounding text");
            return feedback.normalized();
        }
    }

    warn!("Feedback response is not valid feedback JSON: {}", strict_error);
    ResumeFeedback::fallback(format!("Error parsing AI response: {}", strict_error))
}

/// Strips ```json ... ``` or ``` ... ``` code fences
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let unfenced = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text)
        .trim();
    unfenced.strip_suffix("```").unwrap_or(unfenced).trim()
}

/// The first balanced `{...}` span, ignoring braces inside JSON strings
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"match_score": 72, "strengths": ["Rust"], "weaknesses": ["No Kafka"], "suggestions": ["Add Kafka", "Quantify impact", "Mention on-call"]}"#;

    #[test]
    fn test_parses_plain_json() {
        let feedback = parse_feedback(VALID);
        assert_eq!(feedback.match_score, 72.0);
        assert_eq!(feedback.strengths, vec!["Rust"]);
        assert_eq!(feedback.suggestions.len(), 3);
    }

    #[test]
    fn test_strip_json_fences() {
        assert_eq!(strip_json_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parses_fenced_json() {
        let feedback = parse_feedback(&format!("```json\n{}\n```", VALID));
        assert_eq!(feedback.match_score, 72.0);
    }

    #[test]
    fn test_recovers_object_surrounded_by_prose() {
        let reply = format!("Sure! Here is the analysis:\n{}\nLet me know if {{you}} need more.", VALID);
        let feedback = parse_feedback(&reply);
        assert_eq!(feedback.weaknesses, vec!["No Kafka"]);
    }

    #[test]
    fn test_braces_inside_strings_do_not_end_object() {
        let reply = r#"note: {"match_score": 40, "strengths": ["uses {braces}"], "weaknesses": [], "suggestions": ["say \"}\" less"]} trailing"#;
        let feedback = parse_feedback(reply);
        assert_eq!(feedback.match_score, 40.0);
        assert_eq!(feedback.strengths, vec!["uses {braces}"]);
        assert_eq!(feedback.suggestions, vec!["say \"}\" less"]);
    }

    #[test]
    fn test_missing_field_falls_back() {
        let feedback = parse_feedback(r#"{"match_score": 80, "strengths": []}"#);
        assert!(feedback.is_fallback());
        assert_eq!(feedback.match_score, 0.0);
        assert!(feedback.strengths.is_empty());
        assert!(feedback.weaknesses.is_empty());
        assert_eq!(feedback.suggestions.len(), 1);
        assert!(feedback.suggestions[0].starts_with("Error parsing AI response"));
    }

    #[test]
    fn test_garbage_falls_back() {
        assert!(parse_feedback("I cannot help with that").is_fallback());
        assert!(parse_feedback("").is_fallback());
        assert!(parse_feedback("{ not json at all").is_fallback());
    }

    #[test]
    fn test_score_is_clamped() {
        let reply = r#"{"match_score": 140, "strengths": [], "weaknesses": [], "suggestions": []}"#;
        assert_eq!(parse_feedback(reply).match_score, 100.0);
    }
}
