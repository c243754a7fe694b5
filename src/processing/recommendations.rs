//! Threshold rules turning a match score into written guidance

const POOR_MATCH_THRESHOLD: f64 = 30.0;
const PARTIAL_MATCH_THRESHOLD: f64 = 60.0;
const NAMED_KEYWORDS: usize = 3;

/// Build the guidance list for a score and the ranked missing keywords.
///
/// Always yields the score-band message; the keyword message needs at least
/// one missing keyword and the closing reminder needs a non-zero score.
pub fn generate_recommendations(match_score: f64, top_missing_keywords: &[String]) -> Vec<String> {
    let mut recommendations = Vec::with_capacity(3);

    if match_score < POOR_MATCH_THRESHOLD {
        recommendations.push(
            "Your resume has very few keywords matching the job description. Consider adding more relevant skills and experiences."
                .to_string(),
        );
    } else if match_score < PARTIAL_MATCH_THRESHOLD {
        recommendations.push(
            "Your resume has some matching keywords but could be improved. Focus on adding the most important missing keywords."
                .to_string(),
        );
    } else {
        recommendations.push("Good keyword match! Your resume aligns well with the job requirements.".to_string());
    }

    if !top_missing_keywords.is_empty() {
        let named: Vec<&str> = top_missing_keywords
            .iter()
            .take(NAMED_KEYWORDS)
            .map(String::as_str)
            .collect();
        recommendations.push(format!("Consider adding these important keywords: {}", named.join(", ")));
    }

    if match_score > 0.0 {
        recommendations.push(
            "Review your resume to ensure keywords are used naturally in context, not just listed.".to_string(),
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_bands() {
        let low = generate_recommendations(25.0, &[]);
        assert!(low[0].contains("very few keywords"));

        let mid = generate_recommendations(45.0, &[]);
        assert!(mid[0].contains("some matching keywords"));

        let high = generate_recommendations(75.0, &[]);
        assert!(high[0].starts_with("Good keyword match"));
    }

    #[test]
    fn test_band_boundaries() {
        assert!(generate_recommendations(29.99, &[])[0].contains("very few"));
        assert!(generate_recommendations(30.0, &[])[0].contains("some matching"));
        assert!(generate_recommendations(59.99, &[])[0].contains("some matching"));
        assert!(generate_recommendations(60.0, &[])[0].starts_with("Good keyword match"));
    }

    #[test]
    fn test_names_first_three_missing() {
        let missing = words(&["kafka", "kubernetes", "helm", "grafana", "terraform"]);
        let recs = generate_recommendations(45.0, &missing);

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[1], "Consider adding these important keywords: kafka, kubernetes, helm");
        assert!(recs[2].contains("used naturally in context"));
    }

    #[test]
    fn test_zero_score_skips_reminder() {
        let recs = generate_recommendations(0.0, &words(&["aws"]));
        assert_eq!(recs.len(), 2);
        assert!(!recs.iter().any(|r| r.contains("naturally")));

        let recs = generate_recommendations(0.0, &[]);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_full_match_without_missing() {
        let recs = generate_recommendations(100.0, &[]);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Good keyword match"));
    }
}
