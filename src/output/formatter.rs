//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AnalysisReport, ScoreBand};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Keyword Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .keywords span {
            display: inline-block;
            padding: 4px 10px;
            margin: 3px;
            border-radius: 12px;
            background: #e9ecef;
        }
        .matched span { background: #d4edda; }
        .missing span { background: #f8d7da; }
        .strengths { border-left: 4px solid #28a745; padding-left: 15px; }
        .weaknesses { border-left: 4px solid #ffc107; padding-left: 15px; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Keyword Match Report</h1>
            <p>Generated: {{ generated_at }}</p>
        </div>

        <div class="section">
            <h2>Keyword Match</h2>
            <h3>Match Score: {{ match_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <p>{{ matched_count }} of {{ total_job_keywords }} job keywords found ({{ missing_count }} missing, {{ total_resume_keywords }} unique resume keywords)</p>

            <h3>Matched Keywords</h3>
            <div class="keywords matched">{% for keyword in matched_keywords %}<span>{{ keyword }}</span>{% endfor %}</div>

            <h3>Missing Keywords</h3>
            <div class="keywords missing">{% for keyword in missing_keywords %}<span>{{ keyword }}</span>{% endfor %}</div>

            {% if !extra_keywords.is_empty() %}
            <h3>Additional Resume Keywords</h3>
            <div class="keywords">{% for keyword in extra_keywords %}<span>{{ keyword }}</span>{% endfor %}</div>
            {% endif %}

            <h3>Recommendations</h3>
            <ul>{% for rec in recommendations %}<li>{{ rec }}</li>{% endfor %}</ul>
        </div>

        {% if has_feedback %}
        <div class="section">
            <h2>AI Feedback</h2>
            {% if ai_available %}
            <h3>AI Match Score: {{ ai_score }}%</h3>
            {% else %}
            <h3>AI feedback unavailable</h3>
            {% endif %}
            {% if !strengths.is_empty() %}
            <div class="strengths"><h3>Strengths</h3><ul>{% for item in strengths %}<li>{{ item }}</li>{% endfor %}</ul></div>
            {% endif %}
            {% if !weaknesses.is_empty() %}
            <div class="weaknesses"><h3>Weaknesses</h3><ul>{% for item in weaknesses %}<li>{{ item }}</li>{% endfor %}</ul></div>
            {% endif %}
            <h3>Suggestions</h3>
            <ul>{% for item in suggestions %}<li>{{ item }}</li>{% endfor %}</ul>
        </div>
        {% endif %}

        <div class="metadata">
            <p>Resume: {{ resume_source }} ({{ resume_chars }} characters) | Job description: {{ job_source }} ({{ job_chars }} characters)</p>
            <p>resume-matcher v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    match_score: String,
    score_class: &'static str,
    score_label: &'static str,
    matched_count: usize,
    missing_count: usize,
    total_job_keywords: usize,
    total_resume_keywords: usize,
    matched_keywords: Vec<String>,
    missing_keywords: Vec<String>,
    extra_keywords: Vec<String>,
    recommendations: Vec<String>,
    has_feedback: bool,
    ai_available: bool,
    ai_score: String,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    suggestions: Vec<String>,
    resume_source: String,
    resume_chars: usize,
    job_source: String,
    job_chars: usize,
    version: String,
}

fn format_timestamp(report: &AnalysisReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn keyword_list(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "(none)".to_string()
    } else {
        keywords.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::VeryGood => Color::BrightGreen,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::Poor => Color::Red,
            ScoreBand::VeryPoor => Color::BrightRed,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn push_list(&self, output: &mut String, title: &str, items: &[String], color: Color) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("{}\n", self.colorize(title, color)));
        for item in items {
            output.push_str(&format!("  • {}\n", item));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let keywords = &report.keyword_analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME KEYWORD MATCH", 1));
        output.push_str(&format!("Generated: {}\n", format_timestamp(report)));

        output.push_str(&self.format_header("Keyword Analysis", 2));
        output.push_str(&format!(
            "Match Score: {:.1}% {}\n",
            keywords.match_score,
            self.format_score_badge(report.keyword_band())
        ));
        output.push_str(&format!(
            "Job keywords: {} | Resume keywords: {} | Matched: {} | Missing: {}\n\n",
            keywords.total_job_keywords, keywords.total_resume_keywords, keywords.matched_count, keywords.missing_count
        ));
        output.push_str(&format!(
            "{} {}\n",
            self.colorize("✅ Matched:", Color::Green),
            keyword_list(&keywords.matched_keywords)
        ));
        output.push_str(&format!(
            "{} {}\n",
            self.colorize("⚠️  Missing:", Color::Yellow),
            keyword_list(&keywords.missing_keywords)
        ));
        if self.detailed {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("➕ Extra:", Color::Cyan),
                keyword_list(&keywords.extra_keywords)
            ));
        }

        output.push_str(&self.format_header("Recommendations", 3));
        for (i, rec) in keywords.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, rec));
        }

        if let Some(feedback) = &report.ai_feedback {
            output.push_str(&self.format_header("AI Feedback", 2));
            if feedback.is_fallback() {
                output.push_str(&format!("{}\n", self.colorize("AI feedback unavailable", Color::Red)));
            } else {
                output.push_str(&format!(
                    "AI Match Score: {:.0}% {}\n",
                    feedback.match_score,
                    self.format_score_badge(ScoreBand::from_score(feedback.match_score))
                ));
            }
            self.push_list(&mut output, "💪 Strengths", &feedback.strengths, Color::Green);
            self.push_list(&mut output, "🎯 Weaknesses", &feedback.weaknesses, Color::Yellow);
            self.push_list(&mut output, "💡 Suggestions", &feedback.suggestions, Color::Cyan);
        }

        if self.detailed {
            output.push_str(&self.format_header("Sources", 3));
            output.push_str(&format!(
                "Resume: {} ({} characters)\nJob description: {} ({} characters)\n",
                report.metadata.resume_source,
                report.metadata.resume_chars,
                report.metadata.job_source,
                report.metadata.job_chars
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let keywords = &report.keyword_analysis;
        let mut output = String::new();

        output.push_str("# Resume Keyword Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!("**Generated:** {}\n", format_timestamp(report)));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_source, report.metadata.job_source
            ));
        }

        output.push_str("## Keyword Analysis\n\n");
        output.push_str(&format!(
            "**Match Score:** {:.1}% ({})\n\n",
            keywords.match_score,
            report.keyword_band().label()
        ));
        output.push_str("| Job keywords | Resume keywords | Matched | Missing |\n");
        output.push_str("|--------------|-----------------|---------|---------|\n");
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n\n",
            keywords.total_job_keywords, keywords.total_resume_keywords, keywords.matched_count, keywords.missing_count
        ));
        output.push_str(&format!("**Matched:** {}\n\n", keyword_list(&keywords.matched_keywords)));
        output.push_str(&format!("**Missing:** {}\n\n", keyword_list(&keywords.missing_keywords)));
        output.push_str(&format!("**Extra:** {}\n\n", keyword_list(&keywords.extra_keywords)));

        output.push_str("### Recommendations\n\n");
        for rec in &keywords.recommendations {
            output.push_str(&format!("- {}\n", rec));
        }
        output.push('\n');

        if let Some(feedback) = &report.ai_feedback {
            output.push_str("## AI Feedback\n\n");
            if feedback.is_fallback() {
                output.push_str("**AI feedback unavailable**\n\n");
            } else {
                output.push_str(&format!("**AI Match Score:** {:.0}%\n\n", feedback.match_score));
            }
            for (title, items) in [
                ("Strengths", &feedback.strengths),
                ("Weaknesses", &feedback.weaknesses),
                ("Suggestions", &feedback.suggestions),
            ] {
                if items.is_empty() {
                    continue;
                }
                output.push_str(&format!("### {}\n\n", title));
                for item in items {
                    output.push_str(&format!("- {}\n", item));
                }
                output.push('\n');
            }
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let keywords = &report.keyword_analysis;
        let band = report.keyword_band();
        let feedback = report.ai_feedback.as_ref();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            match_score: format!("{:.1}", keywords.match_score),
            score_class: band.css_class(),
            score_label: band.label(),
            matched_count: keywords.matched_count,
            missing_count: keywords.missing_count,
            total_job_keywords: keywords.total_job_keywords,
            total_resume_keywords: keywords.total_resume_keywords,
            matched_keywords: keywords.matched_keywords.clone(),
            missing_keywords: keywords.missing_keywords.clone(),
            extra_keywords: keywords.extra_keywords.clone(),
            recommendations: keywords.recommendations.clone(),
            has_feedback: feedback.is_some(),
            ai_available: feedback.is_some_and(|f| !f.is_fallback()),
            ai_score: feedback
                .map(|f| format!("{:.0}", f.match_score))
                .unwrap_or_default(),
            strengths: feedback.map(|f| f.strengths.clone()).unwrap_or_default(),
            weaknesses: feedback.map(|f| f.weaknesses.clone()).unwrap_or_default(),
            suggestions: feedback.map(|f| f.suggestions.clone()).unwrap_or_default(),
            resume_source: report.metadata.resume_source.clone(),
            resume_chars: report.metadata.resume_chars,
            job_source: report.metadata.job_source.clone(),
            job_chars: report.metadata.job_chars,
            version: report.metadata.version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(' ', "_"))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "resume".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::ResumeFeedback;
    use crate::input::{Document, DocumentKind};
    use crate::processing::compare_keywords;

    fn sample_report(feedback: Option<ResumeFeedback>) -> AnalysisReport {
        let resume = Document::new(DocumentKind::Resume, "jane_doe.pdf", "Rust Tokio Postgres engineer");
        let job = Document::new(DocumentKind::JobDescription, "job.txt", "Rust Kafka Postgres <script>");
        let result = compare_keywords(&resume.text, &job.text);
        AnalysisReport::new(&resume, &job, result, feedback)
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report(None);
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("Match Score: 50.0% [POOR]"));
        assert!(output.contains("✅ Matched: rust, postgres"));
        assert!(output.contains("⚠️  Missing: kafka, script"));
        assert!(output.contains("➕ Extra: tokio, engineer"));
        assert!(!output.contains("AI Feedback"));
    }

    #[test]
    fn test_console_shows_fallback_feedback() {
        let report = sample_report(Some(ResumeFeedback::fallback("Error contacting AI service: timeout")));
        let output = ConsoleFormatter::new(false, false).format_report(&report).unwrap();

        assert!(output.contains("AI feedback unavailable"));
        assert!(output.contains("Error contacting AI service: timeout"));
        assert!(!output.contains("Extra:"));
    }

    #[test]
    fn test_json_round_trips_report() {
        let report = sample_report(Some(ResumeFeedback::new(
            80.0,
            vec!["Rust".to_string()],
            vec![],
            vec!["Add Kafka".to_string()],
        )));
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["keyword_analysis"]["match_score"], 50.0);
        assert_eq!(value["keyword_analysis"]["missing_count"], 2);
        assert_eq!(value["ai_feedback"]["suggestions"][0], "Add Kafka");
        assert_eq!(value["metadata"]["resume_source"], "jane_doe.pdf");
    }

    #[test]
    fn test_markdown_sections() {
        let report = sample_report(Some(ResumeFeedback::new(65.0, vec![], vec!["No Kafka".to_string()], vec![])));
        let output = MarkdownFormatter::new(true).format_report(&report).unwrap();

        assert!(output.contains("# Resume Keyword Match Report"));
        assert!(output.contains("**Match Score:** 50.0% (POOR)"));
        assert!(output.contains("### Weaknesses"));
        assert!(!output.contains("### Strengths"));
    }

    #[test]
    fn test_html_lists_keywords() {
        let report = sample_report(None);
        let output = HtmlFormatter::new(false).format_report(&report).unwrap();

        assert!(output.contains("<span>rust</span>"));
        assert!(output.contains("Match Score: 50.0%"));
        assert!(!output.contains("<style>"));
        assert!(!output.contains("AI Feedback"));
    }

    #[test]
    fn test_markdown_marks_fallback_feedback() {
        let report = sample_report(Some(ResumeFeedback::fallback("Error parsing AI response: EOF")));
        let output = MarkdownFormatter::new(false).format_report(&report).unwrap();

        assert!(output.contains("**AI feedback unavailable**"));
        assert!(!output.contains("AI Match Score"));
        assert!(output.contains("- Error parsing AI response: EOF"));
        assert!(!output.contains("**Generated:**"));
    }

    #[test]
    fn test_html_marks_fallback_feedback() {
        let report = sample_report(Some(ResumeFeedback::fallback("Error contacting AI service: timeout")));
        let output = HtmlFormatter::new(true).format_report(&report).unwrap();

        assert!(output.contains("<style>"));
        assert!(output.contains("AI feedback unavailable"));
        assert!(!output.contains("AI Match Score"));
        assert!(output.contains("<li>Error contacting AI service: timeout</li>"));

        let report = sample_report(Some(ResumeFeedback::new(72.0, vec![], vec![], vec!["Add Kafka".to_string()])));
        let output = HtmlFormatter::new(true).format_report(&report).unwrap();
        assert!(output.contains("AI Match Score: 72%"));
    }

    #[test]
    fn test_generator_metadata_follows_detail_level() {
        let report = sample_report(None);

        let brief = ReportGenerator::with_options(false, false)
            .generate_report(&report, &OutputFormat::Markdown)
            .unwrap();
        assert!(!brief.contains("**Resume:** `jane_doe.pdf`"));

        let detailed = ReportGenerator::with_options(false, true)
            .generate_report(&report, &OutputFormat::Markdown)
            .unwrap();
        assert!(detailed.contains("**Resume:** `jane_doe.pdf`"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Json, "cv/Jane Doe.pdf", false), "Jane_Doe_match.json");
        assert_eq!(suggest_filename(&OutputFormat::Html, "", false), "resume_match.html");
    }
}
