//! CLI interface for the resume matcher

use crate::config::{Config, OutputFormat};
use crate::error::{MatcherError, Result as MatcherResult};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(version)]
#[command(about = "Resume and job description keyword matching with AI feedback")]
#[command(long_about = "Score how many job-description keywords a resume covers, list the gaps, and optionally ask an AI reviewer for a written critique")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a resume with a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Resume text pasted on the command line
        #[arg(long, value_name = "TEXT")]
        resume_text: Option<String>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text pasted on the command line
        #[arg(long, value_name = "TEXT")]
        job_text: Option<String>,

        /// Skip the AI feedback request (keyword analysis only)
        #[arg(long)]
        no_ai: bool,

        /// Show extra keywords and source details
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory with a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Show the keywords extracted from one document
    Keywords {
        /// Path to a PDF, TXT or MD file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Text to analyze
        #[arg(short, long)]
        text: Option<String>,

        /// Minimum keyword length (defaults to the configured value)
        #[arg(short, long)]
        min_length: Option<usize>,

        /// Number of most frequent keywords to list
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Run a `config` subcommand and return the text to print.
///
/// Only `show` reads the file, so `path` and `reset` still work when the
/// existing configuration cannot be parsed.
pub fn run_config_action(action: Option<ConfigAction>, config_path: &Path) -> MatcherResult<String> {
    match action {
        Some(ConfigAction::Show) | None => {
            let config = Config::load_from(config_path)?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
            let key_state = if config.api_key().is_some() { "set" } else { "not set" };
            Ok(format!(
                "⚙️  Current Configuration ({})\n\n{}\nAPI key ({}): {}",
                config_path.display(),
                rendered,
                config.feedback.api_key_env,
                key_state
            ))
        }

        Some(ConfigAction::Reset) => {
            Config::default().save_to(config_path)?;
            Ok(format!("✅ Configuration reset to defaults: {}", config_path.display()))
        }

        Some(ConfigAction::Path) => Ok(config_path.display().to_string()),
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_with_pasted_text() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--resume-text",
            "Rust engineer",
            "--job",
            "job.txt",
            "--no-ai",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { resume, resume_text, job, no_ai, output, .. } => {
                assert!(resume.is_none());
                assert_eq!(resume_text.as_deref(), Some("Rust engineer"));
                assert_eq!(job, Some(PathBuf::from("job.txt")));
                assert!(no_ai);
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_config_path_and_reset_survive_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "matching = not toml").unwrap();

        assert!(run_config_action(Some(ConfigAction::Show), &path).is_err());
        assert_eq!(
            run_config_action(Some(ConfigAction::Path), &path).unwrap(),
            path.display().to_string()
        );

        run_config_action(Some(ConfigAction::Reset), &path).unwrap();
        let shown = run_config_action(None, &path).unwrap();
        assert!(shown.contains("min_keyword_length = 3"));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("resume.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("resume"), &["pdf"]).is_err());
    }
}
