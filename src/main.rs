//! Resume matcher: keyword overlap scoring with optional AI critique

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::feedback::get_resume_feedback;
use resume_matcher::input::{DocumentKind, InputManager, TextSource};
use resume_matcher::output::{save_report_to_file, suggest_filename, AnalysisReport, ReportGenerator};
use resume_matcher::processing::{keyword_frequency, ExclusionSets, KeywordComparator, KeywordExtractor};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const RESUME_REQUIRED: &str = "Please either upload a PDF or paste your resume text";
const JOB_REQUIRED: &str = "Please provide a job description";

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // A local .env may carry the API key
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // `config` must stay usable when the file itself is broken
    let command = match cli.command {
        Commands::Config { action } => {
            if let Err(e) = run_config(action, &config_path) {
                error!("Command failed: {}", e);
                process::exit(1);
            }
            return;
        }
        command => command,
    };

    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            resume_text,
            job,
            job_text,
            no_ai,
            detailed,
            output,
            save,
            no_color,
        } => {
            let resume_source = TextSource::from_args(resume, resume_text)
                .ok_or_else(|| MatcherError::InvalidInput(RESUME_REQUIRED.to_string()))?;
            let job_source = TextSource::from_args(job, job_text)
                .ok_or_else(|| MatcherError::InvalidInput(JOB_REQUIRED.to_string()))?;

            if let TextSource::File(path) = &resume_source {
                cli::validate_file_extension(path, &["pdf", "txt", "md"])
                    .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            }
            if let TextSource::File(path) = &job_source {
                cli::validate_file_extension(path, &["txt", "md"])
                    .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            info!("Resume: {}", resume_source.label());
            info!("Job description: {}", job_source.label());

            let mut input_manager = InputManager::new();
            let resume_doc = input_manager.load(DocumentKind::Resume, &resume_source).await?;
            if resume_doc.is_blank() {
                return Err(MatcherError::InvalidInput(RESUME_REQUIRED.to_string()));
            }
            let job_doc = input_manager.load(DocumentKind::JobDescription, &job_source).await?;
            if job_doc.is_blank() {
                return Err(MatcherError::InvalidInput(JOB_REQUIRED.to_string()));
            }

            let exclusions = ExclusionSets::new().with_extra_stop_words(&config.matching.extra_stop_words);
            let comparator = KeywordComparator::from_config(&config.matching, &exclusions);
            let keyword_analysis = comparator.compare(&resume_doc.text, &job_doc.text);
            info!(
                "Keyword match: {:.1}% ({} of {} job keywords)",
                keyword_analysis.match_score, keyword_analysis.matched_count, keyword_analysis.total_job_keywords
            );

            let ai_feedback = if no_ai || !config.feedback.enabled {
                info!("AI feedback disabled");
                None
            } else {
                let spinner = feedback_spinner();
                let api_key = config.api_key();
                let feedback =
                    get_resume_feedback(&resume_doc.text, &job_doc.text, api_key.as_deref(), &config.feedback).await;
                spinner.finish_and_clear();
                Some(feedback)
            };

            let report = AnalysisReport::new(&resume_doc, &job_doc, keyword_analysis, ai_feedback);

            let use_colors = config.output.color_output && !no_color;
            let generator = ReportGenerator::with_options(use_colors, detailed);
            println!("{}", generator.generate_report(&report, &output_format)?);

            if let Some(save_path) = save {
                let target = resolve_save_path(save_path, &output_format, &resume_source);
                // Files never carry terminal escape codes
                let plain = ReportGenerator::with_options(false, detailed).generate_report(&report, &output_format)?;
                save_report_to_file(&plain, &target)?;
                println!("💾 Report saved to: {}", target.display());
            }
        }

        Commands::Keywords {
            file,
            text,
            min_length,
            top,
        } => {
            let source = TextSource::from_args(file, text)
                .ok_or_else(|| MatcherError::InvalidInput("Provide --file or --text".to_string()))?;

            let mut input_manager = InputManager::new();
            let document = input_manager.load(DocumentKind::Resume, &source).await?;

            let exclusions = ExclusionSets::new().with_extra_stop_words(&config.matching.extra_stop_words);
            let min_length = min_length.unwrap_or(config.matching.min_keyword_length);
            let keywords = KeywordExtractor::with_exclusions(min_length, &exclusions).extract(&document.text);
            let frequencies = keyword_frequency(&keywords);

            let mut ranked: Vec<(&String, &usize)> = frequencies.iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

            println!("🔍 Keywords from {}\n", source.label());
            println!("Total keywords: {}", keywords.len());
            println!("Unique keywords: {}", frequencies.len());
            println!("\nSequence:");
            println!("  {}", keywords.join(" "));
            println!("\nMost frequent:");
            for (keyword, count) in ranked.into_iter().take(top) {
                println!("  {:<24} {}", keyword, count);
            }
        }

        Commands::Config { action } => run_config(action, config_path)?,
    }

    Ok(())
}

fn run_config(action: Option<ConfigAction>, config_path: &Path) -> Result<()> {
    println!("{}", cli::run_config_action(action, config_path)?);
    Ok(())
}

fn feedback_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Requesting AI feedback...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// A directory target gets a generated file name
fn resolve_save_path(save_path: PathBuf, format: &OutputFormat, resume_source: &TextSource) -> PathBuf {
    if !save_path.is_dir() {
        return save_path;
    }

    let resume_name = match resume_source {
        TextSource::File(path) => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("resume")
            .to_string(),
        TextSource::Inline(_) => "resume".to_string(),
    };
    save_path.join(suggest_filename(format, &resume_name, true))
}
