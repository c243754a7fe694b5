//! Resume matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use feedback::{get_resume_feedback, ResumeFeedback};
pub use input::extract_text_from_pdf;
pub use processing::{compare_keywords, extract_keywords, ComparisonResult};
