//! Input manager for handling different file types

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Resume,
    JobDescription,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Resume => write!(f, "resume"),
            DocumentKind::JobDescription => write!(f, "job description"),
        }
    }
}

/// Where a document's text comes from: an uploaded file or pasted text
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    File(PathBuf),
    Inline(String),
}

impl TextSource {
    /// Prefer the file when both are given, mirroring upload-over-paste
    pub fn from_args(file: Option<PathBuf>, text: Option<String>) -> Option<Self> {
        match (file, text) {
            (Some(path), _) => Some(TextSource::File(path)),
            (None, Some(text)) => Some(TextSource::Inline(text)),
            (None, None) => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TextSource::File(path) => path.display().to_string(),
            TextSource::Inline(_) => "pasted text".to_string(),
        }
    }
}

/// Raw text of one resume or job description, read once per comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: DocumentKind,
    pub source: String,
    pub text: String,
}

impl Document {
    pub fn new(kind: DocumentKind, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Resolve a source into a document; pasted text is trimmed
    pub async fn load(&mut self, kind: DocumentKind, source: &TextSource) -> Result<Document> {
        let text = match source {
            TextSource::File(path) => self.extract_text(path).await?,
            TextSource::Inline(text) => text.trim().to_string(),
        };

        debug!("Loaded {} from {}: {} characters", kind, source.label(), text.chars().count());
        Ok(Document::new(kind, source.label(), text))
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            MatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
