//! Best-effort PDF text extraction.
//!
//! Every strategy runs against the same bytes; the one producing the most
//! characters wins and its output is cleaned into a single line of text.
//! Nothing here returns an error: a PDF nobody can read yields "".

use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::LazyLock;

static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--- PAGE \d+ ---").expect("Invalid page marker regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Lines this short or shorter are layout debris
const MIN_LINE_CHARS: usize = 3;

pub type StrategyFn = fn(&[u8]) -> anyhow::Result<String>;

/// A named way of pulling text out of PDF bytes
#[derive(Clone, Copy)]
pub struct ExtractionStrategy {
    pub name: &'static str,
    pub extract: StrategyFn,
}

pub const DEFAULT_STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "pdf-extract",
        extract: extract_with_pdf_extract,
    },
    ExtractionStrategy {
        name: "lopdf",
        extract: extract_with_lopdf,
    },
];

/// Read a PDF from disk and return its cleaned text, or "" on failure
pub fn extract_text_from_pdf(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!("PDF file size: {} bytes ({})", bytes.len(), path.display());
            extract_text_from_bytes(&bytes)
        }
        Err(e) => {
            warn!("Could not read PDF '{}': {}", path.display(), e);
            String::new()
        }
    }
}

pub fn extract_text_from_bytes(bytes: &[u8]) -> String {
    extract_best(bytes, DEFAULT_STRATEGIES)
}

/// Run every strategy and clean the longest non-empty output
pub fn extract_best(bytes: &[u8], strategies: &[ExtractionStrategy]) -> String {
    let mut best: Option<(&'static str, String, usize)> = None;

    for strategy in strategies {
        match run_strategy(strategy, bytes) {
            Ok(text) => {
                let length = text.chars().count();
                debug!("{}: {} characters", strategy.name, length);
                let longer = best.as_ref().map_or(true, |(_, _, best_len)| length > *best_len);
                if length > 0 && longer {
                    best = Some((strategy.name, text, length));
                }
            }
            Err(e) => warn!("{} failed: {:#}", strategy.name, e),
        }
    }

    match best {
        Some((name, text, length)) => {
            info!("Best extraction method: {} ({} characters)", name, length);
            let cleaned = clean_extracted_text(&text);
            debug!("Final cleaned text length: {}", cleaned.chars().count());
            cleaned
        }
        None => {
            warn!("No text could be extracted from PDF using any method");
            String::new()
        }
    }
}

fn run_strategy(strategy: &ExtractionStrategy, bytes: &[u8]) -> anyhow::Result<String> {
    // pdf parsers panic on some malformed inputs
    panic::catch_unwind(AssertUnwindSafe(|| (strategy.extract)(bytes)))
        .unwrap_or_else(|_| Err(anyhow!("{} panicked while parsing", strategy.name)))
}

fn extract_with_pdf_extract(bytes: &[u8]) -> anyhow::Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| anyhow!("pdf-extract: {}", e))
}

fn extract_with_lopdf(bytes: &[u8]) -> anyhow::Result<String> {
    let doc = lopdf::Document::load_mem(bytes).context("lopdf could not load document")?;

    let mut text = String::new();
    for (index, page_number) in doc.get_pages().keys().enumerate() {
        let page_text = doc
            .extract_text(&[*page_number])
            .with_context(|| format!("lopdf could not read page {}", page_number))?;
        text.push_str(&format!("\n--- PAGE {} ---\n", index + 1));
        text.push_str(&page_text);
        text.push('\n');
    }
    Ok(text)
}

/// Strip page markers and layout noise, collapsing the text to single spaces
pub fn clean_extracted_text(text: &str) -> String {
    let without_markers = PAGE_MARKER.replace_all(text, "");

    let lines: Vec<&str> = without_markers
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .collect();

    let joined = lines.join(" ").replace('\0', "").replace('\r', " ");
    WHITESPACE.replace_all(&joined, " ").trim().to_string()
}
