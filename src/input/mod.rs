//! Input processing module
//! Handles file detection, text extraction, and input management

pub mod file_detector;
pub mod pdf;
pub mod text_extractor;
pub mod manager;

pub use manager::{Document, DocumentKind, InputManager, TextSource};
pub use pdf::extract_text_from_pdf;
