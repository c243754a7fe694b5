//! Keyword matching: extraction, counting, comparison and recommendations

pub mod keywords;
pub mod comparator;
pub mod recommendations;

pub use comparator::{compare_keywords, ComparisonResult, KeywordComparator};
pub use keywords::{extract_keywords, keyword_frequency, ExclusionSets, KeywordExtractor};
pub use recommendations::generate_recommendations;
