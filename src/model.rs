use serde::{Deserialize, Serialize};

use crate::formatter::{Boundary, FormattedSection, HeadingMatch, SectionCounts};

#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub path: String,
    pub sha256: String,
    pub char_count: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub report_version: u32,
    pub generated_at: String,
    pub source: SourceInfo,
    pub heading_match: HeadingMatch,
    pub max_length: Option<usize>,
    pub boundary: Boundary,
    pub counts: SectionCounts,
    pub sections: Vec<FormattedSection>,
}

/// Response body of the search service's simple search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    pub relevance: Relevance,
    #[serde(default)]
    pub collection: Option<String>,
}

/// The service reports relevance as a formatted string (or `N/A`); older
/// responses carry a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Relevance {
    Score(f64),
    Text(String),
}

impl Relevance {
    pub fn score(&self) -> Option<f64> {
        match self {
            Relevance::Score(value) => Some(*value),
            Relevance::Text(raw) => raw.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedResult {
    pub rank: usize,
    pub section: Option<String>,
    pub account: Option<String>,
    pub id: Option<String>,
    pub collection: Option<String>,
    pub relevance: String,
    pub preview: String,
    pub truncated: bool,
    pub boundary: Boundary,
    pub sections: Vec<FormattedSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedResults {
    pub query: String,
    pub collection: Option<String>,
    pub collection_name: Option<String>,
    pub generated_at: String,
    pub max_length: usize,
    pub heading_match: HeadingMatch,
    pub returned: usize,
    pub results: Vec<RenderedResult>,
}
