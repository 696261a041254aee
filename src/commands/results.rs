use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::ResultsArgs;
use crate::formatter::{SectionClassifier, preview};
use crate::model::{Relevance, RenderedResult, RenderedResults, SearchResponse};
use crate::util::{now_utc_string, write_json_stdout};

const TRUNCATION_MARKER: &str = "...";

pub fn run(args: ResultsArgs) -> Result<()> {
    let response = load_search_response(&args.input)?;
    let classifier = SectionClassifier::new(args.heading_match)?;

    info!(
        input = %args.input.display(),
        query = %response.query,
        results = response.results.len(),
        max_length = args.max_length,
        "rendering search results"
    );

    let rendered = render_results(&classifier, response, args.max_length);
    let truncated = rendered.results.iter().filter(|result| result.truncated).count();
    info!(
        returned = rendered.returned,
        truncated,
        "search results rendered"
    );

    if args.json {
        return write_json_stdout(&rendered);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    write_text_results(&mut output, &rendered)?;
    output.flush()?;
    Ok(())
}

pub fn load_search_response(path: &Path) -> Result<SearchResponse> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    if let Some(message) = value.get("error").and_then(|error| error.as_str()) {
        bail!("search response in {} is an error: {message}", path.display());
    }

    let response: SearchResponse = serde_json::from_value(value)
        .with_context(|| format!("invalid search response format in {}", path.display()))?;

    if response.query.trim().is_empty() {
        bail!("search response in {} has an empty query", path.display());
    }

    Ok(response)
}

pub fn render_results(
    classifier: &SectionClassifier,
    response: SearchResponse,
    max_length: usize,
) -> RenderedResults {
    let results = response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            let shown = preview(&result.text, Some(max_length));
            let relevance = format_relevance(&result.relevance);
            if relevance == "NaN" {
                warn!(rank = index + 1, "search result has no numeric relevance");
            }

            RenderedResult {
                rank: index + 1,
                section: result.section,
                account: result.account,
                id: result.id,
                collection: result
                    .collection
                    .or_else(|| response.collection.clone()),
                relevance,
                preview: shown.text.to_string(),
                truncated: shown.is_truncated(),
                boundary: shown.boundary,
                sections: classifier.parse_sections(shown.text),
            }
        })
        .collect::<Vec<RenderedResult>>();

    RenderedResults {
        query: response.query,
        collection: response.collection,
        collection_name: response.collection_name,
        generated_at: now_utc_string(),
        max_length,
        heading_match: classifier.heading_match(),
        returned: results.len(),
        results,
    }
}

pub fn format_relevance(relevance: &Relevance) -> String {
    match relevance.score() {
        Some(score) => format!("{score:.3}"),
        None => "NaN".to_string(),
    }
}

fn write_text_results<W: Write>(output: &mut W, rendered: &RenderedResults) -> Result<()> {
    writeln!(output, "Search Results for \"{}\"", rendered.query)?;

    if rendered.results.is_empty() {
        writeln!(output, "No results found")?;
        return Ok(());
    }

    writeln!(output, "{} result(s) found", rendered.returned)?;

    for result in &rendered.results {
        let label = result
            .section
            .as_deref()
            .or(result.account.as_deref())
            .or(result.id.as_deref())
            .unwrap_or("(unlabelled)");

        writeln!(output)?;
        writeln!(
            output,
            "{}.\tSection {}\tRelevance: {}",
            result.rank, label, result.relevance
        )?;

        let marker = if result.truncated { TRUNCATION_MARKER } else { "" };
        let body = format!("{}{}", result.preview, marker);
        for line in body.lines() {
            writeln!(output, "\t{line}")?;
        }
    }

    Ok(())
}
