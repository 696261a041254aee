use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::SectionsArgs;
use crate::formatter::{FormattedSection, SectionClassifier, SectionCounts, SectionKind, preview};
use crate::model::{SectionReport, SourceInfo};
use crate::util::{now_utc_string, read_input, sha256_bytes, write_json_pretty, write_json_stdout};

const REPORT_VERSION: u32 = 1;

pub fn run(args: SectionsArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let classifier = SectionClassifier::new(args.heading_match)?;

    info!(
        input = %args.input.display(),
        heading_match = args.heading_match.as_str(),
        max_length = ?args.max_length,
        "classifying text"
    );

    let report = build_report(&classifier, &args.input, &text, args.max_length);

    info!(
        sections = report.counts.total,
        headings = report.counts.heading,
        section_markers = report.counts.section,
        paragraphs = report.counts.paragraph,
        list_items = report.counts.list_item,
        metadata = report.counts.metadata,
        boundary = report.boundary.as_str(),
        "classification completed"
    );

    if let Some(output_path) = args.output.as_deref() {
        write_json_pretty(output_path, &report)?;
        info!(path = %output_path.display(), "wrote section report");
        return Ok(());
    }

    if args.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    for section in &report.sections {
        writeln!(output, "{}", format_section_line(section))?;
    }
    output.flush()?;
    Ok(())
}

pub fn build_report(
    classifier: &SectionClassifier,
    input: &Path,
    text: &str,
    max_length: Option<usize>,
) -> SectionReport {
    let shown = preview(text, max_length);
    if shown.is_truncated() {
        debug!(
            boundary = shown.boundary.as_str(),
            kept_chars = shown.text.chars().count(),
            "truncated text before classifying"
        );
    }

    let sections = classifier.parse_sections(shown.text);

    SectionReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        source: SourceInfo {
            path: input.display().to_string(),
            sha256: sha256_bytes(text.as_bytes()),
            char_count: text.chars().count(),
            line_count: text.lines().count(),
        },
        heading_match: classifier.heading_match(),
        max_length,
        boundary: shown.boundary,
        counts: SectionCounts::tally(&sections),
        sections,
    }
}

/// One line of plain-text output; headings are indented by their level.
pub fn format_section_line(section: &FormattedSection) -> String {
    match (section.kind, section.level) {
        (SectionKind::Heading, Some(level)) => format!(
            "{}[heading {}] {}",
            "  ".repeat(usize::from(level.saturating_sub(1))),
            level,
            section.content
        ),
        (kind, _) => format!("[{}] {}", kind.as_str(), section.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{Boundary, HeadingMatch};

    #[test]
    fn build_report_counts_sections_and_records_source() {
        let classifier =
            SectionClassifier::new(HeadingMatch::Uppercase).expect("classifier should build");
        let text = "ARTICLE II ZONING\nSec. 66-4.\nLots shall front a road.\n";

        let report = build_report(&classifier, Path::new("zoning.txt"), text, None);

        assert_eq!(report.source.path, "zoning.txt");
        assert_eq!(report.source.line_count, 3);
        assert_eq!(report.source.char_count, text.chars().count());
        assert_eq!(report.source.sha256, sha256_bytes(text.as_bytes()));
        assert_eq!(report.boundary, Boundary::Untruncated);
        assert_eq!(report.counts.heading, 1);
        assert_eq!(report.counts.section, 1);
        assert_eq!(report.counts.paragraph, 1);
        assert_eq!(report.heading_match, HeadingMatch::Uppercase);
    }

    #[test]
    fn build_report_classifies_the_truncated_text() {
        let classifier =
            SectionClassifier::new(HeadingMatch::Literal).expect("classifier should build");
        let text = format!("Sec. 66-1.\n{}", "word ".repeat(100));

        let report = build_report(&classifier, Path::new("-"), &text, Some(50));

        assert_eq!(report.boundary, Boundary::Word);
        assert_eq!(report.counts.section, 1);
        assert_eq!(report.counts.paragraph, 1);
        assert!(report.sections[1].content.chars().count() < 50);
    }

    #[test]
    fn report_json_uses_snake_case_settings() {
        let classifier =
            SectionClassifier::new(HeadingMatch::Literal).expect("classifier should build");
        let report = build_report(&classifier, Path::new("-"), "(Res. 1)", None);

        let value = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(value["heading_match"], "literal");
        assert_eq!(value["boundary"], "untruncated");
        assert_eq!(value["counts"]["metadata"], 1);
        assert_eq!(value["sections"][0]["type"], "metadata");
        assert!(value["max_length"].is_null());
    }

    #[test]
    fn format_section_line_indents_headings_by_level() {
        let article = FormattedSection {
            kind: SectionKind::Heading,
            content: "ARTICLE I".to_string(),
            level: Some(2),
        };
        let item = FormattedSection {
            kind: SectionKind::ListItem,
            content: "1. Scope".to_string(),
            level: None,
        };

        assert_eq!(format_section_line(&article), "  [heading 2] ARTICLE I");
        assert_eq!(format_section_line(&item), "[list-item] 1. Scope");
    }
}
