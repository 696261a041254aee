use anyhow::{Context, Result};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Heading,
    Section,
    Paragraph,
    ListItem,
    Metadata,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Heading => "heading",
            SectionKind::Section => "section",
            SectionKind::Paragraph => "paragraph",
            SectionKind::ListItem => "list-item",
            SectionKind::Metadata => "metadata",
        }
    }
}

/// One classified unit of display text.
///
/// `level` is only set for headings: 1 for chapter scope, 2 for article scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl FormattedSection {
    fn heading(content: &str, level: u8) -> Self {
        Self {
            kind: SectionKind::Heading,
            content: content.to_string(),
            level: Some(level),
        }
    }

    fn plain(kind: SectionKind, content: &str) -> Self {
        Self {
            kind,
            content: content.to_string(),
            level: None,
        }
    }
}

/// How chapter and article heading lines are recognised.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HeadingMatch {
    /// Case-sensitive `Chapter` / `Article` plus an upper-case-invariant line.
    /// The two conditions exclude each other, so no heading is ever produced.
    #[default]
    Literal,
    /// `CHAPTER` / `ARTICLE` plus an upper-case-invariant line.
    Uppercase,
}

impl HeadingMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Uppercase => "uppercase",
        }
    }

    fn keywords(self) -> (&'static str, &'static str) {
        match self {
            Self::Literal => ("Chapter", "Article"),
            Self::Uppercase => ("CHAPTER", "ARTICLE"),
        }
    }
}

/// First-match-wins classification of a single trimmed, non-blank line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LineClass {
    ChapterHeading,
    ArticleHeading,
    SectionMarker,
    Subsection,
    ParentheticalMetadata,
    EffectiveDate,
    ListItem,
    Text,
}

impl LineClass {
    /// The section a line of this class emits on its own, or `None` for
    /// paragraph text that is buffered until the next flush.
    fn standalone(self, line: &str) -> Option<FormattedSection> {
        match self {
            LineClass::ChapterHeading => Some(FormattedSection::heading(line, 1)),
            LineClass::ArticleHeading => Some(FormattedSection::heading(line, 2)),
            LineClass::SectionMarker | LineClass::Subsection => {
                Some(FormattedSection::plain(SectionKind::Section, line))
            }
            LineClass::ParentheticalMetadata | LineClass::EffectiveDate => {
                Some(FormattedSection::plain(SectionKind::Metadata, line))
            }
            LineClass::ListItem => Some(FormattedSection::plain(SectionKind::ListItem, line)),
            LineClass::Text => None,
        }
    }
}

#[derive(Debug)]
pub struct SectionClassifier {
    heading_match: HeadingMatch,
    section_marker: Regex,
    subsection: Regex,
    numbered_item: Regex,
}

impl SectionClassifier {
    pub fn new(heading_match: HeadingMatch) -> Result<Self> {
        Ok(Self {
            heading_match,
            section_marker: Regex::new(r"^Sec\.\s+[0-9]+[-0-9]*\.?$")
                .context("failed to compile section marker regex")?,
            subsection: Regex::new(r"^[0-9]+\.[0-9]+\s+")
                .context("failed to compile subsection number regex")?,
            numbered_item: Regex::new(r"^[0-9]+\.\s")
                .context("failed to compile numbered list item regex")?,
        })
    }

    pub fn heading_match(&self) -> HeadingMatch {
        self.heading_match
    }

    pub fn classify_line(&self, line: &str) -> LineClass {
        let (chapter, article) = self.heading_match.keywords();

        if is_heading_line(line, chapter) {
            LineClass::ChapterHeading
        } else if is_heading_line(line, article) {
            LineClass::ArticleHeading
        } else if self.section_marker.is_match(line) {
            LineClass::SectionMarker
        } else if self.subsection.is_match(line) {
            LineClass::Subsection
        } else if is_parenthetical(line) {
            LineClass::ParentheticalMetadata
        } else if line.starts_with("Effective on:") {
            LineClass::EffectiveDate
        } else if self.is_list_item(line) {
            LineClass::ListItem
        } else {
            LineClass::Text
        }
    }

    pub fn parse_sections(&self, text: &str) -> Vec<FormattedSection> {
        let mut sections = Vec::<FormattedSection>::new();
        let mut paragraph = ParagraphBuffer::default();

        for raw_line in text.split('\n') {
            let line = trim_display(raw_line);
            if line.is_empty() {
                continue;
            }

            match self.classify_line(line).standalone(line) {
                Some(section) => {
                    sections.extend(paragraph.flush());
                    sections.push(section);
                }
                None => paragraph.push(line),
            }
        }

        sections.extend(paragraph.flush());
        sections
    }

    fn is_list_item(&self, line: &str) -> bool {
        self.numbered_item.is_match(line) || line.starts_with('•') || line.starts_with('-')
    }
}

#[derive(Debug, Default)]
struct ParagraphBuffer<'a> {
    lines: Vec<&'a str>,
}

impl<'a> ParagraphBuffer<'a> {
    fn push(&mut self, line: &'a str) {
        self.lines.push(line);
    }

    fn flush(&mut self) -> Option<FormattedSection> {
        if self.lines.is_empty() {
            return None;
        }

        let content = self.lines.join(" ");
        self.lines.clear();
        Some(FormattedSection {
            kind: SectionKind::Paragraph,
            content,
            level: None,
        })
    }
}

fn is_heading_line(line: &str, keyword: &str) -> bool {
    line.contains(keyword) && line.to_uppercase() == line
}

fn is_parenthetical(line: &str) -> bool {
    line.starts_with('(') && line.ends_with(')')
}

/// Trims surrounding whitespace and a stray byte-order mark. NEL (U+0085) is
/// kept as content.
pub(crate) fn trim_display(text: &str) -> &str {
    text.trim_matches(|value: char| {
        (value.is_whitespace() && value != '\u{85}') || value == '\u{feff}'
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    pub total: usize,
    pub heading: usize,
    pub section: usize,
    pub paragraph: usize,
    pub list_item: usize,
    pub metadata: usize,
}

impl SectionCounts {
    pub fn tally(sections: &[FormattedSection]) -> Self {
        let mut counts = Self {
            total: sections.len(),
            ..Self::default()
        };

        for section in sections {
            match section.kind {
                SectionKind::Heading => counts.heading += 1,
                SectionKind::Section => counts.section += 1,
                SectionKind::Paragraph => counts.paragraph += 1,
                SectionKind::ListItem => counts.list_item += 1,
                SectionKind::Metadata => counts.metadata += 1,
            }
        }

        counts
    }
}
