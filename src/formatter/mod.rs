mod sections;
mod truncate;

#[cfg(test)]
pub use sections::LineClass;
pub use sections::{FormattedSection, HeadingMatch, SectionClassifier, SectionCounts, SectionKind};
pub use truncate::{Boundary, format_text_for_display, preview};
