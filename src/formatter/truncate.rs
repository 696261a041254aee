use serde::Serialize;

use super::sections::trim_display;

const SENTENCE_RATIO: f64 = 0.7;
const LINE_RATIO: f64 = 0.7;
const WORD_RATIO: f64 = 0.8;

/// Where a preview was cut.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    Untruncated,
    Sentence,
    Line,
    Word,
    Hard,
}

impl Boundary {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Untruncated => "untruncated",
            Self::Sentence => "sentence",
            Self::Line => "line",
            Self::Word => "word",
            Self::Hard => "hard",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Preview<'a> {
    pub text: &'a str,
    pub boundary: Boundary,
}

impl Preview<'_> {
    pub fn is_truncated(&self) -> bool {
        self.boundary != Boundary::Untruncated
    }
}

/// Display text bounded by `max_length` characters, cut at the latest
/// sentence, line or word break that keeps enough of the window.
pub fn format_text_for_display(text: &str, max_length: Option<usize>) -> &str {
    preview(text, max_length).text
}

/// Same as [`format_text_for_display`], also reporting which boundary was used.
///
/// Lengths are counted in chars. `Some(0)` is treated like `None`.
pub fn preview(text: &str, max_length: Option<usize>) -> Preview<'_> {
    let untouched = Preview {
        text: trim_display(text),
        boundary: Boundary::Untruncated,
    };

    let Some(max_length) = max_length.filter(|value| *value > 0) else {
        return untouched;
    };
    let Some((window_end, _)) = text.char_indices().nth(max_length) else {
        return untouched;
    };

    let window = &text[..window_end];
    let marks = BoundaryMarks::scan(window);

    if let Some(mark) = marks.period.filter(|mark| mark.beyond(max_length, SENTENCE_RATIO)) {
        return Preview {
            text: trim_display(&window[..mark.byte + '.'.len_utf8()]),
            boundary: Boundary::Sentence,
        };
    }

    if let Some(mark) = marks.newline.filter(|mark| mark.beyond(max_length, LINE_RATIO)) {
        return Preview {
            text: trim_display(&window[..mark.byte]),
            boundary: Boundary::Line,
        };
    }

    if let Some(mark) = marks.space.filter(|mark| mark.beyond(max_length, WORD_RATIO)) {
        return Preview {
            text: trim_display(&window[..mark.byte]),
            boundary: Boundary::Word,
        };
    }

    Preview {
        text: trim_display(window),
        boundary: Boundary::Hard,
    }
}

#[derive(Copy, Clone, Debug)]
struct Mark {
    index: usize,
    byte: usize,
}

impl Mark {
    fn beyond(self, max_length: usize, ratio: f64) -> bool {
        self.index as f64 > max_length as f64 * ratio
    }
}

#[derive(Debug, Default)]
struct BoundaryMarks {
    period: Option<Mark>,
    newline: Option<Mark>,
    space: Option<Mark>,
}

impl BoundaryMarks {
    fn scan(window: &str) -> Self {
        let mut marks = Self::default();

        for (index, (byte, value)) in window.char_indices().enumerate() {
            let mark = Some(Mark { index, byte });
            match value {
                '.' => marks.period = mark,
                '\n' => marks.newline = mark,
                ' ' => marks.space = mark,
                _ => {}
            }
        }

        marks
    }
}
