use std::io::{self, Write};

use anyhow::Result;
use tracing::info;

use crate::cli::PreviewArgs;
use crate::formatter::{format_text_for_display, preview};
use crate::util::read_input;

pub fn run(args: PreviewArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let shown = preview(&text, args.max_length);

    info!(
        input = %args.input.display(),
        max_length = ?args.max_length,
        source_chars = text.chars().count(),
        kept_chars = shown.text.chars().count(),
        boundary = shown.boundary.as_str(),
        "preview rendered"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    write_preview(&mut output, &text, args.max_length)?;
    output.flush()?;
    Ok(())
}

fn write_preview<W: Write>(output: &mut W, text: &str, max_length: Option<usize>) -> Result<()> {
    writeln!(output, "{}", format_text_for_display(text, max_length))?;
    Ok(())
}
