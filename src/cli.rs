use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::formatter::HeadingMatch;

pub const DEFAULT_RESULT_PREVIEW_LENGTH: usize = 500;

#[derive(Parser, Debug)]
#[command(
    name = "codetext",
    version,
    about = "Structured display formatting for land-use code text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Sections(SectionsArgs),
    Preview(PreviewArgs),
    Results(ResultsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SectionsArgs {
    /// Text file to classify, or `-` for stdin.
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = HeadingMatch::Literal)]
    pub heading_match: HeadingMatch,

    /// Truncate the text for display before classifying it.
    #[arg(long)]
    pub max_length: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the JSON report to this path instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    #[arg(long)]
    pub max_length: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ResultsArgs {
    /// Saved search response JSON.
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = DEFAULT_RESULT_PREVIEW_LENGTH)]
    pub max_length: usize,

    #[arg(long, value_enum, default_value_t = HeadingMatch::Literal)]
    pub heading_match: HeadingMatch,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
