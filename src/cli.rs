use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use patent_report::report::{ReportKind, StructureOptions};

#[derive(Parser, Debug)]
#[command(
    name = "patent-report",
    version,
    about = "Structure LLM-generated patent analysis text into titled report sections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Structure(StructureArgs),
    Headings(HeadingsArgs),
    Format(FormatArgs),
    Batch(BatchArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structure(_) => "structure",
            Self::Headings(_) => "headings",
            Self::Format(_) => "format",
            Self::Batch(_) => "batch",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportTypeArg {
    MarketAnalysis,
    BusinessInsights,
    Unspecified,
}

impl From<ReportTypeArg> for ReportKind {
    fn from(value: ReportTypeArg) -> Self {
        match value {
            ReportTypeArg::MarketAnalysis => ReportKind::MarketAnalysis,
            ReportTypeArg::BusinessInsights => ReportKind::BusinessInsights,
            ReportTypeArg::Unspecified => ReportKind::Unspecified,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StructureTuningArgs {
    #[arg(long, default_value_t = 20)]
    pub implicit_section_min_chars: usize,

    #[arg(long, default_value_t = 50)]
    pub paragraph_min_chars: usize,

    #[arg(long, default_value_t = 50)]
    pub paragraph_title_max_chars: usize,

    #[arg(long, default_value_t = 20)]
    pub sentence_min_chars: usize,

    #[arg(long, default_value_t = 3)]
    pub sentence_group_size: usize,

    #[arg(long, default_value_t = 100)]
    pub min_total_content_chars: usize,

    #[arg(long, default_value_t = 100)]
    pub heading_title_max_chars: usize,
}

impl StructureTuningArgs {
    pub fn to_options(&self) -> StructureOptions {
        StructureOptions {
            implicit_section_min_chars: self.implicit_section_min_chars,
            paragraph_min_chars: self.paragraph_min_chars,
            paragraph_title_max_chars: self.paragraph_title_max_chars,
            sentence_min_chars: self.sentence_min_chars,
            sentence_group_size: self.sentence_group_size,
            min_total_content_chars: self.min_total_content_chars,
            heading_title_max_chars: self.heading_title_max_chars,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StructureArgs {
    /// Analysis text file, or `-` for stdin.
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportTypeArg::Unspecified)]
    pub report_type: ReportTypeArg,

    #[command(flatten)]
    pub tuning: StructureTuningArgs,
}

#[derive(Args, Debug, Clone)]
pub struct HeadingsArgs {
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    #[arg(long, default_value_t = 100)]
    pub heading_title_max_chars: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    #[arg(long, default_value = "-")]
    pub input: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Defaults to `<input-dir>/reports`.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportTypeArg::Unspecified)]
    pub report_type: ReportTypeArg,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[command(flatten)]
    pub tuning: StructureTuningArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_commands_report_their_names_and_tuning() {
        let cli = Cli::try_parse_from([
            "patent-report",
            "batch",
            "--input-dir",
            "answers",
            "--report-type",
            "business-insights",
            "--sentence-group-size",
            "4",
        ])
        .expect("batch arguments should parse");

        assert_eq!(cli.command.name(), "batch");
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch command");
        };
        assert_eq!(ReportKind::from(args.report_type), ReportKind::BusinessInsights);
        let options = args.tuning.to_options();
        assert_eq!(options.sentence_group_size, 4);
        assert_eq!(options.paragraph_min_chars, 50);

        let cli = Cli::try_parse_from(["patent-report", "structure"])
            .expect("structure should default to stdin");
        assert_eq!(cli.command.name(), "structure");
    }
}
