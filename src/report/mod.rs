//! Report structuring: heading detection, segmentation with a fallback
//! cascade, and section body normalization for LLM-generated patent reports.

mod fallback;
mod formatter;
mod header;
mod structurer;
mod types;

pub use formatter::ContentFormatter;
pub use header::{HeaderMatcher, HeadingMatch, HeadingRule};
pub use structurer::ReportStructurer;
pub use types::{
    Diagnostic, DiagnosticKind, QualityMetrics, ReportKind, ReportStructureResult, Section,
    StructureOptions, StructureStrategy,
};
