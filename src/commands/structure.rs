use anyhow::Result;
use patent_report::report::{ReportKind, ReportStructurer};
use tracing::{info, warn};

use crate::cli::StructureArgs;
use crate::util::{decode_lossy, print_json_pretty, read_input_bytes, write_json_pretty};

pub fn run(args: StructureArgs) -> Result<()> {
    let structurer = ReportStructurer::new(args.tuning.to_options())?;
    let kind = ReportKind::from(args.report_type);

    let bytes = read_input_bytes(&args.input)?;
    let text = decode_lossy(&bytes);

    info!(
        input = %args.input.display(),
        bytes = bytes.len(),
        report_type = kind.as_str(),
        "structuring analysis text"
    );

    let result = structurer.structure(&text, kind);

    if let Some(diagnostic) = &result.diagnostic {
        warn!(
            kind = diagnostic.kind.as_str(),
            message = %diagnostic.message,
            "structuring degraded"
        );
    }

    match &args.output {
        Some(path) => {
            write_json_pretty(path, &result)?;
            info!(path = %path.display(), "wrote structured report");
        }
        None => print_json_pretty(&result)?,
    }

    info!(
        sections = result.quality_metrics.section_count,
        total_chars = result.quality_metrics.total_content_length,
        strategy = result.quality_metrics.strategy.as_str(),
        "structure completed"
    );

    Ok(())
}
