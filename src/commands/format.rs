use std::io::{self, Write};

use anyhow::{Context, Result};
use patent_report::report::ContentFormatter;
use tracing::info;

use crate::cli::FormatArgs;
use crate::util::{decode_lossy, read_input_bytes};

pub fn run(args: FormatArgs) -> Result<()> {
    let formatter = ContentFormatter::new()?;
    let text = decode_lossy(&read_input_bytes(&args.input)?);

    let formatted = formatter.format(&text);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{formatted}").context("failed to write formatted content")?;

    info!(
        input = %args.input.display(),
        input_chars = text.chars().count(),
        output_chars = formatted.chars().count(),
        "format completed"
    );

    Ok(())
}
