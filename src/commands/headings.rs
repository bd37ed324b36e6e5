use std::io::{self, Write};

use anyhow::{Context, Result};
use patent_report::report::{HeaderMatcher, HeadingMatch};
use serde::Serialize;
use tracing::info;

use crate::cli::HeadingsArgs;
use crate::util::{decode_lossy, read_input_bytes};

#[derive(Debug, Serialize)]
struct HeadingLine {
    line: usize,
    rule: &'static str,
    title: String,
    raw: String,
}

pub fn run(args: HeadingsArgs) -> Result<()> {
    let matcher = HeaderMatcher::new(args.heading_title_max_chars)?;
    let text = decode_lossy(&read_input_bytes(&args.input)?);

    let headings = collect_headings(&matcher, &text);

    let mut stdout = io::stdout().lock();
    for heading in &headings {
        let written = if args.json {
            let data = serde_json::to_string(heading).context("failed to serialize heading")?;
            writeln!(stdout, "{data}")
        } else {
            writeln!(
                stdout,
                "{:>5}\t{:<20}\t{}",
                heading.line, heading.rule, heading.title
            )
        };
        written.context("failed to write heading to stdout")?;
    }

    info!(
        input = %args.input.display(),
        lines = text.lines().count(),
        headings = headings.len(),
        "heading scan completed"
    );

    Ok(())
}

fn collect_headings(matcher: &HeaderMatcher, text: &str) -> Vec<HeadingLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw_line)| {
            let HeadingMatch { rule, title } = matcher.classify(raw_line)?;
            Some(HeadingLine {
                line: index + 1,
                rule: rule.as_str(),
                title,
                raw: raw_line.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_headings_reports_line_numbers_and_rules() {
        let matcher = HeaderMatcher::new(100).expect("heading rules should compile");
        let text = "머리말\n## 개요\n본문입니다.\n\n【핵심 요약】\n- 일반 항목";

        let headings = collect_headings(&matcher, text);

        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].line, 2);
        assert_eq!(headings[0].rule, "atx");
        assert_eq!(headings[0].title, "개요");
        assert_eq!(headings[1].line, 5);
        assert_eq!(headings[1].rule, "decorated");
        assert_eq!(headings[1].raw, "【핵심 요약】");
    }
}
