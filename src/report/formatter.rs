use anyhow::{Context, Result};
use regex::Regex;

/// Normalizes section bodies. It only rewrites leading decoration and blank-line
/// runs, so it never drops text and can be applied to every section.
#[derive(Debug)]
pub struct ContentFormatter {
    bold_label: Regex,
    bullet: Regex,
}

impl ContentFormatter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            bold_label: Regex::new(r"^(\s*)\*\*\s*([^*]*[^*\s])\s*\*\*\s*:\s*(.*\S)$")
                .context("failed to compile bold label regex")?,
            bullet: Regex::new(r"^(\s*)[•\-*·▪▫]\s+(\S.*)$")
                .context("failed to compile bullet regex")?,
        })
    }

    pub fn format(&self, content: &str) -> String {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

        let mut lines = Vec::<String>::new();
        let mut previous_blank = false;

        for raw_line in normalized.trim().lines() {
            let line = raw_line.trim_end();
            if line.is_empty() {
                if !previous_blank {
                    lines.push(String::new());
                }
                previous_blank = true;
                continue;
            }

            previous_blank = false;
            lines.push(self.format_line(line));
        }

        lines.join("\n")
    }

    fn format_line(&self, line: &str) -> String {
        if let Some(captures) = self.bold_label.captures(line) {
            return format!("{}**{}**: {}", &captures[1], &captures[2], &captures[3]);
        }

        if let Some(captures) = self.bullet.captures(line) {
            return format!("{}• {}", &captures[1], &captures[2]);
        }

        line.to_string()
    }
}

/// Collapses whitespace runs inside a single line of text.
pub(crate) fn condense_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}
