use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;
use tracing::{debug, warn};

use super::fallback::FallbackSplitter;
use super::formatter::ContentFormatter;
use super::header::HeaderMatcher;
use super::types::{
    ADVISORY_CONTENT, ADVISORY_TITLE, Diagnostic, DiagnosticKind, NO_PATENT_INFO_MARKERS,
    OVERVIEW_TITLE, QualityMetrics, ReportKind, ReportStructureResult, Section, StructureOptions,
    StructureStrategy,
};

/// Turns a raw LLM answer into titled sections.
///
/// Holds only compiled, immutable state, so one instance can serve any number
/// of concurrent callers.
#[derive(Debug)]
pub struct ReportStructurer {
    matcher: HeaderMatcher,
    formatter: ContentFormatter,
    fallback: FallbackSplitter,
    options: StructureOptions,
}

impl ReportStructurer {
    pub fn new(options: StructureOptions) -> Result<Self> {
        Ok(Self {
            matcher: HeaderMatcher::new(options.heading_title_max_chars)?,
            formatter: ContentFormatter::new()?,
            fallback: FallbackSplitter::new()?,
            options,
        })
    }

    pub fn structure(&self, text: &str, kind: ReportKind) -> ReportStructureResult {
        debug!(
            text_chars = text.chars().count(),
            report_kind = kind.as_str(),
            "structuring analysis text"
        );

        if text.trim().is_empty() {
            warn!(report_kind = kind.as_str(), "analysis text is empty");
            return ReportStructureResult::degraded(
                text,
                kind,
                DiagnosticKind::EmptyInput,
                "analysis text is empty",
            );
        }

        if contains_no_info_marker(text) {
            warn!(
                report_kind = kind.as_str(),
                "model reported missing patent information"
            );
            return ReportStructureResult::degraded(
                text,
                kind,
                DiagnosticKind::NoPatentInfo,
                "model reported that no patent information was provided",
            );
        }

        self.structure_with(text, kind, |text| self.segment(text, kind))
    }

    /// Runs `segment` and turns a panic inside it into a whole-text result.
    ///
    /// The process panic hook is left alone, so the default hook still prints
    /// its `panicked at` line to stderr before the recovery is logged.
    pub(crate) fn structure_with<F>(
        &self,
        text: &str,
        kind: ReportKind,
        segment: F,
    ) -> ReportStructureResult
    where
        F: FnOnce(&str) -> (Vec<Section>, StructureStrategy),
    {
        match panic::catch_unwind(AssertUnwindSafe(|| segment(text))) {
            Ok((sections, strategy)) => self.finalize(text, kind, sections, strategy),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(error = %message, "segmentation failed, returning whole text");

                let sections = vec![Section::new(kind.report_name(), text.trim())];
                ReportStructureResult {
                    report_name: kind.report_name().to_string(),
                    quality_metrics: QualityMetrics::from_sections(
                        &sections,
                        StructureStrategy::WholeText,
                        false,
                    ),
                    sections,
                    raw_text: text.to_string(),
                    diagnostic: Some(Diagnostic {
                        kind: DiagnosticKind::ParseError,
                        message,
                    }),
                }
            }
        }
    }

    fn segment(&self, text: &str, kind: ReportKind) -> (Vec<Section>, StructureStrategy) {
        let (sections, found_heading) = self.segment_by_headings(text);
        if found_heading && !sections.is_empty() {
            return (sections, StructureStrategy::Headings);
        }

        debug!(found_heading, "no heading structure, applying fallback cascade");

        if let Some(sections) = self.fallback.split_paragraphs(text, &self.options) {
            debug!(sections = sections.len(), "split text by paragraphs");
            return (sections, StructureStrategy::ParagraphSplit);
        }

        if let Some(sections) = self.fallback.group_sentences(text, &self.options) {
            debug!(sections = sections.len(), "grouped text by sentences");
            return (sections, StructureStrategy::SentenceGroups);
        }

        warn!("no usable structure, keeping the whole text as one section");
        (
            vec![Section::new(kind.report_name(), text.trim())],
            StructureStrategy::WholeText,
        )
    }

    fn segment_by_headings(&self, text: &str) -> (Vec<Section>, bool) {
        let mut sections = Vec::<Section>::new();
        let mut current_title: Option<String> = None;
        let mut current_lines = Vec::<&str>::new();
        let mut found_heading = false;

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();

            if line.is_empty() {
                if current_lines.last().is_some_and(|last| !last.is_empty()) {
                    current_lines.push("");
                }
                continue;
            }

            if let Some(title) = self.matcher.match_line(line) {
                debug!(line = index + 1, title = %title, "heading found");
                found_heading = true;
                self.close_section(&mut sections, current_title.take(), &mut current_lines);
                current_title = Some(title);
                continue;
            }

            if current_title.is_none() {
                // lead-in noise before the first heading is dropped
                if line.chars().count() <= self.options.implicit_section_min_chars {
                    continue;
                }
                current_title = Some(OVERVIEW_TITLE.to_string());
            }

            current_lines.push(line);
        }

        self.close_section(&mut sections, current_title.take(), &mut current_lines);

        (sections, found_heading)
    }

    fn close_section(
        &self,
        sections: &mut Vec<Section>,
        title: Option<String>,
        lines: &mut Vec<&str>,
    ) {
        let Some(title) = title else {
            lines.clear();
            return;
        };

        let content = self.formatter.format(&lines.join("\n"));
        lines.clear();

        if content.is_empty() {
            warn!(title = %title, "dropping empty section");
            return;
        }

        debug!(
            title = %title,
            content_chars = content.chars().count(),
            "section saved"
        );
        sections.push(Section::new(title, content));
    }

    fn finalize(
        &self,
        text: &str,
        kind: ReportKind,
        mut sections: Vec<Section>,
        strategy: StructureStrategy,
    ) -> ReportStructureResult {
        sections.retain(|section| !section.content.trim().is_empty());

        let total_chars = sections.iter().map(Section::content_chars).sum::<usize>();
        let advisory_appended =
            !sections.is_empty() && total_chars < self.options.min_total_content_chars;
        if advisory_appended {
            warn!(
                total_chars,
                threshold = self.options.min_total_content_chars,
                "report content is short, appending advisory section"
            );
            sections.push(Section::new(ADVISORY_TITLE, ADVISORY_CONTENT));
        }

        let quality_metrics = QualityMetrics::from_sections(&sections, strategy, advisory_appended);
        debug!(
            sections = quality_metrics.section_count,
            total_chars = quality_metrics.total_content_length,
            strategy = strategy.as_str(),
            "structuring completed"
        );

        ReportStructureResult {
            report_name: kind.report_name().to_string(),
            sections,
            raw_text: text.to_string(),
            quality_metrics,
            diagnostic: None,
        }
    }
}

fn contains_no_info_marker(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NO_PATENT_INFO_MARKERS
        .iter()
        .any(|marker| text.contains(marker) || lowered.contains(marker))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "segmentation panicked".to_string()
}
