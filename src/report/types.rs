use serde::Serialize;

pub(crate) const OVERVIEW_TITLE: &str = "개요";
pub(crate) const SENTENCE_GROUP_TITLE_PREFIX: &str = "분석 내용";
pub(crate) const ADVISORY_TITLE: &str = "분석 참고사항";
pub(crate) const ADVISORY_CONTENT: &str = "이 분석은 제공된 특허 데이터를 바탕으로 AI가 생성한 결과이며, 입력 정보가 제한적이었을 수 있습니다. 더 상세한 분석을 원하시면 다시 시도해주세요.";

/// Phrases the upstream model uses when it refuses for lack of source data.
pub(crate) const NO_PATENT_INFO_MARKERS: &[&str] = &[
    "특허 정보가 제공되지 않았습니다",
    "no patent information provided",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub(crate) fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReportKind {
    MarketAnalysis,
    BusinessInsights,
    #[default]
    Unspecified,
}

impl ReportKind {
    /// Accepts the hint strings the report API receives; anything else is unspecified.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(str::trim) {
            Some("market_analysis") => Self::MarketAnalysis,
            Some("business_insights") | Some("business_insight") => Self::BusinessInsights,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MarketAnalysis => "market_analysis",
            Self::BusinessInsights => "business_insights",
            Self::Unspecified => "unspecified",
        }
    }

    pub fn report_name(self) -> &'static str {
        match self {
            Self::MarketAnalysis => "시장 분석 리포트",
            Self::BusinessInsights => "비즈니스 인사이트 리포트",
            Self::Unspecified => "분석 리포트",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    EmptyInput,
    NoPatentInfo,
    ParseError,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::NoPatentInfo => "NO_PATENT_INFO",
            Self::ParseError => "PARSE_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Which path produced the final section list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureStrategy {
    Headings,
    ParagraphSplit,
    SentenceGroups,
    WholeText,
    Skipped,
}

impl StructureStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Headings => "headings",
            Self::ParagraphSplit => "paragraph_split",
            Self::SentenceGroups => "sentence_groups",
            Self::WholeText => "whole_text",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub section_count: usize,
    pub total_content_length: usize,
    pub average_content_length: f64,
    pub advisory_appended: bool,
    pub strategy: StructureStrategy,
}

impl QualityMetrics {
    pub(crate) fn from_sections(
        sections: &[Section],
        strategy: StructureStrategy,
        advisory_appended: bool,
    ) -> Self {
        let total_content_length = sections.iter().map(Section::content_chars).sum::<usize>();
        let average_content_length = if sections.is_empty() {
            0.0
        } else {
            total_content_length as f64 / sections.len() as f64
        };

        Self {
            section_count: sections.len(),
            total_content_length,
            average_content_length,
            advisory_appended,
            strategy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStructureResult {
    pub report_name: String,
    pub sections: Vec<Section>,
    #[serde(rename = "rawAnalysis")]
    pub raw_text: String,
    pub quality_metrics: QualityMetrics,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

impl ReportStructureResult {
    pub(crate) fn degraded(
        text: &str,
        kind: ReportKind,
        diagnostic_kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            report_name: kind.report_name().to_string(),
            sections: Vec::new(),
            raw_text: text.to_string(),
            quality_metrics: QualityMetrics::from_sections(&[], StructureStrategy::Skipped, false),
            diagnostic: Some(Diagnostic {
                kind: diagnostic_kind,
                message: message.into(),
            }),
        }
    }

    pub fn diagnostic_kind(&self) -> Option<DiagnosticKind> {
        self.diagnostic.as_ref().map(|value| value.kind)
    }
}

/// Thresholds for segmentation and the fallback cascade, all counted in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureOptions {
    pub implicit_section_min_chars: usize,
    pub paragraph_min_chars: usize,
    pub paragraph_title_max_chars: usize,
    pub sentence_min_chars: usize,
    pub sentence_group_size: usize,
    pub min_total_content_chars: usize,
    pub heading_title_max_chars: usize,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            implicit_section_min_chars: 20,
            paragraph_min_chars: 50,
            paragraph_title_max_chars: 50,
            sentence_min_chars: 20,
            sentence_group_size: 3,
            min_total_content_chars: 100,
            heading_title_max_chars: 100,
        }
    }
}
