use anyhow::{Context, Result};
use regex::Regex;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HeadingRule {
    Atx,
    AtxBold,
    BoldLine,
    Ordinal,
    Decorated,
    KoreanSuffix,
    TrailingPunctuation,
}

impl HeadingRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Atx => "atx",
            Self::AtxBold => "atx_bold",
            Self::BoldLine => "bold_line",
            Self::Ordinal => "ordinal",
            Self::Decorated => "decorated",
            Self::KoreanSuffix => "korean_suffix",
            Self::TrailingPunctuation => "trailing_punctuation",
        }
    }
}

/// Heading rules in priority order. The first pattern that matches decides the
/// title; the number is the capture group holding the raw title.
///
/// `AtxBold` sits ahead of `Atx` because the plain ATX pattern also accepts a
/// fully bolded title; both yield the same cleaned title.
const HEADING_RULE_TABLE: &[(HeadingRule, &str, usize)] = &[
    (HeadingRule::AtxBold, r"^#{1,6}\s*\*\*(.+)\*\*\s*:?$", 1),
    (HeadingRule::Atx, r"^#{1,6}\s*([^#\s].*)$", 1),
    (HeadingRule::BoldLine, r"^\*\*([^*]+)\*\*\s*:?$", 1),
    (HeadingRule::Ordinal, r"^\d+\.\s+(.+)$", 1),
    (HeadingRule::Ordinal, r"^\d+\s*단계\s*:\s*(.+)$", 1),
    (HeadingRule::Decorated, r"^【([^】]+)】\s*:?$", 1),
    (HeadingRule::Decorated, r"^[■▶◆○●]\s*(.+)$", 1),
    (HeadingRule::Decorated, r"^-\s*(.+):$", 1),
    (
        HeadingRule::KoreanSuffix,
        r"^([가-힣\s]{2,30}(?:분석|현황|전망|요약|개요|리포트|특징|환경|전략|방안).*)$",
        1,
    ),
    (
        HeadingRule::TrailingPunctuation,
        r"^([가-힣\s]{2,30})[:\-》〉]$",
        1,
    ),
];

const WRAPPING_PAIRS: &[(char, char)] = &[
    ('【', '】'),
    ('[', ']'),
    ('《', '》'),
    ('〈', '〉'),
    ('「', '」'),
];

const DECORATIVE_GLYPHS: &[char] = &['■', '▶', '◆', '○', '●'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub rule: HeadingRule,
    pub title: String,
}

#[derive(Debug)]
struct CompiledRule {
    rule: HeadingRule,
    pattern: Regex,
    group: usize,
}

#[derive(Debug)]
pub struct HeaderMatcher {
    rules: Vec<CompiledRule>,
    title_max_chars: usize,
}

impl HeaderMatcher {
    pub fn new(title_max_chars: usize) -> Result<Self> {
        let rules = HEADING_RULE_TABLE
            .iter()
            .map(|(rule, pattern, group)| -> Result<CompiledRule> {
                let pattern = Regex::new(pattern).with_context(|| {
                    format!("failed to compile {} heading regex", rule.as_str())
                })?;
                Ok(CompiledRule {
                    rule: *rule,
                    pattern,
                    group: *group,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            title_max_chars,
        })
    }

    /// Title of the heading on `line`, if it is one.
    pub fn match_line(&self, line: &str) -> Option<String> {
        self.classify(line).map(|matched| matched.title)
    }

    /// Only the first matching rule is consulted. A rule whose cleaned title is
    /// empty or over-long rejects the line outright.
    pub fn classify(&self, line: &str) -> Option<HeadingMatch> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (rule, raw_title) = self.rules.iter().find_map(|compiled| {
            let captures = compiled.pattern.captures(line)?;
            let raw_title = captures
                .get(compiled.group)
                .map_or(line, |value| value.as_str());
            Some((compiled.rule, raw_title))
        })?;

        let title = clean_title(raw_title);
        if title.is_empty() || title.chars().count() > self.title_max_chars {
            return None;
        }

        Some(HeadingMatch { rule, title })
    }
}

pub(crate) fn clean_title(raw: &str) -> String {
    // emphasis markers never belong in a display title
    let mut title = raw.replace('*', "").trim().to_string();

    loop {
        let before = title.len();

        if let Some(stripped) = title
            .strip_suffix(':')
            .or_else(|| title.strip_suffix('：'))
        {
            title = stripped.trim_end().to_string();
        }

        for (open, close) in WRAPPING_PAIRS {
            if let Some(inner) = title
                .strip_prefix(*open)
                .and_then(|value| value.strip_suffix(*close))
            {
                title = inner.trim().to_string();
            }
        }

        if let Some(stripped) = title.strip_prefix(DECORATIVE_GLYPHS) {
            title = stripped.trim_start().to_string();
        }

        if title.len() == before {
            break;
        }
    }

    title
}
