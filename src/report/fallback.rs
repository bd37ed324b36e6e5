use anyhow::{Context, Result};
use regex::Regex;

use super::formatter::condense_whitespace;
use super::types::{SENTENCE_GROUP_TITLE_PREFIX, Section, StructureOptions};

/// Segmentation used when the text carries no recognizable headings.
#[derive(Debug)]
pub(crate) struct FallbackSplitter {
    paragraph_break: Regex,
    sentence_end: Regex,
}

impl FallbackSplitter {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            paragraph_break: Regex::new(r"\n\s*\n")
                .context("failed to compile paragraph break regex")?,
            sentence_end: Regex::new(r"[.!?]\s+").context("failed to compile sentence end regex")?,
        })
    }

    /// Paragraphs split on blank lines. A single surviving paragraph is not
    /// structure, so fewer than two yields `None`.
    pub(crate) fn split_paragraphs(
        &self,
        text: &str,
        options: &StructureOptions,
    ) -> Option<Vec<Section>> {
        let normalized = text.replace("\r\n", "\n");
        let sections = self
            .paragraph_break
            .split(&normalized)
            .map(str::trim)
            .filter(|paragraph| paragraph.chars().count() > options.paragraph_min_chars)
            .map(|paragraph| {
                let title = self.paragraph_title(paragraph, options.paragraph_title_max_chars);
                Section::new(title, paragraph)
            })
            .collect::<Vec<Section>>();

        if sections.len() < 2 {
            return None;
        }

        Some(sections)
    }

    /// Long sentences grouped `sentence_group_size` at a time. Requires more
    /// sentences than one group holds.
    pub(crate) fn group_sentences(
        &self,
        text: &str,
        options: &StructureOptions,
    ) -> Option<Vec<Section>> {
        let group_size = options.sentence_group_size.max(1);
        let sentences = self
            .split_sentences(text)
            .into_iter()
            .filter(|sentence| sentence.chars().count() > options.sentence_min_chars)
            .collect::<Vec<String>>();

        if sentences.len() <= group_size {
            return None;
        }

        let sections = sentences
            .chunks(group_size)
            .enumerate()
            .map(|(index, group)| {
                Section::new(
                    format!("{} {}", SENTENCE_GROUP_TITLE_PREFIX, index + 1),
                    group.join(" "),
                )
            })
            .collect();

        Some(sections)
    }

    /// Sentences keep their terminating punctuation.
    pub(crate) fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::<String>::new();
        let mut start = 0usize;

        for boundary in self.sentence_end.find_iter(text) {
            // the terminator is a single ASCII byte
            let end = boundary.start() + 1;
            push_sentence(&mut sentences, &text[start..end]);
            start = boundary.end();
        }
        push_sentence(&mut sentences, &text[start..]);

        sentences
    }

    fn paragraph_title(&self, paragraph: &str, max_chars: usize) -> String {
        let first_sentence = self
            .sentence_end
            .split(paragraph)
            .map(condense_whitespace)
            .find(|sentence| !sentence.is_empty())
            .unwrap_or_else(|| condense_whitespace(paragraph));

        truncate_with_ellipsis(&first_sentence, max_chars)
    }
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = condense_whitespace(raw);
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

pub(crate) fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated = text.chars().take(max_chars).collect::<String>();
    format!("{}...", truncated.trim_end())
}
