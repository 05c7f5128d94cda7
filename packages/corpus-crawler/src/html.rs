//! Paragraph extraction from rendered HTML fragments.

use regex::Regex;

/// Extracts paragraph-level text blocks from a rendered page fragment.
///
/// Patterns are compiled once at construction. Extraction itself never
/// fails: input that matches nothing simply yields no paragraphs.
pub struct ParagraphExtractor {
    paragraph: Regex,
    superscript: Regex,
    tag: Regex,
}

impl ParagraphExtractor {
    pub fn new() -> Self {
        Self {
            paragraph: Regex::new(r"(?s)<p[^>]*>(.*?)</p>")
                .expect("paragraph pattern is valid"),
            superscript: Regex::new(r"(?s)<sup[^>]*>.*?</sup>")
                .expect("superscript pattern is valid"),
            tag: Regex::new(r"<[^>]+>").expect("tag pattern is valid"),
        }
    }

    /// Every paragraph block in document order, with superscript citation
    /// markers removed before text extraction, whitespace trimmed, and
    /// empty results dropped.
    pub fn paragraphs(&self, html: &str) -> Vec<String> {
        let mut paragraphs = Vec::new();
        for capture in self.paragraph.captures_iter(html) {
            let Some(body) = capture.get(1) else { continue };
            let no_citations = self.superscript.replace_all(body.as_str(), "");
            let no_tags = self.tag.replace_all(&no_citations, "");
            let text = decode_entities(&no_tags);
            let text = text.trim();
            if !text.is_empty() {
                paragraphs.push(text.to_string());
            }
        }
        paragraphs
    }
}

impl Default for ParagraphExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the HTML entities that commonly appear in rendered prose.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
