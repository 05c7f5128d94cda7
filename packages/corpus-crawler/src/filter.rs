//! Prose-quality filtering for extracted paragraph sequences.

/// Section headings that mark the start of trailing boilerplate. Everything
/// from the first paragraph exactly matching one of these onward is citation
/// or link metadata, not prose.
pub const END_SECTIONS: [&str; 7] = [
    "See also",
    "References",
    "Further reading",
    "External links",
    "Notes",
    "Bibliography",
    "Works",
];

/// Default minimum paragraph length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 150;

/// Apply the quality heuristics to a raw paragraph sequence, in order.
///
/// The scan stops entirely at the first paragraph matching one of
/// [`END_SECTIONS`]. Before that marker, a paragraph is dropped when it is
/// shorter than `min_length` characters, starts with a lowercase letter
/// (orphaned fragments, caption remnants), or carries a `doi:10.` / `ISBN `
/// marker (citation-heavy text). Survivors keep their original order.
pub fn filter_paragraphs(paragraphs: &[String], min_length: usize) -> Vec<String> {
    let mut kept = Vec::new();
    for paragraph in paragraphs {
        if END_SECTIONS.contains(&paragraph.as_str()) {
            break;
        }
        if paragraph.chars().count() < min_length {
            continue;
        }
        if paragraph.chars().next().is_some_and(char::is_lowercase) {
            continue;
        }
        if paragraph.contains("doi:10.") || paragraph.contains("ISBN ") {
            continue;
        }
        kept.push(paragraph.clone());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_of_length(len: usize) -> String {
        let mut text = String::from("A");
        while text.chars().count() < len {
            text.push('x');
        }
        text
    }

    #[test]
    fn test_threshold_boundary() {
        let at_threshold = paragraph_of_length(DEFAULT_MIN_LENGTH);
        let below_threshold = paragraph_of_length(DEFAULT_MIN_LENGTH - 1);
        let paragraphs = vec![at_threshold.clone(), below_threshold];

        let kept = filter_paragraphs(&paragraphs, DEFAULT_MIN_LENGTH);
        assert_eq!(kept, vec![at_threshold]);
    }

    #[test]
    fn test_lowercase_start_dropped_regardless_of_length() {
        let mut lowercase = paragraph_of_length(400);
        lowercase.replace_range(0..1, "a");
        let kept = filter_paragraphs(&[lowercase], DEFAULT_MIN_LENGTH);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_citation_markers_dropped() {
        let mut doi = paragraph_of_length(200);
        doi.push_str(" doi:10.1000/xyz");
        let mut isbn = paragraph_of_length(200);
        isbn.push_str(" ISBN 978-3-16-148410-0");

        assert!(filter_paragraphs(&[doi], DEFAULT_MIN_LENGTH).is_empty());
        assert!(filter_paragraphs(&[isbn], DEFAULT_MIN_LENGTH).is_empty());
    }

    #[test]
    fn test_end_section_halts_all_later_paragraphs() {
        let good_before = paragraph_of_length(200);
        let good_after = paragraph_of_length(300);
        let paragraphs = vec![
            good_before.clone(),
            "References".to_string(),
            good_after,
        ];

        let kept = filter_paragraphs(&paragraphs, DEFAULT_MIN_LENGTH);
        assert_eq!(kept, vec![good_before]);
    }

    #[test]
    fn test_end_section_must_match_exactly() {
        let mut mentions_references = paragraph_of_length(200);
        mentions_references.push_str(" References are discussed here.");
        let trailing = paragraph_of_length(200);
        let paragraphs = vec![mentions_references, trailing];

        let kept = filter_paragraphs(&paragraphs, DEFAULT_MIN_LENGTH);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let first = format!("First. {}", paragraph_of_length(200));
        let second = format!("Second. {}", paragraph_of_length(200));
        let paragraphs = vec![first.clone(), second.clone()];

        let kept = filter_paragraphs(&paragraphs, DEFAULT_MIN_LENGTH);
        assert_eq!(kept, vec![first, second]);
    }
}
