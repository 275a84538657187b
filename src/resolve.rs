//! Span resolution: overlap removal and adjacent date merging

use crate::recognizer::{category, CandidateSpan};

/// Reduce possibly-overlapping spans to a non-overlapping set.
///
/// Spans are sorted by start offset, then scanned left to right. When two
/// spans overlap, the higher confidence wins; on a tie the longer span
/// wins; otherwise the earlier-seen span is kept.
pub fn resolve_overlaps(mut spans: Vec<CandidateSpan>) -> Vec<CandidateSpan> {
    spans.sort_by_key(|s| s.start);

    let mut iter = spans.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut resolved = Vec::new();
    for next in iter {
        if next.start < current.end {
            // Overlap: higher score wins, equal score -> longer wins
            if next.confidence > current.confidence
                || (next.confidence == current.confidence && next.len() > current.len())
            {
                current = next;
            }
        } else {
            resolved.push(current);
            current = next;
        }
    }
    resolved.push(current);

    resolved
}

/// Fuse consecutive date spans separated by a short punctuation gap.
///
/// Detectors often split a single date like "October 5th, 2025" into two
/// spans. Two `DATE_TIME` spans merge when the text strictly between them
/// is 1-3 characters of whitespace, commas, periods or hyphens; the fused
/// span takes the maximum of the two confidence scores. No other category
/// participates in merging.
pub fn merge_adjacent_dates(text: &str, spans: Vec<CandidateSpan>) -> Vec<CandidateSpan> {
    let mut iter = spans.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if current.category == category::DATE_TIME && next.category == category::DATE_TIME {
            let gap = &text[current.end..next.start];
            if gap.len() <= 3 && is_punctuation_gap(gap) {
                current.end = next.end;
                current.confidence = current.confidence.max(next.confidence);
                continue;
            }
        }
        merged.push(current);
        current = next;
    }
    merged.push(current);

    merged
}

fn is_punctuation_gap(gap: &str) -> bool {
    !gap.is_empty()
        && gap
            .chars()
            .all(|c| c.is_whitespace() || matches!(c, ',' | '.' | '-'))
}
