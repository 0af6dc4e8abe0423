use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::ClauseBlock;

// A paragraph/heading element whose visible text opens with an uppercase or
// capitalized clause keyword. Lowercase prose mentioning "cláusula" never matches.
static RE_CLAUSE_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<(?i:p|div|h[1-6])\b[^>]*>(?:\s|<[^>]+>)*(?:CL[ÁA]USULA|Cl[áa]usula|CLAUSE|Clause)\b",
    )
    .expect("valid clause element regex")
});
// Plain-text clause heading at the start of a line. Uppercase only, so wrapped
// sentences that begin with the word stay inside their clause.
static RE_CLAUSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:CL[ÁA]USULA|CLAUSE)\b").expect("valid clause line regex")
});
static RE_BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|div|li|h[1-6]|table|blockquote)\s*>|(?:<br\s*/?>\s*){2,}|\n[ \t]*\n")
        .expect("valid block boundary regex")
});

/// Splits clause markup into ordered blocks.
pub trait ClauseSegmentation: Send + Sync {
    fn segment(&self, markup: &str) -> Vec<ClauseBlock>;
}

/// Splits on clause headings, falling back to block-level boundaries when the text
/// carries fewer than two recognizable clauses.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadingSegmenter;

impl ClauseSegmentation for HeadingSegmenter {
    fn segment(&self, markup: &str) -> Vec<ClauseBlock> {
        if markup.trim().is_empty() {
            return Vec::new();
        }

        let by_heading = into_segments(markup, heading_cuts(markup));
        let segments = if by_heading.len() > 1 {
            by_heading
        } else {
            debug!("no clause headings found; splitting on block boundaries");
            into_segments(markup, block_cuts(markup))
        };

        segments.into_iter().map(ClauseBlock::new).collect()
    }
}

/// Offsets where a clause heading starts. Overlapping matches from the two patterns
/// collapse to the earliest.
fn heading_cuts(markup: &str) -> Vec<usize> {
    let mut spans: Vec<(usize, usize)> = RE_CLAUSE_ELEMENT
        .find_iter(markup)
        .chain(RE_CLAUSE_LINE.find_iter(markup))
        .map(|found| (found.start(), found.end()))
        .collect();
    spans.sort_unstable();

    let mut cuts = Vec::new();
    let mut covered_until = 0;
    for (start, end) in spans {
        if cuts.is_empty() || start >= covered_until {
            cuts.push(start);
            covered_until = end;
        }
    }
    cuts
}

/// Offsets just past every block-level boundary.
fn block_cuts(markup: &str) -> Vec<usize> {
    RE_BLOCK_END
        .find_iter(markup)
        .map(|found| found.end())
        .collect()
}

fn into_segments(markup: &str, cuts: Vec<usize>) -> Vec<String> {
    let mut bounds = Vec::with_capacity(cuts.len() + 2);
    bounds.push(0);
    bounds.extend(cuts.into_iter().filter(|cut| *cut > 0 && *cut < markup.len()));
    bounds.push(markup.len());
    bounds.dedup();

    let mut segments: Vec<String> = Vec::new();
    let mut pending_prefix = String::new();

    for window in bounds.windows(2) {
        let piece = &markup[window[0]..window[1]];
        if piece.trim().is_empty() {
            continue;
        }

        // Tag-only pieces (e.g. a closing `</ol>`) carry no text of their own; keep
        // them attached to a neighbor instead of emitting an empty block.
        if super::strip_markup(piece).trim().is_empty() {
            match segments.last_mut() {
                Some(previous) => previous.push_str(piece),
                None => pending_prefix.push_str(piece),
            }
            continue;
        }

        let mut segment = std::mem::take(&mut pending_prefix);
        segment.push_str(piece);
        segments.push(segment);
    }

    if !pending_prefix.trim().is_empty() {
        segments.push(pending_prefix);
    }

    segments
}
