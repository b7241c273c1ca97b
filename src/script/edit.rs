//! Byte-range edits applied to the original source text.

use std::ops::Range;

/// A single replacement of a byte range in the original source.
///
/// An empty range is an insertion at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl SourceEdit {
    pub fn new(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Apply non-overlapping edits to `source`.
///
/// Edits may arrive in any order; they are applied left to right.
pub fn apply_edits(source: &str, edits: &[SourceEdit]) -> String {
    // Insertions sort ahead of a replacement starting at the same position
    let mut sorted: Vec<&SourceEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.range.start, e.range.end));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in sorted {
        out.push_str(&source[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Apply the subset of `edits` falling inside `range` to that slice of
/// `source`, producing the rewritten fragment.
pub fn apply_edits_within(source: &str, range: Range<usize>, edits: &[SourceEdit]) -> String {
    let slice = &source[range.clone()];
    let inner: Vec<SourceEdit> = edits
        .iter()
        .filter(|e| e.range.start >= range.start && e.range.end <= range.end)
        .map(|e| {
            SourceEdit::new(
                e.range.start - range.start..e.range.end - range.start,
                e.text.clone(),
            )
        })
        .collect();
    apply_edits(slice, &inner)
}
