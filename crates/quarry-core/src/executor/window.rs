//! Module: executor::window
//! Responsibility: in-memory offset/limit application helpers.
//! Boundary: vector windowing utilities for the execution pipeline.

/// Drop the first `offset` rows, in-place.
///
/// An offset at or past the end clears everything.
/// Conversion to `usize` happens only at the indexing boundary.
pub(super) fn apply_offset<T>(rows: &mut Vec<T>, offset: u32) {
    let start = usize::try_from(offset).unwrap_or(usize::MAX);

    if start >= rows.len() {
        rows.clear();
        return;
    }

    rows.drain(..start);
}

/// Keep at most `limit` leading rows, in-place.
pub(super) fn apply_limit<T>(rows: &mut Vec<T>, limit: u32) {
    let keep = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.truncate(keep);
}
