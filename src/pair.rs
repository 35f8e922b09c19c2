//! Line pairing for the split (side-by-side) presentation.
//!
//! Converts a hunk's flat line sequence into rows that carry an old-side and
//! a new-side cell. Consecutive deletions and additions accumulate into run
//! buffers; a context line (or the end of the hunk) flushes the buffers,
//! zipping deletion `i` with addition `i`. A run with unequal lengths leaves
//! the shorter side absent, rendered later as a blank placeholder cell
//! rather than silently dropped.

use crate::model::{Hunk, Line, LineKind};
use serde::{Deserialize, Serialize};

/// One row of the split presentation.
///
/// At least one side is always present. The old side only ever holds a
/// deletion or a context line; the new side only an addition or a context
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRow {
    /// Old-revision cell, absent for unmatched additions.
    pub old_line: Option<Line>,
    /// New-revision cell, absent for unmatched deletions.
    pub new_line: Option<Line>,
    /// Index of the hunk this row belongs to.
    pub hunk_index: usize,
    /// 0-based position of the row within its hunk.
    pub line_index: usize,
}

/// Pair a hunk's lines into split rows.
///
/// A hunk containing only deletions (pure removal) or only additions (pure
/// insertion) yields rows with one side entirely absent; that is the
/// expected shape, not an error.
///
/// # Example
///
/// ```
/// use diffpane::model::{Hunk, Line};
/// use diffpane::pair::pair_lines;
///
/// let hunk = Hunk::new(0, None, 1, vec![
///     Line::deletion(1, "a"),
///     Line::deletion(2, "b"),
///     Line::addition(1, "x"),
///     Line::context(3, 2, "c"),
/// ]);
/// let rows = pair_lines(&hunk);
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0].old_line.as_ref().unwrap().content, "a");
/// assert_eq!(rows[0].new_line.as_ref().unwrap().content, "x");
/// assert!(rows[1].new_line.is_none());
/// ```
pub fn pair_lines(hunk: &Hunk) -> Vec<SplitRow> {
    let mut rows = Vec::with_capacity(hunk.lines.len());
    let mut deletions: Vec<&Line> = Vec::new();
    let mut additions: Vec<&Line> = Vec::new();

    for line in &hunk.lines {
        match line.kind {
            LineKind::Deletion => deletions.push(line),
            LineKind::Addition => additions.push(line),
            LineKind::Context => {
                flush_runs(hunk.index, &mut deletions, &mut additions, &mut rows);
                let line_index = rows.len();
                rows.push(SplitRow {
                    old_line: Some(line.clone()),
                    new_line: Some(line.clone()),
                    hunk_index: hunk.index,
                    line_index,
                });
            }
        }
    }
    flush_runs(hunk.index, &mut deletions, &mut additions, &mut rows);

    rows
}

/// Emit `max(|deletions|, |additions|)` zipped rows and clear the buffers.
fn flush_runs(
    hunk_index: usize,
    deletions: &mut Vec<&Line>,
    additions: &mut Vec<&Line>,
    rows: &mut Vec<SplitRow>,
) {
    let paired = deletions.len().max(additions.len());
    for entry_ix in 0..paired {
        let line_index = rows.len();
        rows.push(SplitRow {
            old_line: deletions.get(entry_ix).map(|line| (*line).clone()),
            new_line: additions.get(entry_ix).map(|line| (*line).clone()),
            hunk_index,
            line_index,
        });
    }
    deletions.clear();
    additions.clear();
}
