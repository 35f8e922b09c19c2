//! Row flattening: one linear, renderable sequence for the whole diff.
//!
//! The flattened row list is the unit the virtualizer and the navigator
//! operate on: hunk header rows interleaved with content rows, in final
//! render order. Every row keeps its hunk index so focus navigation can
//! locate a hunk without re-walking the model.
//!
//! Flattening is a pure function of the [`FileDiff`] and the view mode; the
//! same inputs always produce a structurally identical row list.

use crate::model::{FileDiff, Line};
use crate::pair::{pair_lines, SplitRow};
use serde::{Deserialize, Serialize};

/// Which presentation the rows are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One linear column, removed and added lines interleaved.
    #[default]
    Unified,
    /// Two side-by-side columns with pairwise-aligned changes.
    Split,
}

/// Content carried by a non-header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPayload {
    /// A single line, unified presentation.
    Unified(Line),
    /// A paired row, split presentation.
    Split(SplitRow),
}

/// One renderable row of the flattened diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlattenedRow {
    /// Header row introducing a hunk.
    HunkHeader {
        /// Index of the hunk this header introduces.
        hunk_index: usize,
        /// Display text (the hunk's header or the generated fallback).
        header: String,
        /// First line of the hunk in the old revision.
        old_start: u32,
    },
    /// A content row belonging to a hunk.
    Content {
        /// Index of the owning hunk.
        hunk_index: usize,
        /// The row's content.
        payload: RowPayload,
    },
}

impl FlattenedRow {
    /// Index of the hunk this row belongs to.
    pub fn hunk_index(&self) -> usize {
        match self {
            FlattenedRow::HunkHeader { hunk_index, .. }
            | FlattenedRow::Content { hunk_index, .. } => *hunk_index,
        }
    }

    /// Whether this is a hunk header row.
    pub fn is_header(&self) -> bool {
        matches!(self, FlattenedRow::HunkHeader { .. })
    }
}

/// Flatten a diff into its final render order.
///
/// For each hunk: exactly one header row, followed by one content row per
/// line (unified) or per paired [`SplitRow`] (split). Binary diffs flatten
/// to no rows at all; the view short-circuits to a placeholder before row
/// rendering.
pub fn flatten(diff: &FileDiff, mode: ViewMode) -> Vec<FlattenedRow> {
    if diff.is_binary {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(diff.total_line_count() + diff.hunks.len());
    for hunk in &diff.hunks {
        rows.push(FlattenedRow::HunkHeader {
            hunk_index: hunk.index,
            header: hunk.display_header(),
            old_start: hunk.old_start,
        });
        match mode {
            ViewMode::Unified => {
                for line in &hunk.lines {
                    rows.push(FlattenedRow::Content {
                        hunk_index: hunk.index,
                        payload: RowPayload::Unified(line.clone()),
                    });
                }
            }
            ViewMode::Split => {
                for split_row in pair_lines(hunk) {
                    rows.push(FlattenedRow::Content {
                        hunk_index: hunk.index,
                        payload: RowPayload::Split(split_row),
                    });
                }
            }
        }
    }
    rows
}

/// Row index of the header row for `hunk_index`, if that hunk is present.
///
/// This is the scroll target for focus navigation; `None` turns an
/// out-of-range focus into a no-op.
pub fn header_row_index(rows: &[FlattenedRow], hunk_index: usize) -> Option<usize> {
    rows.iter()
        .position(|row| row.is_header() && row.hunk_index() == hunk_index)
}
