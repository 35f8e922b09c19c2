//! Viewport virtualization over flattened diff rows.
//!
//! For very large diffs (lockfiles are the usual offender) rendering every
//! row on every pass is wasted work: only the rows intersecting the scroll
//! viewport matter. The [`Virtualizer`] computes, per render pass, the
//! window of rows to materialize (visible plus overscan), each row's
//! absolute vertical offset, and the total content height for scrollbar
//! sizing.
//!
//! Row heights come from a fixed estimator (a header constant and a line
//! constant), never from content. That keeps offset math O(1) per row and
//! scroll targeting cheap, at the cost of drift when content wraps; see the
//! estimator note on [`RowHeights`].

use crate::rows::FlattenedRow;
use std::ops::Range;
use tracing::debug;

/// Fixed row-height estimator.
///
/// Both values are constants chosen by the embedder, not derived from
/// content. If rendered rows can wrap to more terminal rows than estimated,
/// scroll offsets drift from reality; the engine preserves the fixed-height
/// model and leaves wrapping to the embedder to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHeights {
    /// Height of a hunk header row.
    pub header: u16,
    /// Height of a content row.
    pub line: u16,
}

impl RowHeights {
    /// Estimator where every row is one terminal row high.
    pub const UNIFORM: Self = Self { header: 1, line: 1 };

    /// Create an estimator with explicit header and line heights.
    pub const fn new(header: u16, line: u16) -> Self {
        Self { header, line }
    }

    /// Estimated height of one flattened row.
    pub fn height_of(&self, row: &FlattenedRow) -> u16 {
        if row.is_header() {
            self.header
        } else {
            self.line
        }
    }
}

impl Default for RowHeights {
    fn default() -> Self {
        Self::UNIFORM
    }
}

/// A row selected for materialization in the current render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualRow {
    /// Index into the flattened row list.
    pub index: usize,
    /// Absolute vertical offset: cumulative height of all preceding rows.
    pub offset: usize,
    /// Estimated height of this row.
    pub height: u16,
}

/// Windowing engine over a flattened row list.
///
/// Holds no row data itself, only the prefix-summed offsets derived from
/// the estimator, so rebuilding it on diff change is cheap and the rows
/// remain owned by the caller.
///
/// # Example
///
/// ```
/// use diffpane::model::{FileDiff, FileStatus, Hunk, Line};
/// use diffpane::rows::{flatten, ViewMode};
/// use diffpane::virtualizer::{RowHeights, Virtualizer};
///
/// let hunks = (0..100)
///     .map(|i| Hunk::new(i, None, i as u32 * 10, vec![Line::addition(1, "x")]))
///     .collect();
/// let diff = FileDiff::new(hunks, FileStatus::Modified);
/// let rows = flatten(&diff, ViewMode::Unified);
///
/// let mut virt = Virtualizer::new(&rows, RowHeights::UNIFORM)
///     .viewport_height(24)
///     .overscan(3);
/// assert_eq!(virt.total_height(), rows.len());
/// virt.scroll_to_index(150);
/// assert!(virt.virtual_range().contains(&150));
/// ```
#[derive(Debug, Clone)]
pub struct Virtualizer {
    /// offsets[i] is the absolute offset of row i; the final entry is the
    /// total content height.
    offsets: Vec<usize>,
    viewport_height: usize,
    scroll_offset: usize,
    overscan: usize,
}

impl Virtualizer {
    /// Default number of rows rendered beyond the visible window on each
    /// side, to avoid blank flashes during fast scrolling.
    pub const DEFAULT_OVERSCAN: usize = 3;

    /// Build a virtualizer for `rows` using the given height estimator.
    pub fn new(rows: &[FlattenedRow], heights: RowHeights) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut acc = 0usize;
        offsets.push(0);
        for row in rows {
            acc += usize::from(heights.height_of(row));
            offsets.push(acc);
        }
        Self {
            offsets,
            viewport_height: 0,
            scroll_offset: 0,
            overscan: Self::DEFAULT_OVERSCAN,
        }
    }

    /// Set the viewport height in the estimator's height units.
    #[must_use]
    pub fn viewport_height(mut self, height: usize) -> Self {
        self.viewport_height = height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self
    }

    /// Set the overscan row count.
    #[must_use]
    pub fn overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    /// Set the scroll offset, clamped to the scrollable range.
    #[must_use]
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset.min(self.max_scroll_offset());
        self
    }

    /// Number of rows under management.
    pub fn row_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total content height, for scrollbar sizing.
    pub fn total_height(&self) -> usize {
        *self.offsets.last().unwrap_or(&0)
    }

    /// Current scroll offset in height units.
    pub fn current_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Absolute offset of a row, or `None` if the index is out of range.
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        if index < self.row_count() {
            Some(self.offsets[index])
        } else {
            None
        }
    }

    /// Estimated height of a row, or `None` if out of range.
    pub fn height_of(&self, index: usize) -> Option<usize> {
        if index < self.row_count() {
            Some(self.offsets[index + 1] - self.offsets[index])
        } else {
            None
        }
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll_offset(&self) -> usize {
        self.total_height().saturating_sub(self.viewport_height)
    }

    /// Rows strictly intersecting the viewport `[offset, offset + height)`.
    pub fn visible_range(&self) -> Range<usize> {
        let n = self.row_count();
        if n == 0 || self.viewport_height == 0 {
            return 0..0;
        }
        let top = self.scroll_offset;
        let bottom = top + self.viewport_height;
        // First row whose bottom edge is past the viewport top.
        let start = self.offsets[1..=n].partition_point(|&end| end <= top);
        // One past the last row whose top edge is above the viewport bottom.
        let end = self.offsets[..n].partition_point(|&start_off| start_off < bottom);
        start..end.max(start)
    }

    /// Visible rows widened by the overscan allowance, clamped to bounds.
    pub fn virtual_range(&self) -> Range<usize> {
        let visible = self.visible_range();
        if visible.is_empty() {
            return visible;
        }
        let start = visible.start.saturating_sub(self.overscan);
        let end = (visible.end + self.overscan).min(self.row_count());
        start..end
    }

    /// The rows to materialize this pass, with their absolute offsets.
    pub fn virtual_rows(&self) -> impl Iterator<Item = VirtualRow> + '_ {
        self.virtual_range().map(move |index| VirtualRow {
            index,
            offset: self.offsets[index],
            height: (self.offsets[index + 1] - self.offsets[index]) as u16,
        })
    }

    /// Scroll the viewport so the given row sits at its top edge.
    ///
    /// Out-of-range indices are ignored; the offset is clamped so the last
    /// viewport stays full.
    pub fn scroll_to_index(&mut self, index: usize) {
        let Some(offset) = self.offset_of(index) else {
            debug!(index, rows = self.row_count(), "scroll_to_index out of range");
            return;
        };
        self.scroll_offset = offset.min(self.max_scroll_offset());
        debug!(index, offset = self.scroll_offset, "scrolled to row");
    }

    /// Set the scroll offset in place, clamped to the scrollable range.
    pub fn set_offset(&mut self, offset: usize) {
        self.scroll_offset = offset.min(self.max_scroll_offset());
    }

    /// Scroll up by `amount` height units.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll down by `amount` height units.
    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = (self.scroll_offset + amount).min(self.max_scroll_offset());
    }

    /// Scroll up by one viewport.
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height);
    }

    /// Scroll down by one viewport.
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height);
    }

    /// Jump to the top.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Jump to the bottom.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll_offset();
    }
}
