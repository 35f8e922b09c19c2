//! The diff pane component: render contract and mode selection.
//!
//! [`DiffPane`] turns `(diff, view mode, focused hunk, show_line_numbers)`
//! into a node tree. Small diffs render every row directly; past a fixed
//! line-count threshold the pane switches to the virtualized path and only
//! materializes the rows intersecting the viewport. The choice is made
//! here and nowhere else; downstream code is agnostic to which path is
//! active except for the scroll mechanism the navigator drives.
//!
//! All derived structures (paired rows, flattened rows, offsets) are
//! recomputed from the immutable [`FileDiff`] on every render pass; nothing
//! is cached across calls.

use crate::model::{FileDiff, Line, LineKind};
use crate::node::{BoxNode, Node, TextNode};
use crate::pair::SplitRow;
use crate::rows::{flatten, FlattenedRow, RowPayload, ViewMode};
use crate::style::{Color, FlexDirection};
use crate::virtualizer::{RowHeights, Virtualizer};

/// Line-count threshold above which the virtualized path activates.
///
/// Strictly greater-than: a diff of exactly this many lines still renders
/// directly.
pub const VIRTUALIZATION_THRESHOLD: usize = 500;

/// Which rendering strategy a diff gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Every row is rendered; no windowing or offset math.
    Direct,
    /// Only the rows intersecting the viewport (plus overscan) materialize.
    Virtualized,
}

/// Rendering state of one open diff view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
    /// No hunks to show.
    Empty,
    /// Binary file; no line rendering occurs.
    Binary,
    /// Direct render of all rows.
    Direct,
    /// Windowed render of large diffs.
    Virtualized,
}

/// Diff view component.
///
/// Builder-configured, immutable once built; `to_node()` produces the
/// rendered tree for the current inputs.
///
/// # Example
///
/// ```
/// use diffpane::model::{FileDiff, FileStatus, Hunk, Line};
/// use diffpane::rows::ViewMode;
/// use diffpane::view::DiffPane;
///
/// let diff = FileDiff::new(
///     vec![Hunk::new(0, None, 1, vec![
///         Line::context(1, 1, "fn main() {"),
///         Line::deletion(2, "    old();"),
///         Line::addition(2, "    new();"),
///         Line::context(3, 3, "}"),
///     ])],
///     FileStatus::Modified,
/// );
///
/// let pane = DiffPane::new(diff)
///     .view_mode(ViewMode::Split)
///     .focused_hunk(Some(0));
/// let node = pane.to_node();
/// ```
#[derive(Debug, Clone)]
pub struct DiffPane {
    diff: FileDiff,
    view_mode: ViewMode,
    show_line_numbers: bool,
    focused_hunk: Option<usize>,
    viewport_height: usize,
    overscan: usize,
    scroll_offset: usize,
    heights: RowHeights,
}

impl DiffPane {
    /// Create a pane for a diff with default settings: unified mode, line
    /// numbers shown, 24-row viewport.
    pub fn new(diff: FileDiff) -> Self {
        Self {
            diff,
            view_mode: ViewMode::Unified,
            show_line_numbers: true,
            focused_hunk: None,
            viewport_height: 24,
            overscan: Virtualizer::DEFAULT_OVERSCAN,
            scroll_offset: 0,
            heights: RowHeights::UNIFORM,
        }
    }

    /// Set the presentation mode.
    #[must_use]
    pub fn view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Show or hide the line-number gutters.
    #[must_use]
    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// Set the focused hunk; its header renders highlighted. An index with
    /// no matching hunk simply highlights nothing.
    #[must_use]
    pub fn focused_hunk(mut self, hunk_index: Option<usize>) -> Self {
        self.focused_hunk = hunk_index;
        self
    }

    /// Set the viewport height in height units (virtualized path only).
    #[must_use]
    pub fn viewport_height(mut self, height: usize) -> Self {
        self.viewport_height = height;
        self
    }

    /// Set the overscan row count (virtualized path only).
    #[must_use]
    pub fn overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    /// Set the scroll offset for this render pass (virtualized path only).
    #[must_use]
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Override the fixed row-height estimator.
    #[must_use]
    pub fn row_heights(mut self, heights: RowHeights) -> Self {
        self.heights = heights;
        self
    }

    /// The diff being rendered.
    pub fn diff(&self) -> &FileDiff {
        &self.diff
    }

    /// Language hint for an external syntax highlighter. Opaque here.
    pub fn language(&self) -> Option<&str> {
        self.diff.language.as_deref()
    }

    /// Which strategy this diff gets, re-evaluated per diff.
    pub fn strategy(&self) -> RenderStrategy {
        if self.diff.total_line_count() > VIRTUALIZATION_THRESHOLD {
            RenderStrategy::Virtualized
        } else {
            RenderStrategy::Direct
        }
    }

    /// Rendering state for the current inputs.
    pub fn state(&self) -> PaneState {
        if self.diff.is_binary {
            PaneState::Binary
        } else if self.diff.hunks.is_empty() {
            PaneState::Empty
        } else {
            match self.strategy() {
                RenderStrategy::Direct => PaneState::Direct,
                RenderStrategy::Virtualized => PaneState::Virtualized,
            }
        }
    }

    /// Flatten the diff for the current view mode.
    pub fn rows(&self) -> Vec<FlattenedRow> {
        flatten(&self.diff, self.view_mode)
    }

    /// Build the virtualizer for the current inputs, or `None` on the
    /// direct path.
    pub fn virtualizer(&self) -> Option<Virtualizer> {
        match self.state() {
            PaneState::Virtualized => Some(
                Virtualizer::new(&self.rows(), self.heights)
                    .viewport_height(self.viewport_height)
                    .overscan(self.overscan)
                    .scroll_offset(self.scroll_offset),
            ),
            _ => None,
        }
    }

    /// Render the pane for the current inputs.
    pub fn to_node(&self) -> Node {
        match self.state() {
            PaneState::Binary => placeholder("Binary file not shown."),
            PaneState::Empty => placeholder("No changes."),
            PaneState::Direct => {
                let rows = self.rows();
                let (old_w, new_w) = self.gutter_widths(&rows);
                let mut root = BoxNode::new().flex_direction(FlexDirection::Column);
                for row in &rows {
                    root = root.child(self.render_row(row, old_w, new_w));
                }
                root.into()
            }
            PaneState::Virtualized => {
                let rows = self.rows();
                let (old_w, new_w) = self.gutter_widths(&rows);
                let virt = Virtualizer::new(&rows, self.heights)
                    .viewport_height(self.viewport_height)
                    .overscan(self.overscan)
                    .scroll_offset(self.scroll_offset);

                // The container keeps the full content height so scrollbar
                // geometry is independent of how many rows materialized; a
                // leading spacer positions the window at its absolute offset.
                let mut root = BoxNode::new()
                    .flex_direction(FlexDirection::Column)
                    .height(virt.total_height());
                let mut window = virt.virtual_rows().peekable();
                if let Some(first) = window.peek() {
                    if first.offset > 0 {
                        root = root.child(BoxNode::new().height(first.offset));
                    }
                }
                for slot in window {
                    root = root.child(self.render_row(&rows[slot.index], old_w, new_w));
                }
                root.into()
            }
        }
    }

    /// Gutter widths for the old and new line-number columns.
    fn gutter_widths(&self, rows: &[FlattenedRow]) -> (usize, usize) {
        if !self.show_line_numbers {
            return (0, 0);
        }
        let mut max_old = 0u32;
        let mut max_new = 0u32;
        for row in rows {
            if let FlattenedRow::Content { payload, .. } = row {
                match payload {
                    RowPayload::Unified(line) => {
                        max_old = max_old.max(line.old_line_number.unwrap_or(0));
                        max_new = max_new.max(line.new_line_number.unwrap_or(0));
                    }
                    RowPayload::Split(split) => {
                        if let Some(old) = &split.old_line {
                            max_old = max_old.max(old.old_line_number.unwrap_or(0));
                        }
                        if let Some(new) = &split.new_line {
                            max_new = max_new.max(new.new_line_number.unwrap_or(0));
                        }
                    }
                }
            }
        }
        (decimal_digits(max_old), decimal_digits(max_new))
    }

    fn render_row(&self, row: &FlattenedRow, old_w: usize, new_w: usize) -> Node {
        match row {
            FlattenedRow::HunkHeader {
                hunk_index, header, ..
            } => self.render_header_row(*hunk_index, header),
            FlattenedRow::Content { payload, .. } => match payload {
                RowPayload::Unified(line) => self.render_unified_row(line, old_w, new_w),
                RowPayload::Split(split) => self.render_split_row(split, old_w, new_w),
            },
        }
    }

    fn render_header_row(&self, hunk_index: usize, header: &str) -> Node {
        let mut text = TextNode::new(header).bold().color(Color::BrightBlack);
        if self.focused_hunk == Some(hunk_index) {
            text = text.inverse();
        }
        BoxNode::new()
            .flex_direction(FlexDirection::Row)
            .child(text)
            .into()
    }

    fn render_unified_row(&self, line: &Line, old_w: usize, new_w: usize) -> Node {
        let mut row = BoxNode::new().flex_direction(FlexDirection::Row);
        if self.show_line_numbers {
            row = row
                .child(gutter(line.old_line_number, old_w))
                .child(gutter(line.new_line_number, new_w));
        }
        row.child(line_text(line)).into()
    }

    fn render_split_row(&self, split: &SplitRow, old_w: usize, new_w: usize) -> Node {
        let left = self.render_side(split.old_line.as_ref(), old_w, Side::Old);
        let right = self.render_side(split.new_line.as_ref(), new_w, Side::New);
        BoxNode::new()
            .flex_direction(FlexDirection::Row)
            .child(left)
            .child(TextNode::new("│").dim())
            .child(right)
            .into()
    }

    fn render_side(&self, line: Option<&Line>, width: usize, side: Side) -> Node {
        let mut cell = BoxNode::new().flex_direction(FlexDirection::Row);
        match line {
            Some(line) => {
                if self.show_line_numbers {
                    let number = match side {
                        Side::Old => line.old_line_number,
                        Side::New => line.new_line_number,
                    };
                    cell = cell.child(gutter(number, width));
                }
                cell = cell.child(line_text(line));
            }
            None => {
                // Blank placeholder, never a dropped cell: the absent side
                // keeps its gutter width so columns stay aligned.
                if self.show_line_numbers {
                    cell = cell.child(gutter(None, width));
                }
                cell = cell.child(TextNode::new("").dim());
            }
        }
        cell.into()
    }
}

#[derive(Clone, Copy)]
enum Side {
    Old,
    New,
}

/// Dim placeholder node for the binary and empty branches.
fn placeholder(message: &str) -> Node {
    BoxNode::new()
        .flex_direction(FlexDirection::Column)
        .child(TextNode::new(message).dim())
        .into()
}

/// Right-aligned line-number gutter cell.
fn gutter(number: Option<u32>, width: usize) -> TextNode {
    let text = match number {
        Some(n) => format!("{n:>width$} "),
        None => format!("{:width$} ", ""),
    };
    TextNode::new(text).dim()
}

/// Signed, colored content cell for one line.
fn line_text(line: &Line) -> TextNode {
    let (sign, color, is_dim) = match line.kind {
        LineKind::Addition => ('+', Some(Color::Green), false),
        LineKind::Deletion => ('-', Some(Color::Red), false),
        LineKind::Context => (' ', None, true),
    };
    let mut text = TextNode::new(format!("{sign}{}", line.content));
    if let Some(color) = color {
        text = text.color(color);
    }
    if is_dim {
        text = text.dim();
    }
    text
}

/// Count digits using integer math instead of a String allocation.
fn decimal_digits(mut n: u32) -> usize {
    if n == 0 {
        return 1;
    }
    let mut digits = 0;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits
}
