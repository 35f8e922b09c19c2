//! Hunk focus tracking and scroll coordination.
//!
//! The navigator owns the focused-hunk state and drives whichever scroll
//! mechanism is active (the virtualizer for large diffs, a direct region
//! for small ones) through the [`ScrollRegion`] abstraction, so callers see
//! one navigation contract regardless of the rendering path. The scroll
//! container is injected rather than discovered through global lookups,
//! which keeps the navigator testable without a terminal attached.
//!
//! Scroll-position save/restore around view-mode toggles is the only state
//! retained between renders, and it lives here.

use crate::rows::{header_row_index, FlattenedRow};
use crate::virtualizer::{RowHeights, Virtualizer};
use std::time::{Duration, Instant};
use tracing::debug;

/// Scrollable container the navigator can drive.
///
/// Implemented by [`Virtualizer`] for the windowed path and by
/// [`DirectScrollRegion`] for the direct path.
pub trait ScrollRegion {
    /// Current scroll offset in height units.
    fn current_offset(&self) -> usize;

    /// Set the scroll offset, clamped to the scrollable range.
    fn set_offset(&mut self, offset: usize);

    /// Scroll so the given row sits at the top of the viewport
    /// (`scrollIntoView` semantics). Out-of-range indices are a no-op.
    fn scroll_to_row(&mut self, row_index: usize);
}

impl ScrollRegion for Virtualizer {
    fn current_offset(&self) -> usize {
        Virtualizer::current_offset(self)
    }

    fn set_offset(&mut self, offset: usize) {
        Virtualizer::set_offset(self, offset);
    }

    fn scroll_to_row(&mut self, row_index: usize) {
        self.scroll_to_index(row_index);
    }
}

/// Scroll container for the direct (non-virtualized) path.
///
/// Small diffs render every row, so no windowing is involved; this region
/// only tracks the offset and resolves row targets using the same fixed
/// height estimator the virtualized path uses, keeping the two paths'
/// scroll targets consistent.
#[derive(Debug, Clone)]
pub struct DirectScrollRegion {
    offsets: Vec<usize>,
    viewport_height: usize,
    offset: usize,
}

impl DirectScrollRegion {
    /// Build a region for `rows` with the given estimator and viewport.
    pub fn new(rows: &[FlattenedRow], heights: RowHeights, viewport_height: usize) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut acc = 0usize;
        offsets.push(0);
        for row in rows {
            acc += usize::from(heights.height_of(row));
            offsets.push(acc);
        }
        Self {
            offsets,
            viewport_height,
            offset: 0,
        }
    }

    /// Total content height.
    pub fn content_height(&self) -> usize {
        *self.offsets.last().unwrap_or(&0)
    }

    fn max_offset(&self) -> usize {
        self.content_height().saturating_sub(self.viewport_height)
    }
}

impl ScrollRegion for DirectScrollRegion {
    fn current_offset(&self) -> usize {
        self.offset
    }

    fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    fn scroll_to_row(&mut self, row_index: usize) {
        if row_index + 1 >= self.offsets.len() {
            return;
        }
        self.offset = self.offsets[row_index].min(self.max_offset());
    }
}

/// Outcome of a click routed through the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click on a hunk: focus moved.
    Single,
    /// Second click on the same hunk within the double-click window.
    Double,
}

/// Explicit per-instance click state machine.
///
/// Replaces timer-keyed global click maps: each navigator resolves its own
/// single/double clicks, so concurrent views cannot interfere with each
/// other.
#[derive(Debug, Clone, Default)]
struct ClickTracker {
    state: ClickState,
}

#[derive(Debug, Clone, Default)]
enum ClickState {
    #[default]
    Idle,
    AwaitingSecond {
        hunk_index: usize,
        at: Instant,
    },
}

impl ClickTracker {
    const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

    fn register(&mut self, hunk_index: usize, now: Instant) -> ClickOutcome {
        match self.state {
            ClickState::AwaitingSecond {
                hunk_index: pending,
                at,
            } if pending == hunk_index
                && now.saturating_duration_since(at) <= Self::DOUBLE_CLICK_WINDOW =>
            {
                self.state = ClickState::Idle;
                ClickOutcome::Double
            }
            _ => {
                self.state = ClickState::AwaitingSecond {
                    hunk_index,
                    at: now,
                };
                ClickOutcome::Single
            }
        }
    }

    fn reset(&mut self) {
        self.state = ClickState::Idle;
    }
}

/// Focused-hunk state and the transitions that drive scrolling.
///
/// # Example
///
/// ```
/// use diffpane::model::{FileDiff, FileStatus, Hunk, Line};
/// use diffpane::navigator::HunkNavigator;
/// use diffpane::rows::{flatten, ViewMode};
/// use diffpane::virtualizer::{RowHeights, Virtualizer};
///
/// let hunks = (0..5)
///     .map(|i| Hunk::new(i, None, i as u32, vec![Line::addition(1, "x")]))
///     .collect();
/// let diff = FileDiff::new(hunks, FileStatus::Modified);
/// let rows = flatten(&diff, ViewMode::Unified);
/// let mut virt = Virtualizer::new(&rows, RowHeights::UNIFORM).viewport_height(4);
///
/// let mut nav = HunkNavigator::new();
/// nav.focus(Some(3));
/// assert!(nav.scroll_to_focus(&rows, &mut virt));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HunkNavigator {
    focused: Option<usize>,
    saved_offset: Option<usize>,
    clicks: ClickTracker,
}

impl HunkNavigator {
    /// Create a navigator with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused hunk index, if any.
    pub fn focused_hunk(&self) -> Option<usize> {
        self.focused
    }

    /// Set (or clear) the focused hunk.
    pub fn focus(&mut self, hunk_index: Option<usize>) {
        if self.focused != hunk_index {
            debug!(from = ?self.focused, to = ?hunk_index, "hunk focus changed");
        }
        self.focused = hunk_index;
    }

    /// Move focus to the next hunk, clamped to the last.
    pub fn focus_next(&mut self, hunk_count: usize) {
        if hunk_count == 0 {
            return;
        }
        let next = match self.focused {
            Some(ix) => (ix + 1).min(hunk_count - 1),
            None => 0,
        };
        self.focus(Some(next));
    }

    /// Move focus to the previous hunk, clamped to the first.
    pub fn focus_prev(&mut self, hunk_count: usize) {
        if hunk_count == 0 {
            return;
        }
        let prev = match self.focused {
            Some(ix) => ix.saturating_sub(1),
            None => 0,
        };
        self.focus(Some(prev));
    }

    /// Route a click on a hunk through the click state machine.
    ///
    /// Either outcome moves focus; the caller can treat a double click as a
    /// stronger gesture (for example, re-centering an already-focused hunk).
    pub fn click(&mut self, hunk_index: usize, now: Instant) -> ClickOutcome {
        let outcome = self.clicks.register(hunk_index, now);
        self.focus(Some(hunk_index));
        outcome
    }

    /// Clear all navigation state. Called when the diff is replaced.
    pub fn reset(&mut self) {
        self.focused = None;
        self.saved_offset = None;
        self.clicks.reset();
    }

    /// Scroll the active region to the focused hunk's header row.
    ///
    /// Returns `false`, leaving the region untouched, when nothing is
    /// focused or the focused hunk is not present in `rows`; an out-of-range
    /// focus is a silent no-op, never an error.
    pub fn scroll_to_focus(
        &self,
        rows: &[FlattenedRow],
        region: &mut impl ScrollRegion,
    ) -> bool {
        let Some(hunk_index) = self.focused else {
            return false;
        };
        let Some(row_index) = header_row_index(rows, hunk_index) else {
            debug!(hunk_index, "focused hunk not in current diff; ignoring");
            return false;
        };
        region.scroll_to_row(row_index);
        true
    }

    /// Capture the region's offset ahead of a view-mode toggle.
    pub fn save_scroll_position(&mut self, region: &impl ScrollRegion) {
        self.saved_offset = Some(region.current_offset());
    }

    /// Restore the offset captured by [`save_scroll_position`], if any.
    ///
    /// Returns whether a restore happened. The saved offset is consumed
    /// either way, so a stale position can never leak into a later toggle.
    ///
    /// [`save_scroll_position`]: Self::save_scroll_position
    pub fn restore_scroll_position(&mut self, region: &mut impl ScrollRegion) -> bool {
        match self.saved_offset.take() {
            Some(offset) => {
                region.set_offset(offset);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileDiff, FileStatus, Hunk, Line};
    use crate::rows::{flatten, ViewMode};
    use pretty_assertions::assert_eq;

    fn diff_with_hunks(count: usize, lines: usize) -> FileDiff {
        let hunks = (0..count)
            .map(|i| {
                let lines = (0..lines)
                    .map(|j| Line::addition((j + 1) as u32, format!("l{j}")))
                    .collect();
                Hunk::new(i, None, (i * 10) as u32, lines)
            })
            .collect();
        FileDiff::new(hunks, FileStatus::Modified)
    }

    #[test]
    fn test_focus_next_prev_clamped() {
        let mut nav = HunkNavigator::new();
        nav.focus_next(3);
        assert_eq!(nav.focused_hunk(), Some(0));
        nav.focus_next(3);
        nav.focus_next(3);
        nav.focus_next(3);
        assert_eq!(nav.focused_hunk(), Some(2));
        nav.focus_prev(3);
        assert_eq!(nav.focused_hunk(), Some(1));
        nav.focus_prev(3);
        nav.focus_prev(3);
        assert_eq!(nav.focused_hunk(), Some(0));
    }

    #[test]
    fn test_focus_next_empty_diff_is_noop() {
        let mut nav = HunkNavigator::new();
        nav.focus_next(0);
        assert_eq!(nav.focused_hunk(), None);
    }

    #[test]
    fn test_scroll_to_focus_virtualized() {
        let diff = diff_with_hunks(6, 9);
        let rows = flatten(&diff, ViewMode::Unified);
        let mut virt = Virtualizer::new(&rows, RowHeights::UNIFORM).viewport_height(10);

        let mut nav = HunkNavigator::new();
        nav.focus(Some(4));
        assert!(nav.scroll_to_focus(&rows, &mut virt));
        // Header row of hunk 4: 4 * (1 + 9).
        assert_eq!(ScrollRegion::current_offset(&virt), 40);
    }

    #[test]
    fn test_scroll_to_focus_direct() {
        let diff = diff_with_hunks(3, 4);
        let rows = flatten(&diff, ViewMode::Unified);
        let mut region = DirectScrollRegion::new(&rows, RowHeights::UNIFORM, 5);

        let mut nav = HunkNavigator::new();
        nav.focus(Some(2));
        assert!(nav.scroll_to_focus(&rows, &mut region));
        assert_eq!(region.current_offset(), 10);
    }

    #[test]
    fn test_out_of_range_focus_is_silent_noop() {
        let diff = diff_with_hunks(2, 3);
        let rows = flatten(&diff, ViewMode::Unified);
        let mut virt = Virtualizer::new(&rows, RowHeights::UNIFORM)
            .viewport_height(4)
            .scroll_offset(2);

        let mut nav = HunkNavigator::new();
        nav.focus(Some(17));
        assert!(!nav.scroll_to_focus(&rows, &mut virt));
        assert_eq!(ScrollRegion::current_offset(&virt), 2);
    }

    #[test]
    fn test_nothing_focused_does_not_scroll() {
        let diff = diff_with_hunks(2, 3);
        let rows = flatten(&diff, ViewMode::Unified);
        let mut region = DirectScrollRegion::new(&rows, RowHeights::UNIFORM, 4);
        let nav = HunkNavigator::new();
        assert!(!nav.scroll_to_focus(&rows, &mut region));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut nav = HunkNavigator::new();
        nav.focus(Some(1));
        nav.saved_offset = Some(12);
        nav.reset();
        assert_eq!(nav.focused_hunk(), None);
        assert_eq!(nav.saved_offset, None);
    }

    #[test]
    fn test_save_restore_around_mode_toggle() {
        let diff = diff_with_hunks(4, 10);
        let unified = flatten(&diff, ViewMode::Unified);
        let split = flatten(&diff, ViewMode::Split);

        let mut before = Virtualizer::new(&unified, RowHeights::UNIFORM)
            .viewport_height(8)
            .scroll_offset(17);
        let mut nav = HunkNavigator::new();

        nav.save_scroll_position(&before);
        // Mode switch rebuilds the region from the split rows.
        let mut after = Virtualizer::new(&split, RowHeights::UNIFORM).viewport_height(8);
        assert!(nav.restore_scroll_position(&mut after));
        assert_eq!(ScrollRegion::current_offset(&after), 17);

        // The saved offset was consumed.
        assert!(!nav.restore_scroll_position(&mut before));
    }

    #[test]
    fn test_restore_clamps_to_new_content() {
        let diff = diff_with_hunks(1, 3);
        let rows = flatten(&diff, ViewMode::Unified);
        let mut nav = HunkNavigator::new();
        nav.saved_offset = Some(500);
        let mut region = DirectScrollRegion::new(&rows, RowHeights::UNIFORM, 2);
        assert!(nav.restore_scroll_position(&mut region));
        assert_eq!(region.current_offset(), 2);
    }

    #[test]
    fn test_click_state_machine() {
        let mut nav = HunkNavigator::new();
        let start = Instant::now();

        assert_eq!(nav.click(2, start), ClickOutcome::Single);
        assert_eq!(nav.focused_hunk(), Some(2));

        // Second click on the same hunk inside the window.
        let inside = start + Duration::from_millis(100);
        assert_eq!(nav.click(2, inside), ClickOutcome::Double);

        // A third click starts a fresh cycle.
        let later = inside + Duration::from_millis(10);
        assert_eq!(nav.click(2, later), ClickOutcome::Single);
    }

    #[test]
    fn test_click_different_hunk_restarts_cycle() {
        let mut nav = HunkNavigator::new();
        let start = Instant::now();
        assert_eq!(nav.click(0, start), ClickOutcome::Single);
        assert_eq!(
            nav.click(1, start + Duration::from_millis(50)),
            ClickOutcome::Single
        );
        assert_eq!(nav.focused_hunk(), Some(1));
    }

    #[test]
    fn test_click_after_window_is_single() {
        let mut nav = HunkNavigator::new();
        let start = Instant::now();
        nav.click(0, start);
        let late = start + Duration::from_millis(1_000);
        assert_eq!(nav.click(0, late), ClickOutcome::Single);
    }

    #[test]
    fn test_direct_region_ignores_bad_row() {
        let diff = diff_with_hunks(1, 2);
        let rows = flatten(&diff, ViewMode::Unified);
        let mut region = DirectScrollRegion::new(&rows, RowHeights::UNIFORM, 2);
        region.set_offset(1);
        region.scroll_to_row(999);
        assert_eq!(region.current_offset(), 1);
    }
}
