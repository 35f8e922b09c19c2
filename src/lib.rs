//! Diff rendering and virtualization engine.
//!
//! `diffpane` turns a parsed file diff into a renderable node tree. It owns
//! the presentation pipeline between diff computation (upstream, external)
//! and painting (downstream, backend-specific):
//!
//! - **Model** ([`model`]): immutable [`FileDiff`](model::FileDiff) /
//!   [`Hunk`](model::Hunk) / [`Line`](model::Line) value types with
//!   boundary validation.
//! - **Pairing** ([`pair`]): aligns deletion and addition runs into
//!   side-by-side rows for the split presentation.
//! - **Flattening** ([`rows`]): interleaves hunk headers and content rows
//!   into one linear render order shared by every downstream stage.
//! - **Virtualization** ([`virtualizer`]): fixed-height offset table with
//!   binary-searched visible ranges and overscan, for diffs too large to
//!   render outright.
//! - **Navigation** ([`navigator`]): hunk focus state, click resolution and
//!   scroll targeting over an injected [`ScrollRegion`](navigator::ScrollRegion).
//! - **View** ([`view`]): the [`DiffPane`](view::DiffPane) component tying
//!   it together, including the direct/virtualized strategy choice.
//!
//! # Example
//!
//! ```
//! use diffpane::model::{FileDiff, FileStatus, Hunk, Line};
//! use diffpane::rows::ViewMode;
//! use diffpane::view::DiffPane;
//!
//! let diff = FileDiff::new(
//!     vec![Hunk::new(0, Some("fn area".into()), 4, vec![
//!         Line::context(4, 4, "fn area(w: u32, h: u32) -> u32 {"),
//!         Line::deletion(5, "    w + h"),
//!         Line::addition(5, "    w * h"),
//!         Line::context(6, 6, "}"),
//!     ])],
//!     FileStatus::Modified,
//! );
//!
//! let node = DiffPane::new(diff).view_mode(ViewMode::Split).to_node();
//! assert!(node.collect_text().contains("-    w + h"));
//! assert!(node.collect_text().contains("+    w * h"));
//! ```

pub mod model;
pub mod navigator;
pub mod node;
pub mod pair;
pub mod rows;
pub mod style;
pub mod view;
pub mod virtualizer;

/// Commonly used types.
pub mod prelude {
    pub use crate::model::{FileDiff, FileStatus, Hunk, Line, LineKind, ModelError};
    pub use crate::navigator::{HunkNavigator, ScrollRegion};
    pub use crate::node::{BoxNode, Node, TextNode};
    pub use crate::pair::{pair_lines, SplitRow};
    pub use crate::rows::{flatten, FlattenedRow, RowPayload, ViewMode};
    pub use crate::style::{Color, FlexDirection, TextStyle};
    pub use crate::view::{DiffPane, PaneState, RenderStrategy, VIRTUALIZATION_THRESHOLD};
    pub use crate::virtualizer::{RowHeights, Virtualizer};
}
