//! Immutable value types describing a parsed file diff.
//!
//! Diff computation happens upstream: an external producer turns two file
//! revisions into an ordered list of [`Hunk`]s and hands the result across
//! the boundary as a [`FileDiff`]. Everything in this module is plain data;
//! the rendering pipeline derives its row structures from these values and
//! never mutates them.
//!
//! Field names serialize in camelCase so a diff produced on the other side
//! of an IPC or JSON boundary maps onto these types without translation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a single diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Line added in the new revision (+).
    Addition,
    /// Line removed from the old revision (-).
    Deletion,
    /// Unchanged line present in both revisions.
    Context,
}

/// One line of a diff hunk.
///
/// Context lines carry both line numbers; additions carry only the new
/// number; deletions carry only the old number. The constructors enforce
/// this shape.
///
/// # Example
///
/// ```
/// use diffpane::model::Line;
///
/// let ctx = Line::context(9, 9, "fn calculate() {");
/// let del = Line::deletion(10, "    self.value");
/// let add = Line::addition(10, "    self.value * 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// The kind of line.
    #[serde(rename = "lineType")]
    pub kind: LineKind,
    /// Line number in the old revision, if present there.
    pub old_line_number: Option<u32>,
    /// Line number in the new revision, if present there.
    pub new_line_number: Option<u32>,
    /// The line's text content. Treated as opaque; syntax highlighting, if
    /// any, happens outside this engine.
    pub content: String,
}

impl Line {
    /// Create a context line (present in both revisions).
    pub fn context(old: u32, new: u32, content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Context,
            old_line_number: Some(old),
            new_line_number: Some(new),
            content: content.into(),
        }
    }

    /// Create an added line.
    pub fn addition(new: u32, content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Addition,
            old_line_number: None,
            new_line_number: Some(new),
            content: content.into(),
        }
    }

    /// Create a deleted line.
    pub fn deletion(old: u32, content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Deletion,
            old_line_number: Some(old),
            new_line_number: None,
            content: content.into(),
        }
    }

    /// Whether the line-number fields match the line kind.
    fn numbers_consistent(&self) -> bool {
        match self.kind {
            LineKind::Context => {
                self.old_line_number.is_some() && self.new_line_number.is_some()
            }
            LineKind::Addition => {
                self.old_line_number.is_none() && self.new_line_number.is_some()
            }
            LineKind::Deletion => {
                self.old_line_number.is_some() && self.new_line_number.is_none()
            }
        }
    }
}

/// A contiguous block of diff lines with a starting position in the old
/// revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// 0-based position of this hunk within its diff, strictly increasing.
    pub index: usize,
    /// Source context label, e.g. the enclosing function signature. When
    /// absent a fallback header is generated at flatten time.
    pub header: Option<String>,
    /// First line of the hunk in the old revision.
    pub old_start: u32,
    /// The hunk's lines, in diff order.
    pub lines: Vec<Line>,
}

impl Hunk {
    /// Create a hunk.
    pub fn new(index: usize, header: Option<String>, old_start: u32, lines: Vec<Line>) -> Self {
        Self {
            index,
            header,
            old_start,
            lines,
        }
    }

    /// Header text to display: the hunk's own header, or a generated
    /// fallback naming the starting line.
    pub fn display_header(&self) -> String {
        match &self.header {
            Some(header) => header.clone(),
            None => format!("Changes at line {}", self.old_start),
        }
    }
}

/// Overall status of the file this diff belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File was created.
    Added,
    /// File content changed.
    Modified,
    /// File was removed.
    Deleted,
    /// File was moved or renamed.
    Renamed,
}

impl FileStatus {
    /// Map a producer-supplied status label onto a variant.
    ///
    /// Unknown labels fall back to [`FileStatus::Modified`] rather than
    /// failing, keeping the unknown case explicit at the one place labels
    /// enter the engine.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "added" | "new" | "untracked" => FileStatus::Added,
            "deleted" | "removed" => FileStatus::Deleted,
            "renamed" | "moved" => FileStatus::Renamed,
            _ => FileStatus::Modified,
        }
    }

    /// One-character marker used in gutters and file lists.
    pub fn glyph(self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }
}

/// A parsed diff for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    /// The hunks, in file order. Empty for binary files.
    pub hunks: Vec<Hunk>,
    /// Binary files have no line content to render.
    pub is_binary: bool,
    /// Status of the file in this change.
    pub status: FileStatus,
    /// Language hint forwarded to an external syntax highlighter. Opaque to
    /// this engine.
    pub language: Option<String>,
}

impl FileDiff {
    /// Create a text diff from hunks.
    pub fn new(hunks: Vec<Hunk>, status: FileStatus) -> Self {
        Self {
            hunks,
            is_binary: false,
            status,
            language: None,
        }
    }

    /// Create a binary diff (no hunks, no line rendering).
    pub fn binary(status: FileStatus) -> Self {
        Self {
            hunks: Vec::new(),
            is_binary: true,
            status,
            language: None,
        }
    }

    /// Attach a language hint.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Total number of lines across all hunks.
    ///
    /// This is the quantity the rendering mode selector compares against its
    /// threshold.
    pub fn total_line_count(&self) -> usize {
        self.hunks.iter().map(|h| h.lines.len()).sum()
    }

    /// Check the structural invariants of a diff received from an external
    /// producer.
    ///
    /// Rendering does not require a prior `validate` call (every rendering
    /// branch tolerates the conditions checked here), but callers that
    /// ingest diffs from an untrusted boundary can surface malformed input
    /// early instead of rendering something misleading.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.is_binary && !self.hunks.is_empty() {
            return Err(ModelError::BinaryWithHunks);
        }
        let mut previous_index: Option<usize> = None;
        for hunk in &self.hunks {
            if hunk.lines.is_empty() {
                return Err(ModelError::EmptyHunk { index: hunk.index });
            }
            if let Some(prev) = previous_index {
                if hunk.index <= prev {
                    return Err(ModelError::NonMonotonicHunkIndex {
                        previous: prev,
                        found: hunk.index,
                    });
                }
            }
            previous_index = Some(hunk.index);
            for (line_ix, line) in hunk.lines.iter().enumerate() {
                if !line.numbers_consistent() {
                    return Err(ModelError::LineNumberMismatch {
                        hunk_index: hunk.index,
                        line_index: line_ix,
                        kind: line.kind,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Structural invariant violations in a [`FileDiff`] received from an
/// external producer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A binary diff must not carry hunks.
    #[error("binary diff carries hunks")]
    BinaryWithHunks,
    /// Every hunk that appears in a diff must have at least one line.
    #[error("hunk {index} has no lines")]
    EmptyHunk {
        /// Index of the offending hunk.
        index: usize,
    },
    /// Hunk indices must be strictly increasing.
    #[error("hunk index {found} follows {previous}; indices must strictly increase")]
    NonMonotonicHunkIndex {
        /// Index of the preceding hunk.
        previous: usize,
        /// Index that broke the ordering.
        found: usize,
    },
    /// A line's number fields do not match its kind.
    #[error("line {line_index} in hunk {hunk_index} has numbers inconsistent with {kind:?}")]
    LineNumberMismatch {
        /// Hunk containing the line.
        hunk_index: usize,
        /// Position of the line within the hunk.
        line_index: usize,
        /// The line's kind.
        kind: LineKind,
    },
}
