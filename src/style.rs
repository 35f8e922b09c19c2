//! Style definitions for rendered diff rows.
//!
//! Styles control the visual appearance (colors, text attributes) and the
//! stacking direction of nodes. Layout here is deliberately minimal: diff
//! rows are fixed-height lines, so the only layout decision a node makes is
//! whether its children stack as a row or a column.

/// Direction in which a box node stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    /// Children are laid out left to right.
    #[default]
    Row,
    /// Children are laid out top to bottom.
    Column,
}

/// Terminal color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Default terminal color.
    Default,
    /// Black.
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
    /// Bright/light black (gray).
    BrightBlack,
    /// Bright/light red.
    BrightRed,
    /// Bright/light green.
    BrightGreen,
    /// Bright/light yellow.
    BrightYellow,
    /// Bright/light blue.
    BrightBlue,
    /// Bright/light magenta.
    BrightMagenta,
    /// Bright/light cyan.
    BrightCyan,
    /// Bright/light white.
    BrightWhite,
    /// 8-bit color (0-255).
    Ansi256(u8),
    /// 24-bit RGB color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Create an RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Text appearance attributes for a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    /// Text color.
    pub color: Option<Color>,
    /// Background color.
    pub background_color: Option<Color>,
    /// Bold text.
    pub bold: bool,
    /// Dim/faint text.
    pub dim: bool,
    /// Inverse foreground/background.
    pub inverse: bool,
}

impl TextStyle {
    /// Create a new text style with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: None,
            background_color: None,
            bold: false,
            dim: false,
            inverse: false,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set bold attribute.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set dim attribute.
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Set inverse attribute.
    #[must_use]
    pub const fn inverse(mut self) -> Self {
        self.inverse = true;
        self
    }

    /// Merge this style with another, where `other` takes precedence.
    ///
    /// Colors from `other` override `self` if present. Boolean attributes
    /// are combined with OR.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            color: other.color.or(self.color),
            background_color: other.background_color.or(self.background_color),
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            inverse: self.inverse || other.inverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let style = TextStyle::new().color(Color::Green).bold();
        assert_eq!(style.color, Some(Color::Green));
        assert!(style.bold);
        assert!(!style.dim);
    }

    #[test]
    fn test_merge_other_wins_colors() {
        let base = TextStyle::new().color(Color::White).dim();
        let emphasis = TextStyle::new().color(Color::Red).bold();
        let combined = base.merge(&emphasis);
        assert_eq!(combined.color, Some(Color::Red));
        assert!(combined.bold);
        assert!(combined.dim);
    }

    #[test]
    fn test_merge_keeps_base_when_other_unset() {
        let base = TextStyle::new().bg(Color::BrightBlack);
        let combined = base.merge(&TextStyle::new());
        assert_eq!(combined.background_color, Some(Color::BrightBlack));
    }

    #[test]
    fn test_rgb_constructor() {
        assert_eq!(Color::rgb(1, 2, 3), Color::Rgb(1, 2, 3));
    }
}
