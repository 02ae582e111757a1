//! ANSI color attributes and per-importance color sets

use super::importance::{Importance, IMPORTANCE_COUNT};
use serde::{Deserialize, Serialize};

/// One of the eight standard ANSI colors, or the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    #[default]
    Default,
}

impl Color {
    /// ANSI offset (0..7) for standard colors, `None` for the default.
    fn offset(&self) -> Option<u8> {
        match self {
            Color::Black => Some(0),
            Color::Red => Some(1),
            Color::Green => Some(2),
            Color::Yellow => Some(3),
            Color::Blue => Some(4),
            Color::Magenta => Some(5),
            Color::Cyan => Some(6),
            Color::White => Some(7),
            Color::Default => None,
        }
    }
}

/// A foreground/background/bold attribute triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorSpec {
    pub foreground: Color,
    pub background: Color,
    pub bold: bool,
}

impl ColorSpec {
    pub fn new(foreground: Color, background: Color, bold: bool) -> Self {
        Self {
            foreground,
            background,
            bold,
        }
    }

    /// Foreground-only spec, no bold.
    pub fn fg(foreground: Color) -> Self {
        Self {
            foreground,
            background: Color::Default,
            bold: false,
        }
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// True when the spec carries no attribute at all; such a spec renders
    /// no escape sequence.
    pub fn is_default(&self) -> bool {
        self.foreground == Color::Default && self.background == Color::Default && !self.bold
    }

    /// The CSI introducer for this spec: `ESC [ <params> m` with foreground
    /// `30+n`, background `40+n`, and `1` for bold, in that order. The
    /// empty string for a default spec.
    pub fn escape(&self) -> String {
        if self.is_default() {
            return String::new();
        }
        let mut params: Vec<String> = Vec::with_capacity(3);
        if let Some(n) = self.foreground.offset() {
            params.push((30 + n).to_string());
        }
        if let Some(n) = self.background.offset() {
            params.push((40 + n).to_string());
        }
        if self.bold {
            params.push("1".to_string());
        }
        format!("\x1b[{}m", params.join(";"))
    }

    /// The reset sequence paired with [`escape`](Self::escape).
    pub fn reset() -> &'static str {
        "\x1b[m"
    }
}

/// A mapping from [`Importance`] to [`ColorSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorSet {
    specs: [ColorSpec; IMPORTANCE_COUNT],
}

impl ColorSet {
    /// No color for any level.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard colored preset: cool colors for chatter, hot colors
    /// for trouble, bold from ERROR up.
    pub fn full_color() -> Self {
        let mut set = Self::default();
        set.set(Importance::Debug, ColorSpec::fg(Color::Blue));
        set.set(Importance::Trace, ColorSpec::fg(Color::Cyan));
        set.set(Importance::Where, ColorSpec::fg(Color::Magenta));
        set.set(Importance::Info, ColorSpec::fg(Color::Green));
        set.set(Importance::Warn, ColorSpec::fg(Color::Yellow));
        set.set(Importance::Error, ColorSpec::fg(Color::Red).with_bold(true));
        set.set(Importance::Fatal, ColorSpec::fg(Color::Red).with_bold(true));
        set
    }

    /// Monochrome preset: bold for ERROR and FATAL, nothing else.
    pub fn black_and_white() -> Self {
        let mut set = Self::default();
        set.set(Importance::Error, ColorSpec::default().with_bold(true));
        set.set(Importance::Fatal, ColorSpec::default().with_bold(true));
        set
    }

    pub fn get(&self, importance: Importance) -> ColorSpec {
        self.specs[importance.index()]
    }

    pub fn set(&mut self, importance: Importance, spec: ColorSpec) {
        self.specs[importance.index()] = spec;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_order() {
        let spec = ColorSpec::new(Color::Red, Color::Yellow, true);
        assert_eq!(spec.escape(), "\x1b[31;43;1m");
    }

    #[test]
    fn test_escape_foreground_only() {
        assert_eq!(ColorSpec::fg(Color::Green).escape(), "\x1b[32m");
    }

    #[test]
    fn test_escape_bold_only() {
        assert_eq!(ColorSpec::default().with_bold(true).escape(), "\x1b[1m");
    }

    #[test]
    fn test_default_renders_nothing() {
        assert!(ColorSpec::default().is_default());
        assert_eq!(ColorSpec::default().escape(), "");
    }

    #[test]
    fn test_reset() {
        assert_eq!(ColorSpec::reset(), "\x1b[m");
    }

    #[test]
    fn test_presets() {
        let full = ColorSet::full_color();
        assert_eq!(full.get(Importance::Info), ColorSpec::fg(Color::Green));
        assert!(full.get(Importance::Fatal).bold);

        let bw = ColorSet::black_and_white();
        assert!(bw.get(Importance::Info).is_default());
        assert!(bw.get(Importance::Error).bold);

        let empty = ColorSet::empty();
        for imp in Importance::ALL {
            assert!(empty.get(imp).is_default());
        }
    }
}
