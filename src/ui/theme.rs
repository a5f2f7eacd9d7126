//! Theme: dark canvas, high-contrast text, one accent.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Main canvas (history area) — dark gray so white text pops.
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Header, input bar, status.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    /// Borders / separators — visible.
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// Primary accent (prompt, question label).
    pub const ACCENT: Color = Color::Rgb(0x6b, 0xbc, 0xff);
    /// Answer label.
    pub const ACCENT_SOFT: Color = Color::Rgb(0x99, 0xd4, 0xff);
    /// Body text — near white, maximum visibility.
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    /// Secondary text.
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    /// Hints and placeholder.
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    pub const ERROR: Color = Color::Rgb(0xf0, 0x6c, 0x6c);
}

pub const HEADER_HEIGHT: u16 = 3;
pub const MIN_HISTORY_LINES: u16 = 3;
/// Top border plus one text row.
pub const INPUT_HEIGHT: u16 = 2;
pub const STATUS_HEIGHT: u16 = 1;
/// Blank line between exchanges.
pub const EXCHANGE_GAP: usize = 1;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
