//! Neon palette and semantic styling for the TUI.

use pwforge_core::StrengthRating;
use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const NAVY: Color = Color::Rgb(10, 25, 47); // #0a192f

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Section labels ("Password Length:", "Include:").
pub fn label() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Label of the control holding focus.
pub fn label_focused() -> Style {
    Style::default().fg(NEON_CYAN)
}

/// Read-only password text.
pub fn password_text() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Filled portion of the length gauge.
pub fn gauge() -> Style {
    Style::default().fg(ELECTRIC_PURPLE).bg(BG_HIGHLIGHT)
}

/// Push-button look for "Generate New".
pub fn button(focused: bool) -> Style {
    let style = Style::default().fg(NAVY).bg(NEON_CYAN).add_modifier(Modifier::BOLD);
    if focused {
        style.bg(ELECTRIC_PURPLE)
    } else {
        style
    }
}

/// Badge background for a strength rating: Weak red, Medium yellow,
/// Strong green. Unrated has no badge color.
pub fn strength_color(rating: StrengthRating) -> Option<Color> {
    match rating {
        StrengthRating::Weak => Some(ERROR_RED),
        StrengthRating::Medium => Some(ELECTRIC_YELLOW),
        StrengthRating::Strong => Some(SUCCESS_GREEN),
        StrengthRating::Unrated => None,
    }
}

pub fn success() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

pub fn error() -> Style {
    Style::default().fg(ERROR_RED)
}
