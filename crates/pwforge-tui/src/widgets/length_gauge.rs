//! Length slider rendered as a gauge, plus the inverse mapping used for
//! mouse clicks.

use pwforge_core::{MAX_LENGTH, MIN_LENGTH, clamp_length};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Gauge;

use crate::theme;

const SPAN: usize = MAX_LENGTH - MIN_LENGTH;

/// Fill percentage for `length` within `MIN_LENGTH..=MAX_LENGTH`.
pub fn percent(length: usize) -> u16 {
    let offset = clamp_length(length) - MIN_LENGTH;
    u16::try_from(offset * 100 / SPAN).unwrap_or(100)
}

pub fn gauge(length: usize, focused: bool) -> Gauge<'static> {
    let style = if focused {
        theme::gauge().fg(theme::NEON_CYAN)
    } else {
        theme::gauge()
    };
    Gauge::default()
        .gauge_style(style)
        .percent(percent(length))
        .label(format!("{length} characters"))
        .style(Style::default().fg(theme::DIM_WHITE))
}

/// Length selected by a click at `column` inside `area`, or `None` when the
/// click lands outside the gauge.
pub fn length_at(area: Rect, column: u16) -> Option<usize> {
    if area.width == 0 || column < area.x || column >= area.x.saturating_add(area.width) {
        return None;
    }
    let steps = usize::from(area.width - 1);
    if steps == 0 {
        return Some(MIN_LENGTH);
    }
    let offset = usize::from(column - area.x);
    // Round to the nearest step.
    Some(MIN_LENGTH + (offset * SPAN + steps / 2) / steps)
}
