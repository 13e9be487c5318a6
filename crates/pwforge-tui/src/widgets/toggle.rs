//! Character-class toggle line — `[✓] Uppercase`.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme;

pub fn toggle_line(label: &str, value: bool, focused: bool) -> Line<'static> {
    let marker = if value { "[\u{2713}]" } else { "[ ]" };
    let marker_style = if focused {
        Style::default().fg(theme::ELECTRIC_PURPLE)
    } else if value {
        Style::default().fg(theme::SUCCESS_GREEN)
    } else {
        Style::default().fg(theme::BORDER_GRAY)
    };
    let label_style = if focused {
        theme::label_focused()
    } else {
        theme::label()
    };

    Line::from(vec![
        Span::styled(format!("  {marker} "), marker_style),
        Span::styled(label.to_owned(), label_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn marker_reflects_value() {
        assert_eq!(text(&toggle_line("Numbers", true, false)), "  [\u{2713}] Numbers");
        assert_eq!(text(&toggle_line("Numbers", false, false)), "  [ ] Numbers");
    }

    #[test]
    fn focus_wins_over_value_color() {
        let line = toggle_line("Numbers", true, true);
        assert_eq!(line.spans[0].style.fg, Some(theme::ELECTRIC_PURPLE));
    }
}
