//! Strength badge — rating label on a red/yellow/green background.

use pwforge_core::StrengthRating;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::theme;

/// Styled badge for `rating`. Unrated renders as a dim placeholder.
pub fn badge_span(rating: StrengthRating) -> Span<'static> {
    match theme::strength_color(rating) {
        Some(bg) => Span::styled(
            format!(" {} ", rating.label()),
            Style::default()
                .fg(theme::NAVY)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(" \u{2014} ", theme::key_hint()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_badge_is_padded_label_on_color() {
        let span = badge_span(StrengthRating::Medium);
        assert_eq!(span.content, " Medium ");
        assert_eq!(span.style.bg, Some(theme::ELECTRIC_YELLOW));
    }

    #[test]
    fn unrated_badge_has_no_background() {
        let span = badge_span(StrengthRating::Unrated);
        assert_eq!(span.style.bg, None);
    }
}
