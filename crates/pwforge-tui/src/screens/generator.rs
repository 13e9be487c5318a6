//! Generator screen — length gauge, class toggles, actions, and output.
//!
//! Owns the [`UiState`] controller, the clipboard, and the copy-feedback
//! timer. Key and mouse input become [`Action`]s; `update` applies them to
//! the state, which regenerates synchronously before the next frame.

use std::cell::Cell;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use pwforge_core::{CharClass, CoreError, MAX_LENGTH, MIN_LENGTH};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use secrecy::ExposeSecret;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::clipboard::Clipboard;
use crate::component::Component;
use crate::feedback::FeedbackTimer;
use crate::state::{Control, CopyFeedback, UiState};
use crate::theme;
use crate::widgets::{length_gauge, strength_badge, toggle};

const PANEL_WIDTH: u16 = 64;
const PANEL_HEIGHT: u16 = 22;
const GENERATE_LABEL: &str = " \u{21bb} Generate New ";

/// Clickable regions from the last frame.
#[derive(Debug, Clone, Copy, Default)]
struct Hitboxes {
    gauge: Rect,
    toggles: [Rect; 4],
    generate: Rect,
    detail: Rect,
    output: Rect,
}

pub struct GeneratorScreen {
    state: UiState,
    clipboard: Box<dyn Clipboard>,
    timer: FeedbackTimer,
    action_tx: Option<UnboundedSender<Action>>,
    hitboxes: Cell<Hitboxes>,
}

impl GeneratorScreen {
    pub fn new(state: UiState, clipboard: Box<dyn Clipboard>, copy_feedback: Duration) -> Self {
        Self {
            state,
            clipboard,
            timer: FeedbackTimer::new(copy_feedback),
            action_tx: None,
            hitboxes: Cell::new(Hitboxes::default()),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Action triggered by Space/Enter on the focused control.
    fn focused_action(&self) -> Option<Action> {
        match self.state.focus() {
            Control::Length => None,
            Control::Class(class) => Some(Action::ToggleClass(class)),
            Control::Generate => Some(Action::Regenerate),
            Control::StrengthDetail => Some(Action::ToggleStrengthDetail),
            Control::Output => Some(Action::Copy),
        }
    }

    fn copy(&mut self) {
        let Some(password) = self.state.copyable() else {
            debug!("copy requested with empty password");
            return;
        };

        let ticket = match self.clipboard.set_text(password.expose_secret()) {
            Ok(()) => {
                info!("password copied to clipboard");
                self.state.mark_copied()
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.state.mark_copy_failed()
            }
        };

        if let Some(tx) = self.action_tx.clone() {
            self.timer.schedule(ticket, tx);
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_panel(frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = PANEL_WIDTH.min(area.width.saturating_sub(2));
        let panel_h = PANEL_HEIGHT.min(area.height);
        let x = area.width.saturating_sub(panel_w) / 2;
        let y = area.height.saturating_sub(panel_h) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("Random Password Generator", theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        )
    }

    fn section_label(frame: &mut Frame, area: Rect, text: &str, focused: bool) {
        let style = if focused {
            theme::label_focused()
        } else {
            theme::label()
        };
        frame.render_widget(Paragraph::new(Span::styled(text.to_owned(), style)), area);
    }

    fn render_toggles(&self, frame: &mut Frame, area: Rect) -> [Rect; 4] {
        let rows: [Rect; 4] = Layout::vertical([Constraint::Length(1); 4]).areas(area);
        let config = self.state.config();
        for (class, row) in CharClass::ALL.iter().zip(rows) {
            let focused = self.state.focus() == Control::Class(*class);
            frame.render_widget(
                Paragraph::new(toggle::toggle_line(
                    class.label(),
                    config.is_enabled(*class),
                    focused,
                )),
                row,
            );
        }
        rows
    }

    /// Generate button, strength badge, and strength-detail toggle.
    fn render_actions(&self, frame: &mut Frame, area: Rect) -> (Rect, Rect) {
        let button_width = u16::try_from(GENERATE_LABEL.chars().count()).unwrap_or(16);
        let [button, _, badge, _, detail] = Layout::horizontal([
            Constraint::Length(button_width),
            Constraint::Length(2),
            Constraint::Length(10),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                GENERATE_LABEL,
                theme::button(self.state.focus() == Control::Generate),
            )),
            button,
        );
        frame.render_widget(
            Paragraph::new(strength_badge::badge_span(self.state.strength())),
            badge,
        );
        frame.render_widget(
            Paragraph::new(toggle::toggle_line(
                "Details",
                self.state.strength_visible(),
                self.state.focus() == Control::StrengthDetail,
            )),
            detail,
        );

        (button, detail)
    }

    fn render_output(&self, frame: &mut Frame, area: Rect) {
        let focused = self.state.focus() == Control::Output;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
            .title_bottom(
                Line::from(Span::styled(" c copy ", theme::key_hint())).right_aligned(),
            );

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.state.password().expose_secret(),
                theme::password_text(),
            )),
            inner,
        );
    }

    fn feedback_line(&self) -> Line<'static> {
        match self.state.copy_feedback() {
            CopyFeedback::Copied { .. } => {
                Line::from(Span::styled("Password copied to clipboard!", theme::success()))
            }
            CopyFeedback::Failed { .. } => {
                Line::from(Span::styled("Could not copy to clipboard", theme::error()))
            }
            CopyFeedback::Idle => match self.state.last_error() {
                Some(CoreError::EmptyPool) => Line::from(Span::styled(
                    "Enable at least one character class",
                    theme::error(),
                )),
                Some(e) => Line::from(Span::styled(e.to_string(), theme::error())),
                None => Line::default(),
            },
        }
    }

    fn strength_line(&self) -> Line<'static> {
        if !self.state.strength_visible() {
            return Line::default();
        }
        Line::from(vec![
            Span::styled("Password Strength: ", theme::label()),
            Span::styled(
                self.state.strength().label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    }

    fn render_key_hints(frame: &mut Frame, area: Rect) {
        let pairs = [
            ("\u{2190}/\u{2192}", "length"),
            ("1-4", "classes"),
            ("g", "generate"),
            ("c", "copy"),
            ("s", "strength"),
        ];
        let mut spans = Vec::with_capacity(pairs.len() * 2);
        for (key, desc) in pairs {
            spans.push(Span::styled(key, theme::key_hint_key()));
            spans.push(Span::styled(format!(" {desc}  "), theme::key_hint()));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}

// ── Component impl ───────────────────────────────────────────────────

impl Component for GeneratorScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h' | '-') => Some(Action::DecreaseLength),
            KeyCode::Right | KeyCode::Char('l' | '+') => Some(Action::IncreaseLength),
            KeyCode::Home => Some(Action::SetLength(MIN_LENGTH)),
            KeyCode::End => Some(Action::SetLength(MAX_LENGTH)),
            KeyCode::Char(c @ '1'..='4') => c
                .to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .and_then(|d| CharClass::ALL.get(d - 1))
                .map(|class| Action::ToggleClass(*class)),
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => Some(Action::FocusNext),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => Some(Action::FocusPrev),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ActivateFocused),
            KeyCode::Char('g' | 'r') => Some(Action::Regenerate),
            KeyCode::Char('c') => Some(Action::Copy),
            KeyCode::Char('s') => Some(Action::ToggleStrengthDetail),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let hit = self.hitboxes.get();
        let pos = Position::new(mouse.column, mouse.row);

        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if hit.gauge.contains(pos) {
                    self.state.set_focus(Control::Length);
                    length_gauge::length_at(hit.gauge, mouse.column).map(Action::SetLength)
                } else if let Some(i) = hit.toggles.iter().position(|r| r.contains(pos)) {
                    CharClass::ALL.get(i).map(|class| Action::ToggleClass(*class))
                } else if hit.generate.contains(pos) {
                    Some(Action::Regenerate)
                } else if hit.detail.contains(pos) {
                    Some(Action::ToggleStrengthDetail)
                } else if hit.output.contains(pos) {
                    Some(Action::Copy)
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp if hit.gauge.contains(pos) => Some(Action::IncreaseLength),
            MouseEventKind::ScrollDown if hit.gauge.contains(pos) => Some(Action::DecreaseLength),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::IncreaseLength => {
                self.state.increase_length();
            }
            Action::DecreaseLength => {
                self.state.decrease_length();
            }
            Action::SetLength(length) => {
                self.state.set_length(*length);
            }
            Action::ToggleClass(class) => self.state.toggle_class(*class),
            Action::Regenerate => self.state.regenerate(),
            Action::ToggleStrengthDetail => self.state.toggle_strength_visible(),
            Action::FocusNext => self.state.focus_next(),
            Action::FocusPrev => self.state.focus_prev(),
            Action::ActivateFocused => return Ok(self.focused_action()),
            Action::Copy => self.copy(),
            Action::CopyFeedbackExpired(ticket) => {
                if self.state.expire_copy_feedback(*ticket) {
                    debug!(ticket, "copy feedback cleared");
                }
            }
            Action::Quit | Action::Resize(..) | Action::ToggleHelp => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            area,
        );

        let content = Self::render_panel(frame, area);

        let [
            length_label,
            gauge,
            _,
            include_label,
            toggles,
            _,
            actions,
            _,
            output_label,
            output,
            feedback,
            detail_line,
            _,
            hints,
        ] = Layout::vertical([
            Constraint::Length(1), // "Password Length:"
            Constraint::Length(1), // gauge
            Constraint::Length(1), // spacer
            Constraint::Length(1), // "Include:"
            Constraint::Length(4), // class toggles
            Constraint::Length(1), // spacer
            Constraint::Length(1), // generate / badge / details
            Constraint::Length(1), // spacer
            Constraint::Length(1), // "Your password:"
            Constraint::Length(3), // output field
            Constraint::Length(1), // copy feedback
            Constraint::Length(1), // strength detail
            Constraint::Min(0),    // spacer
            Constraint::Length(1), // key hints
        ])
        .areas(content);

        let focus = self.state.focus();
        Self::section_label(frame, length_label, "Password Length:", focus == Control::Length);
        frame.render_widget(
            length_gauge::gauge(self.state.config().length, focus == Control::Length),
            gauge,
        );

        Self::section_label(frame, include_label, "Include:", false);
        let toggle_rows = self.render_toggles(frame, toggles);

        let (generate, detail) = self.render_actions(frame, actions);

        Self::section_label(frame, output_label, "Your password:", false);
        self.render_output(frame, output);

        frame.render_widget(Paragraph::new(self.feedback_line()), feedback);
        frame.render_widget(Paragraph::new(self.strength_line()), detail_line);

        Self::render_key_hints(frame, hints);

        self.hitboxes.set(Hitboxes {
            gauge,
            toggles: toggle_rows,
            generate,
            detail,
            output,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipboard::testing::{DeniedClipboard, RecordingClipboard};
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;
    use pwforge_core::{GeneratorConfig, StrengthRating};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    const FEEDBACK: Duration = Duration::from_secs(2);

    fn screen_with(clipboard: Box<dyn Clipboard>) -> GeneratorScreen {
        let state = UiState::with_rng(GeneratorConfig::default(), StdRng::seed_from_u64(7));
        GeneratorScreen::new(state, clipboard, FEEDBACK)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(screen: &GeneratorScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Screen coordinates of the first occurrence of `needle` in a frame.
    fn locate(frame: &str, needle: &str) -> (u16, u16) {
        for (row, line) in frame.lines().enumerate() {
            if let Some(byte_idx) = line.find(needle) {
                let col = line[..byte_idx].chars().count();
                return (u16::try_from(col).unwrap(), u16::try_from(row).unwrap());
            }
        }
        panic!("{needle:?} not found in frame:\n{frame}");
    }

    #[test]
    fn keys_map_to_actions() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        let cases = [
            (KeyCode::Right, Some(Action::IncreaseLength)),
            (KeyCode::Char('h'), Some(Action::DecreaseLength)),
            (KeyCode::End, Some(Action::SetLength(MAX_LENGTH))),
            (KeyCode::Char('1'), Some(Action::ToggleClass(CharClass::Upper))),
            (KeyCode::Char('4'), Some(Action::ToggleClass(CharClass::Symbols))),
            (KeyCode::Char('g'), Some(Action::Regenerate)),
            (KeyCode::Char('c'), Some(Action::Copy)),
            (KeyCode::Char('s'), Some(Action::ToggleStrengthDetail)),
            (KeyCode::Tab, Some(Action::FocusNext)),
            (KeyCode::Char('5'), None),
            (KeyCode::Char('z'), None),
        ];
        for (code, expected) in cases {
            assert_eq!(s.handle_key_event(key(code)).unwrap(), expected, "{code:?}");
        }
    }

    #[test]
    fn each_config_action_regenerates_once() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        assert_eq!(s.state().generations(), 1);

        s.update(&Action::ToggleClass(CharClass::Digits)).unwrap();
        assert_eq!(s.state().generations(), 2);

        s.update(&Action::IncreaseLength).unwrap();
        assert_eq!(s.state().generations(), 3);
        assert_eq!(s.state().password().len(), 13);

        s.update(&Action::SetLength(13)).unwrap();
        assert_eq!(s.state().generations(), 3);

        s.update(&Action::ToggleStrengthDetail).unwrap();
        assert_eq!(s.state().generations(), 3);

        s.update(&Action::Regenerate).unwrap();
        assert_eq!(s.state().generations(), 4);
    }

    #[test]
    fn activate_follows_focus() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        assert_eq!(s.update(&Action::ActivateFocused).unwrap(), Some(Action::Copy));

        s.update(&Action::FocusNext).unwrap(); // Length
        assert_eq!(s.update(&Action::ActivateFocused).unwrap(), None);

        s.update(&Action::FocusNext).unwrap(); // Uppercase
        assert_eq!(
            s.update(&Action::ActivateFocused).unwrap(),
            Some(Action::ToggleClass(CharClass::Upper))
        );
    }

    #[test]
    fn space_twice_on_a_toggle_flips_it_back() {
        let clipboard = RecordingClipboard::default();
        let mut s = screen_with(Box::new(clipboard.clone()));
        s.update(&Action::FocusNext).unwrap(); // Length
        s.update(&Action::FocusNext).unwrap(); // Uppercase

        for expected in [false, true] {
            let action = s.handle_key_event(key(KeyCode::Char(' '))).unwrap().unwrap();
            let follow_up = s.update(&action).unwrap().unwrap();
            assert_eq!(follow_up, Action::ToggleClass(CharClass::Upper));
            s.update(&follow_up).unwrap();
            assert_eq!(s.state().config().use_upper, expected);
            assert_eq!(s.state().focus(), Control::Class(CharClass::Upper));
        }
        assert!(clipboard.writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn copy_writes_clipboard_and_clears_after_delay() {
        let clipboard = RecordingClipboard::default();
        let mut s = screen_with(Box::new(clipboard.clone()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();

        s.update(&Action::Copy).unwrap();
        assert_eq!(clipboard.writes(), vec![s.state().password().expose_secret().to_owned()]);
        assert!(s.state().is_copied());

        tokio::time::sleep(FEEDBACK + Duration::from_millis(1)).await;
        let expired = rx.try_recv().unwrap();
        s.update(&expired).unwrap();
        assert!(!s.state().is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_copy_clears_after_latest() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();

        s.update(&Action::Copy).unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        s.update(&Action::Copy).unwrap();

        // First copy's deadline passes without a clear.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(rx.try_recv().is_err());
        assert!(s.state().is_copied());

        tokio::time::sleep(Duration::from_millis(501)).await;
        let expired = rx.try_recv().unwrap();
        assert_eq!(expired, Action::CopyFeedbackExpired(2));
        s.update(&expired).unwrap();
        assert!(!s.state().is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn denied_clipboard_does_not_set_copied() {
        let mut s = screen_with(Box::new(DeniedClipboard));
        let (tx, _rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();

        s.update(&Action::Copy).unwrap();
        assert!(!s.state().is_copied());
        assert!(matches!(s.state().copy_feedback(), CopyFeedback::Failed { .. }));
        assert!(draw(&s).contains("Could not copy to clipboard"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_password_is_not_copied() {
        let clipboard = RecordingClipboard::default();
        let mut s = screen_with(Box::new(clipboard.clone()));
        let (tx, _rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();

        for class in CharClass::ALL {
            s.update(&Action::ToggleClass(class)).unwrap();
        }
        s.update(&Action::Copy).unwrap();
        assert!(clipboard.writes().is_empty());
        assert_eq!(s.state().copy_feedback(), CopyFeedback::Idle);
    }

    #[test]
    fn render_shows_controls_and_password() {
        let s = screen_with(Box::new(RecordingClipboard::default()));
        let frame = draw(&s);
        for needle in [
            "Random Password Generator",
            "12 characters",
            "[\u{2713}] Uppercase",
            "[\u{2713}] Lowercase",
            "[\u{2713}] Numbers",
            "[\u{2713}] Special Characters",
            "Generate New",
            s.state().strength().label(),
            s.state().password().expose_secret(),
        ] {
            assert!(frame.contains(needle), "{needle:?} missing from:\n{frame}");
        }
        assert!(!frame.contains("Password Strength:"));
    }

    #[test]
    fn render_strength_detail_when_visible() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        s.update(&Action::ToggleStrengthDetail).unwrap();
        let frame = draw(&s);
        let expected = format!("Password Strength: {}", s.state().strength().label());
        assert!(frame.contains(&expected), "{expected:?} missing from:\n{frame}");
    }

    #[test]
    fn render_empty_pool_state() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        for class in CharClass::ALL {
            s.update(&Action::ToggleClass(class)).unwrap();
        }
        assert_eq!(s.state().strength(), StrengthRating::Unrated);
        let frame = draw(&s);
        assert!(frame.contains("Enable at least one character class"));
        assert!(frame.contains("[ ] Uppercase"));
    }

    #[test]
    fn clicking_a_toggle_flips_that_class() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        let frame = draw(&s);
        let (col, row) = locate(&frame, "Numbers");

        let action = s.handle_mouse_event(click(col, row)).unwrap();
        assert_eq!(action, Some(Action::ToggleClass(CharClass::Digits)));
    }

    #[test]
    fn clicking_the_gauge_sets_length() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        draw(&s);
        let gauge = s.hitboxes.get().gauge;
        assert!(gauge.width > 0);

        let right_edge = gauge.x + gauge.width - 1;
        let action = s.handle_mouse_event(click(right_edge, gauge.y)).unwrap();
        assert_eq!(action, Some(Action::SetLength(MAX_LENGTH)));
        assert_eq!(s.state().focus(), Control::Length);
    }

    #[test]
    fn clicking_outside_controls_does_nothing() {
        let mut s = screen_with(Box::new(RecordingClipboard::default()));
        draw(&s);
        assert_eq!(s.handle_mouse_event(click(0, 0)).unwrap(), None);
    }
}
