//! Application core — event loop, global keys, action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use pwforge_core::GeneratorConfig;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::Action;
use crate::clipboard::Osc52Clipboard;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::GeneratorScreen;
use crate::state::UiState;
use crate::theme;
use crate::tui::Tui;

/// Startup settings resolved from config and CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub generator: GeneratorConfig,
    pub copy_feedback: Duration,
    pub mouse: bool,
}

/// Next thing the loop has to handle.
enum Wake {
    Event(Option<Event>),
    Action(Option<Action>),
}

/// Top-level application state and event loop.
pub struct App {
    screen: Box<dyn Component>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// A frame is owed since the last draw.
    dirty: bool,
    settings: AppSettings,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let state = UiState::new(settings.generator);
        let screen = GeneratorScreen::new(
            state,
            Box::new(Osc52Clipboard),
            settings.copy_feedback,
        );
        Self::with_screen(Box::new(screen), settings)
    }

    fn with_screen(screen: Box<dyn Component>, settings: AppSettings) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            screen,
            running: true,
            help_visible: false,
            dirty: true,
            settings,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until quit or the event stream ends.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(self.settings.mouse)?;
        tui.enter()?;
        self.screen.init(self.action_tx.clone())?;

        let mut events = EventReader::new();
        info!("TUI event loop started");

        while self.running {
            // 1. Drain queued actions (follow-ups, timer clears)
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
            }
            if !self.running {
                break;
            }

            // 2. Draw only when something changed
            if self.dirty {
                tui.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }

            // 3. Wait for input or a spawned action
            let wake = tokio::select! {
                event = events.next() => Wake::Event(event),
                action = self.action_rx.recv() => Wake::Action(action),
            };

            match wake {
                Wake::Event(None) | Wake::Action(None) => break,
                Wake::Event(Some(event)) => self.handle_event(event)?,
                Wake::Action(Some(action)) => self.process_action(&action)?,
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let action = match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Mouse(mouse) => self.handle_mouse_event(mouse)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
        };
        if let Some(action) = action {
            self.action_tx.send(action)?;
        }
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else is delegated to the screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Ok(Some(Action::Quit))
                }
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            // Shift state for '?' varies by terminal
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            _ => {}
        }

        self.screen.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(None);
        }
        self.screen.handle_mouse_event(mouse)
    }

    /// Process a single action — update app state and propagate to the screen.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Resize(..) => {}

            other => {
                debug!(?other, "dispatching");
                if let Some(follow_up) = self.screen.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        self.dirty = true;
        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.screen.render(frame, content_area);
        Self::render_status_bar(frame, status_area);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled("pwforge", theme::title_style()),
            Span::styled(
                concat!(" v", env!("CARGO_PKG_VERSION")),
                theme::key_hint(),
            ),
            Span::styled(" │ ? help  q quit", theme::key_hint()),
        ]);

        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(theme::BG_HIGHLIGHT)),
            area,
        );
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 52u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(2));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            [
                Line::from(Span::styled(
                    format!("  {title}"),
                    Style::default().fg(theme::NEON_CYAN),
                )),
                Line::from(Span::styled(
                    format!("  {}", "─".repeat(title.chars().count())),
                    theme::key_hint(),
                )),
            ]
        };
        let binding = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<12}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };

        let mut help_text = vec![Line::from("")];
        help_text.extend(section("Generator"));
        help_text.extend([
            binding("←/→ h/l", "Length -1 / +1"),
            binding("Home/End", "Length 8 / 32"),
            binding("1-4", "Toggle character class"),
            binding("g r", "Generate new password"),
            binding("c", "Copy password"),
            binding("s", "Show strength detail"),
        ]);
        help_text.push(Line::from(""));
        help_text.extend(section("Navigation"));
        help_text.extend([
            binding("Tab/S-Tab", "Next / previous control"),
            binding("Space/Enter", "Activate focused control"),
            binding("?", "This help"),
            binding("q Ctrl+C", "Quit"),
        ]);
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "                Esc or ? to close",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipboard::testing::RecordingClipboard;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};

    fn test_app() -> App {
        let settings = AppSettings {
            generator: GeneratorConfig::default(),
            copy_feedback: Duration::from_secs(2),
            mouse: false,
        };
        let state = UiState::with_rng(settings.generator, StdRng::seed_from_u64(3));
        let screen = GeneratorScreen::new(
            state,
            Box::new(RecordingClipboard::default()),
            settings.copy_feedback,
        );
        let mut app = App::with_screen(Box::new(screen), settings);
        app.screen.init(app.action_tx.clone()).unwrap();
        app
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        key_with(code, KeyModifiers::NONE)
    }

    fn frame_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn global_quit_keys() {
        let mut app = test_app();
        assert_eq!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap(), Some(Action::Quit));
        assert_eq!(
            app.handle_key_event(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::Quit)
        );
        // Plain 'c' is the screen's copy key.
        assert_eq!(app.handle_key_event(key(KeyCode::Char('c'))).unwrap(), Some(Action::Copy));
    }

    #[test]
    fn help_overlay_swallows_screen_keys() {
        let mut app = test_app();
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.help_visible);

        assert_eq!(app.handle_key_event(key(KeyCode::Char('g'))).unwrap(), None);
        assert_eq!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ToggleHelp)
        );
        assert_eq!(
            app.handle_key_event(key_with(KeyCode::Char('?'), KeyModifiers::SHIFT))
                .unwrap(),
            Some(Action::ToggleHelp)
        );
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = test_app();
        app.process_action(&Action::Quit).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn activate_sends_follow_up() {
        let mut app = test_app();
        // Initial focus is the password field, so activation copies.
        app.process_action(&Action::ActivateFocused).unwrap();
        assert_eq!(app.action_rx.try_recv().unwrap(), Action::Copy);
    }

    #[test]
    fn render_includes_status_bar_and_help() {
        let mut app = test_app();
        let text = frame_text(&app);
        assert!(text.contains("pwforge"));
        assert!(text.contains("Random Password Generator"));
        assert!(!text.contains("Keyboard Shortcuts"));

        app.process_action(&Action::ToggleHelp).unwrap();
        let text = frame_text(&app);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Toggle character class"));
    }
}
