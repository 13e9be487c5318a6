//! Generator UI state — the controller half of the generator screen.
//!
//! Every config mutator funnels through [`UiState::refresh`], which
//! synchronously regenerates the password and reclassifies it before
//! control returns to the event loop. The screen therefore never renders a
//! new config next to a stale password.

use pwforge_core::{
    CharClass, CoreError, GeneratorConfig, MAX_LENGTH, MIN_LENGTH, Password, StrengthRating,
    clamp_length, classify, generate_with,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use secrecy::ExposeSecret;
use tracing::debug;

/// Focusable controls in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Length,
    Class(CharClass),
    Generate,
    StrengthDetail,
    Output,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Self::Length,
        Self::Class(CharClass::Upper),
        Self::Class(CharClass::Lower),
        Self::Class(CharClass::Digits),
        Self::Class(CharClass::Symbols),
        Self::Generate,
        Self::StrengthDetail,
        Self::Output,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|&c| c == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Transient result of the last copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFeedback {
    #[default]
    Idle,
    Copied { ticket: u64 },
    Failed { ticket: u64 },
}

pub struct UiState {
    config: GeneratorConfig,
    password: Password,
    strength: StrengthRating,
    last_error: Option<CoreError>,
    copy_feedback: CopyFeedback,
    copy_ticket: u64,
    strength_visible: bool,
    focus: Control,
    generations: u64,
    rng: StdRng,
}

impl UiState {
    /// Mount with `config`, seeding the RNG from the OS.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Mount with an explicit RNG. Generates the first password immediately.
    pub fn with_rng(config: GeneratorConfig, rng: StdRng) -> Self {
        let mut state = Self {
            config: GeneratorConfig {
                length: clamp_length(config.length),
                ..config
            },
            password: Password::default(),
            strength: StrengthRating::Unrated,
            last_error: None,
            copy_feedback: CopyFeedback::Idle,
            copy_ticket: 0,
            strength_visible: false,
            focus: Control::Output,
            generations: 0,
            rng,
        };
        state.refresh();
        state
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn strength(&self) -> StrengthRating {
        self.strength
    }

    /// Error from the most recent generation attempt, if it failed.
    pub fn last_error(&self) -> Option<&CoreError> {
        self.last_error.as_ref()
    }

    pub fn copy_feedback(&self) -> CopyFeedback {
        self.copy_feedback
    }

    #[cfg(test)]
    pub fn is_copied(&self) -> bool {
        matches!(self.copy_feedback, CopyFeedback::Copied { .. })
    }

    pub fn strength_visible(&self) -> bool {
        self.strength_visible
    }

    pub fn focus(&self) -> Control {
        self.focus
    }

    /// Number of generation attempts since mount (including failed ones).
    #[cfg(test)]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    // ── Recompute ────────────────────────────────────────────────────

    /// Regenerate and reclassify from the current config.
    pub fn refresh(&mut self) {
        self.generations += 1;
        match generate_with(&self.config, &mut self.rng) {
            Ok(password) => {
                self.strength = classify(password.expose_secret());
                self.password = password;
                self.last_error = None;
            }
            Err(e) => {
                debug!(error = %e, "generation failed");
                self.password = Password::default();
                self.strength = StrengthRating::Unrated;
                self.last_error = Some(e);
            }
        }
        debug!(
            generation = self.generations,
            length = self.config.length,
            strength = ?self.strength,
            "password refreshed"
        );
    }

    // ── Config mutators ──────────────────────────────────────────────

    /// Set the length, clamped to the supported range. Returns whether the
    /// length changed; unchanged lengths do not regenerate.
    pub fn set_length(&mut self, length: usize) -> bool {
        let length = clamp_length(length);
        if length == self.config.length {
            return false;
        }
        self.config.length = length;
        self.refresh();
        true
    }

    pub fn increase_length(&mut self) -> bool {
        self.set_length(self.config.length.saturating_add(1).min(MAX_LENGTH))
    }

    pub fn decrease_length(&mut self) -> bool {
        self.set_length(self.config.length.saturating_sub(1).max(MIN_LENGTH))
    }

    pub fn toggle_class(&mut self, class: CharClass) {
        let enabled = self.config.is_enabled(class);
        self.config.set_enabled(class, !enabled);
        self.refresh();
    }

    /// "Generate New": same config, fresh password. Focus lands on the
    /// password field when there is one. Config edits keep focus where it
    /// is, since focus is also the keyboard cursor.
    pub fn regenerate(&mut self) {
        self.refresh();
        if self.last_error.is_none() {
            self.focus = Control::Output;
        }
    }

    pub fn toggle_strength_visible(&mut self) {
        self.strength_visible = !self.strength_visible;
    }

    // ── Copy feedback ────────────────────────────────────────────────

    /// The password, if there is anything worth copying.
    pub fn copyable(&self) -> Option<&Password> {
        (!self.password.is_empty()).then_some(&self.password)
    }

    /// Record a successful copy and return its ticket.
    pub fn mark_copied(&mut self) -> u64 {
        self.copy_ticket += 1;
        self.copy_feedback = CopyFeedback::Copied {
            ticket: self.copy_ticket,
        };
        self.copy_ticket
    }

    /// Record a failed copy and return its ticket. The copied flag is
    /// cleared so a stale success never lingers next to a failure.
    pub fn mark_copy_failed(&mut self) -> u64 {
        self.copy_ticket += 1;
        self.copy_feedback = CopyFeedback::Failed {
            ticket: self.copy_ticket,
        };
        self.copy_ticket
    }

    /// Clear the feedback if `ticket` belongs to the latest copy.
    /// Returns whether anything was cleared.
    pub fn expire_copy_feedback(&mut self, ticket: u64) -> bool {
        let current = match self.copy_feedback {
            CopyFeedback::Copied { ticket } | CopyFeedback::Failed { ticket } => ticket,
            CopyFeedback::Idle => return false,
        };
        if current != ticket {
            return false;
        }
        self.copy_feedback = CopyFeedback::Idle;
        true
    }

    // ── Focus ────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn set_focus(&mut self, control: Control) {
        self.focus = control;
    }
}
