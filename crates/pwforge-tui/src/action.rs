//! All possible UI actions. Actions are the sole mechanism for state mutation.

use pwforge_core::CharClass;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,

    // ── Focus ─────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Activate whatever control holds focus (Space / Enter / click).
    ActivateFocused,

    // ── Generator inputs ──────────────────────────────────────────
    IncreaseLength,
    DecreaseLength,
    SetLength(usize),
    ToggleClass(CharClass),
    Regenerate,

    // ── Output ────────────────────────────────────────────────────
    Copy,
    /// Auto-clear for the copy confirmation, tagged with the ticket of
    /// the copy that scheduled it.
    CopyFeedbackExpired(u64),
    ToggleStrengthDetail,
}
