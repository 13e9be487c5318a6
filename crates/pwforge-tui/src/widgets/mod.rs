//! Small reusable rendering helpers for the generator screen.

pub mod length_gauge;
pub mod strength_badge;
pub mod toggle;
