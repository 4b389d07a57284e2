//! Minigames and the in-memory site state that hosts them.
//!
//! Boards are plain state machines with no timers of their own; the flow
//! controller schedules their delayed steps.

pub mod card_match;
pub mod detective;
pub mod state;
