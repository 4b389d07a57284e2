//! Route handlers. Each returns an HTML fragment for HTMX to swap in.

pub mod detective;
pub mod effects;
pub mod flow;
pub mod game;
pub mod journal;
pub mod letter;
pub mod util;
