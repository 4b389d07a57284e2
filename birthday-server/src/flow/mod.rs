//! Page flow: which page is current, what it owns, and when it moves on.
//!
//! Every page's delayed behavior runs off the page-owned timer table in
//! `timers`, driven by the JS bridge through `POST /api/flow/tick`.

pub mod controller;
pub mod letter;
pub mod loading;
pub mod page;
pub mod timers;
