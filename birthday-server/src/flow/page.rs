//! The fixed set of pages a visitor can be on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Landing,
    Loading,
    Detective,
    Game,
    Letter,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Landing,
        Page::Loading,
        Page::Detective,
        Page::Game,
        Page::Letter,
    ];

    /// Short name used in form bodies (`page=detective`).
    pub fn name(self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Loading => "loading",
            Page::Detective => "detective",
            Page::Game => "game",
            Page::Letter => "letter",
        }
    }

    /// Browser path pushed into history when this page becomes current.
    pub fn path(self) -> &'static str {
        match self {
            Page::Landing => "/",
            Page::Loading => "/loading",
            Page::Detective => "/detective",
            Page::Game => "/game",
            Page::Letter => "/letter",
        }
    }

    pub fn parse(s: &str) -> Option<Page> {
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
    }
}
