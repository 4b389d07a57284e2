//! Site configuration: who the site is for and which flow it runs.
//!
//! Defaults are compiled in; the page can replace them once at start-up via
//! the exported `configure(json)`. Every field is optional in the JSON.

use serde::{Deserialize, Serialize};

use crate::flow::page::Page;

/// Which minigame fills the slot between loading and the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinigameChoice {
    Detective,
    CardMatch,
}

impl MinigameChoice {
    pub fn page(self) -> Page {
        match self {
            MinigameChoice::Detective => Page::Detective,
            MinigameChoice::CardMatch => Page::Game,
        }
    }
}

/// Loading bar cadence. Purely cosmetic; both end at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingCadence {
    /// Random step of 2..=30 every 300 ms.
    Random,
    /// Step of 2 every 80 ms.
    Fixed,
}

impl LoadingCadence {
    pub fn interval_ms(self) -> u64 {
        match self {
            LoadingCadence::Random => 300,
            LoadingCadence::Fixed => 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub recipient: String,
    pub sender: String,
    pub minigame: MinigameChoice,
    pub loading: LoadingCadence,
    /// Also send each new journal note to the feedback log service.
    pub mirror_to_log: bool,
    pub feedback_endpoint: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            recipient: "Birthday Star".to_string(),
            sender: "A Friend".to_string(),
            minigame: MinigameChoice::Detective,
            loading: LoadingCadence::Random,
            mirror_to_log: false,
            feedback_endpoint: "/api/feedback".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid site config JSON: {}", e))
    }
}
