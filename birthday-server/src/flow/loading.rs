//! Simulated loading bar between the landing screen and the minigame.

use rand::Rng;

use crate::config::LoadingCadence;

/// Pause between reaching 100% and moving on.
pub const ADVANCE_DELAY_MS: u64 = 500;

pub const RANDOM_STEP_MIN: u32 = 2;
pub const RANDOM_STEP_MAX: u32 = 30;
pub const FIXED_STEP: u32 = 2;

#[derive(Debug, Clone)]
pub struct LoadingProgress {
    cadence: LoadingCadence,
    progress: u32,
}

impl LoadingProgress {
    pub fn new(cadence: LoadingCadence) -> Self {
        Self {
            cadence,
            progress: 0,
        }
    }

    /// Progress in percent, 0..=100.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn is_done(&self) -> bool {
        self.progress >= 100
    }

    /// Apply one interval tick. Returns true on the tick that reaches 100.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_done() {
            return false;
        }
        let step = match self.cadence {
            LoadingCadence::Random => rng.gen_range(RANDOM_STEP_MIN..=RANDOM_STEP_MAX),
            LoadingCadence::Fixed => FIXED_STEP,
        };
        self.progress = (self.progress + step).min(100);
        self.is_done()
    }
}
