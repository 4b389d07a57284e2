//! Clue-reveal minigame ("detective mode").
//!
//! Five sealed clues are scattered over the screen. Clicking one reveals its
//! note. Once every clue has been revealed the board reports completion,
//! exactly once; the flow controller turns that into a success cue and a
//! delayed move to the letter.

/// Number of clues on the board.
pub const CLUE_COUNT: usize = 5;

/// Delay between completion and the automatic move to the letter.
pub const ADVANCE_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Percent of viewport width.
    pub x: u8,
    /// Percent of viewport height.
    pub y: u8,
}

#[derive(Debug, Clone)]
pub struct Clue {
    pub id: u32,
    pub text: &'static str,
    pub revealed: bool,
    pub position: Position,
}

const CLUES: [(&str, u8, u8); CLUE_COUNT] = [
    ("You make ordinary days feel like holidays", 12, 22),
    ("Your laugh is the best sound in any room", 72, 28),
    ("You notice the small things nobody else does", 22, 72),
    ("Your kindness reaches further than you know", 76, 74),
    ("You deserve every bit of happiness today", 50, 50),
];

/// What a reveal click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Id is not on the board.
    Unknown,
    /// Clue was already open; only the cue replays.
    AlreadyRevealed,
    Revealed,
    /// This reveal opened the last sealed clue.
    Completed,
}

#[derive(Debug, Clone)]
pub struct ClueBoard {
    clues: Vec<Clue>,
    revealed: usize,
    complete: bool,
}

impl Default for ClueBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClueBoard {
    pub fn new() -> Self {
        let clues = CLUES
            .iter()
            .enumerate()
            .map(|(i, &(text, x, y))| Clue {
                id: i as u32 + 1,
                text,
                revealed: false,
                position: Position { x, y },
            })
            .collect();
        Self {
            clues,
            revealed: 0,
            complete: false,
        }
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn reveal(&mut self, id: u32) -> RevealOutcome {
        let Some(clue) = self.clues.iter_mut().find(|c| c.id == id) else {
            return RevealOutcome::Unknown;
        };
        if clue.revealed {
            return RevealOutcome::AlreadyRevealed;
        }
        clue.revealed = true;
        self.revealed += 1;

        if self.revealed == CLUE_COUNT && !self.complete {
            self.complete = true;
            RevealOutcome::Completed
        } else {
            RevealOutcome::Revealed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_sealed() {
        let board = ClueBoard::new();
        assert_eq!(board.clues().len(), CLUE_COUNT);
        assert!(board.clues().iter().all(|c| !c.revealed));
        assert_eq!(board.revealed_count(), 0);
        assert!(!board.is_complete());
    }

    #[test]
    fn counter_tracks_distinct_reveals() {
        let mut board = ClueBoard::new();
        assert_eq!(board.reveal(2), RevealOutcome::Revealed);
        assert_eq!(board.reveal(2), RevealOutcome::AlreadyRevealed);
        assert_eq!(board.reveal(4), RevealOutcome::Revealed);
        assert_eq!(board.reveal(2), RevealOutcome::AlreadyRevealed);
        assert_eq!(board.revealed_count(), 2);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut board = ClueBoard::new();
        assert_eq!(board.reveal(0), RevealOutcome::Unknown);
        assert_eq!(board.reveal(99), RevealOutcome::Unknown);
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn completes_exactly_once_after_all_five() {
        let mut board = ClueBoard::new();
        let mut completions = 0;
        for id in [1, 3, 3, 5, 2, 1, 4, 4, 5] {
            if board.reveal(id) == RevealOutcome::Completed {
                completions += 1;
                assert_eq!(board.revealed_count(), CLUE_COUNT);
            }
        }
        assert_eq!(completions, 1);
        assert!(board.is_complete());
    }

    #[test]
    fn not_complete_before_last_clue() {
        let mut board = ClueBoard::new();
        for id in 1..=4 {
            board.reveal(id);
        }
        assert!(!board.is_complete());
    }
}
