//! Memory card-match minigame.
//!
//! Sixteen face-down cards hold eight emoji pairs. The player flips two at a
//! time; a pair is compared once both are face-up and resolved after a short
//! pause (see [`MATCH_DELAY_MS`] / [`MISMATCH_DELAY_MS`]). The board itself is
//! timer-free: [`CardBoard::flip`] reports that a pair is pending and the flow
//! controller schedules [`CardBoard::resolve`] on the page's timer table.

use rand::Rng;
use rand::seq::SliceRandom;

/// Emoji faces; each appears on exactly two cards.
pub const EMOJIS: [&str; 8] = [
    "\u{1F382}", // 🎂
    "\u{1F381}", // 🎁
    "\u{1F388}", // 🎈
    "\u{1F389}", // 🎉
    "\u{1F38A}", // 🎊
    "\u{1F496}", // 💖
    "\u{1F339}", // 🌹
    "\u{1F370}", // 🍰
];

pub const PAIR_COUNT: usize = EMOJIS.len();
pub const CARD_COUNT: usize = PAIR_COUNT * 2;

/// Pause before a matching pair is locked in.
pub const MATCH_DELAY_MS: u64 = 500;
/// Pause before a mismatched pair is turned back over.
pub const MISMATCH_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub emoji: &'static str,
    pub flipped: bool,
    pub matched: bool,
}

/// Result of a flip click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored,
    /// First card of a pair is face-up.
    Flipped,
    /// Second card is face-up; schedule [`CardBoard::resolve`] after `delay_ms`.
    PairPending { matched: bool, delay_ms: u64 },
}

/// Result of resolving a pending pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched { completed: bool },
    Mismatched,
}

#[derive(Debug, Clone)]
pub struct CardBoard {
    cards: Vec<Card>,
    pending: Vec<usize>,
    matches: usize,
    moves: u32,
    started: bool,
    complete: bool,
}

impl CardBoard {
    /// Deal a fresh board, shuffled uniformly (Fisher–Yates) from `rng`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut faces: Vec<&'static str> = EMOJIS.iter().chain(EMOJIS.iter()).copied().collect();
        faces.shuffle(rng);
        Self::with_faces(faces)
    }

    /// Deal cards in the given order, without shuffling.
    pub fn with_faces(faces: Vec<&'static str>) -> Self {
        let cards = faces
            .into_iter()
            .map(|emoji| Card {
                emoji,
                flipped: false,
                matched: false,
            })
            .collect();
        Self {
            cards,
            pending: Vec::with_capacity(2),
            matches: 0,
            moves: 0,
            started: false,
            complete: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Skip is offered once the player has touched the board and the game is
    /// still running.
    pub fn can_skip(&self) -> bool {
        self.started && !self.complete
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.complete || self.pending.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return FlipOutcome::Ignored;
        };
        self.started = true;
        if card.flipped || card.matched {
            return FlipOutcome::Ignored;
        }

        card.flipped = true;
        self.pending.push(index);

        if self.pending.len() < 2 {
            return FlipOutcome::Flipped;
        }

        self.moves += 1;
        let matched = self.cards[self.pending[0]].emoji == self.cards[self.pending[1]].emoji;
        let delay_ms = if matched {
            MATCH_DELAY_MS
        } else {
            MISMATCH_DELAY_MS
        };
        FlipOutcome::PairPending { matched, delay_ms }
    }

    /// Settle the pending pair. `None` when no pair is waiting.
    pub fn resolve(&mut self) -> Option<Resolution> {
        if self.pending.len() != 2 {
            return None;
        }
        let (a, b) = (self.pending[0], self.pending[1]);
        self.pending.clear();

        if self.cards[a].emoji == self.cards[b].emoji {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
            self.matches += 1;
            if self.matches == PAIR_COUNT {
                self.complete = true;
            }
            Some(Resolution::Matched {
                completed: self.complete,
            })
        } else {
            self.cards[a].flipped = false;
            self.cards[b].flipped = false;
            Some(Resolution::Mismatched)
        }
    }
}
