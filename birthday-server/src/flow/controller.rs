//! Page-flow controller: Landing → Loading → Minigame → Letter.
//!
//! Owns the current page, that page's transient session, the page's timer
//! table, the effects handle, and the random source. Entering a page builds
//! a fresh session and schedules its timers; leaving a page cancels every
//! timer it owned before anything else happens.

use rand::Rng;

use crate::config::SiteConfig;
use crate::effects::{Cue, Effects};
use crate::flow::letter::{self, LetterStage};
use crate::flow::loading::{self, LoadingProgress};
use crate::flow::page::Page;
use crate::flow::timers::{TimerId, Timers};
use crate::game::card_match::{CardBoard, FlipOutcome, Resolution};
use crate::game::detective::{self, ClueBoard, RevealOutcome};

/// Deferred work a page can put on its timer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    LoadingTick,
    Navigate(Page),
    ResolvePair,
    PlayCue(Cue),
    ShowLetterContent,
    ShowStartOver,
    ReopenLetter,
}

/// Transient state of the current page. Dropped on navigation.
#[derive(Debug, Clone)]
pub enum Session {
    Landing,
    Loading {
        bar: LoadingProgress,
        ticker: TimerId,
    },
    Detective(ClueBoard),
    Game(CardBoard),
    Letter(LetterStage),
}

pub struct FlowController<E: Effects, R: Rng> {
    config: SiteConfig,
    page: Page,
    session: Session,
    timers: Timers<TimerAction>,
    effects: E,
    rng: R,
}

impl<E: Effects, R: Rng> FlowController<E, R> {
    /// Start on the landing page.
    pub fn new(config: SiteConfig, effects: E, rng: R) -> Self {
        Self {
            config,
            page: Page::Landing,
            session: Session::Landing,
            timers: Timers::new(),
            effects,
            rng,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect from the next page entered.
    pub fn set_config(&mut self, config: SiteConfig) {
        self.config = config;
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    pub fn timers(&self) -> &Timers<TimerAction> {
        &self.timers
    }

    // ── Navigation ─────────────────────────────────────────────────

    /// Move to `target`. Never fails; re-entering any page is allowed.
    pub fn advance(&mut self, target: Page) {
        self.timers.cancel_all();
        log::info!("navigate {} -> {}", self.page.name(), target.name());
        self.page = target;
        self.session = self.enter(target);
        self.cue(Cue::Reveal);
    }

    /// Landing page "start" button.
    pub fn start(&mut self) -> bool {
        if self.page != Page::Landing {
            return false;
        }
        self.advance(Page::Loading);
        true
    }

    fn enter(&mut self, page: Page) -> Session {
        match page {
            Page::Landing => Session::Landing,
            Page::Loading => {
                let cadence = self.config.loading;
                let ticker = self
                    .timers
                    .schedule_every(cadence.interval_ms(), TimerAction::LoadingTick);
                Session::Loading {
                    bar: LoadingProgress::new(cadence),
                    ticker,
                }
            }
            Page::Detective => Session::Detective(ClueBoard::new()),
            Page::Game => Session::Game(CardBoard::new(&mut self.rng)),
            Page::Letter => {
                self.timers
                    .schedule(letter::OPEN_CUE_DELAY_MS, TimerAction::PlayCue(Cue::Reveal));
                self.timers
                    .schedule(letter::CONTENT_DELAY_MS, TimerAction::ShowLetterContent);
                Session::Letter(LetterStage::opened())
            }
        }
    }

    // ── Clock ──────────────────────────────────────────────────────

    /// Advance the page clock by `elapsed_ms`, firing due timers in order.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let until = self.timers.now().saturating_add(elapsed_ms);
        while let Some(action) = self.timers.pop_due(until) {
            log::trace!("timer fired at {}ms: {:?}", self.timers.now(), action);
            self.fire(action);
        }
        self.timers.settle(until);
    }

    fn fire(&mut self, action: TimerAction) {
        match action {
            TimerAction::LoadingTick => {
                let Session::Loading { bar, ticker } = &mut self.session else {
                    return;
                };
                if bar.tick(&mut self.rng) {
                    self.timers.cancel(*ticker);
                    let next = self.config.minigame.page();
                    self.timers
                        .schedule(loading::ADVANCE_DELAY_MS, TimerAction::Navigate(next));
                }
            }
            TimerAction::Navigate(page) => self.advance(page),
            TimerAction::ResolvePair => {
                let Session::Game(board) = &mut self.session else {
                    return;
                };
                match board.resolve() {
                    Some(Resolution::Matched { completed }) => {
                        self.cue(Cue::Reveal);
                        if completed {
                            self.cue(Cue::Success);
                        }
                    }
                    Some(Resolution::Mismatched) | None => {}
                }
            }
            TimerAction::PlayCue(cue) => self.cue(cue),
            TimerAction::ShowLetterContent => {
                if let Session::Letter(stage) = &mut self.session {
                    if stage.open {
                        stage.content_visible = true;
                        self.cue(Cue::MusicStart);
                    }
                }
            }
            TimerAction::ShowStartOver => {
                if let Session::Letter(stage) = &mut self.session {
                    stage.start_over_visible = true;
                }
            }
            TimerAction::ReopenLetter => {
                if let Session::Letter(stage) = &mut self.session {
                    stage.open = true;
                    self.cue(Cue::Reveal);
                    self.timers
                        .schedule(letter::CONTENT_DELAY_MS, TimerAction::ShowLetterContent);
                }
            }
        }
    }

    // ── Detective ──────────────────────────────────────────────────

    pub fn reveal_clue(&mut self, id: u32) -> RevealOutcome {
        let Session::Detective(board) = &mut self.session else {
            return RevealOutcome::Unknown;
        };
        let outcome = board.reveal(id);
        match outcome {
            RevealOutcome::Unknown => {}
            RevealOutcome::Revealed | RevealOutcome::AlreadyRevealed => self.cue(Cue::Reveal),
            RevealOutcome::Completed => {
                self.cue(Cue::Reveal);
                self.cue(Cue::Success);
                self.timers.schedule(
                    detective::ADVANCE_DELAY_MS,
                    TimerAction::Navigate(Page::Letter),
                );
            }
        }
        outcome
    }

    // ── Card match ─────────────────────────────────────────────────

    pub fn flip_card(&mut self, index: usize) -> FlipOutcome {
        let Session::Game(board) = &mut self.session else {
            return FlipOutcome::Ignored;
        };
        let outcome = board.flip(index);
        match outcome {
            FlipOutcome::Ignored => {}
            FlipOutcome::Flipped => self.cue(Cue::Reveal),
            FlipOutcome::PairPending { delay_ms, .. } => {
                self.cue(Cue::Reveal);
                self.timers.schedule(delay_ms, TimerAction::ResolvePair);
            }
        }
        outcome
    }

    /// "Continue" once all pairs are matched.
    pub fn continue_game(&mut self) -> bool {
        if !matches!(&self.session, Session::Game(board) if board.is_complete()) {
            return false;
        }
        self.advance(Page::Letter);
        true
    }

    /// Bail out of the card game straight to the letter.
    pub fn skip_game(&mut self) -> bool {
        if !matches!(&self.session, Session::Game(board) if board.can_skip()) {
            return false;
        }
        self.advance(Page::Letter);
        true
    }

    // ── Letter ─────────────────────────────────────────────────────

    pub fn celebrate(&mut self) -> bool {
        let Session::Letter(stage) = &mut self.session else {
            return false;
        };
        if !stage.content_visible || stage.celebrating {
            return false;
        }
        stage.celebrating = true;
        self.cue(Cue::Celebrate);
        self.timers
            .schedule(letter::START_OVER_DELAY_MS, TimerAction::ShowStartOver);
        true
    }

    pub fn start_over(&mut self) -> bool {
        let Session::Letter(stage) = &mut self.session else {
            return false;
        };
        if !stage.start_over_visible {
            return false;
        }
        stage.close();
        self.timers.cancel_all();
        self.cue(Cue::MusicStop);
        self.timers
            .schedule(letter::REOPEN_DELAY_MS, TimerAction::ReopenLetter);
        true
    }

    // ── Effects ────────────────────────────────────────────────────

    /// Best-effort cue playback; failures never reach the page flow.
    fn cue(&mut self, cue: Cue) {
        if let Err(e) = self.effects.play(cue) {
            log::debug!("cue {} dropped: {}", cue.name(), e);
        }
    }
}
