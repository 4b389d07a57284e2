//! Page-owned timer table.
//!
//! Every delayed action a page needs (loading ticks, pair resolution,
//! auto-advance, letter staging) is an entry in this table instead of a
//! free-floating `setTimeout`. The JS bridge drives the virtual clock via
//! `POST /api/flow/tick`; leaving a page calls [`Timers::cancel_all`], so a
//! stale callback can never fire against the next page.

/// Handle returned by [`Timers::schedule`], usable to cancel one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<A> {
    id: TimerId,
    due_at: u64,
    /// `Some(ms)` for repeating entries (intervals).
    period: Option<u64>,
    action: A,
}

/// Table of `{id, due time, action, period}` entries on a millisecond clock.
#[derive(Debug, Clone)]
pub struct Timers<A> {
    now: u64,
    next_id: u64,
    entries: Vec<Entry<A>>,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<A: Clone> Timers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule a one-shot action `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, action: A) -> TimerId {
        self.insert(delay_ms, None, action)
    }

    /// Schedule a repeating action every `period_ms`, first firing one
    /// period from now. A zero period is bumped to 1 ms.
    pub fn schedule_every(&mut self, period_ms: u64, action: A) -> TimerId {
        let period = period_ms.max(1);
        self.insert(period, Some(period), action)
    }

    fn insert(&mut self, delay_ms: u64, period: Option<u64>, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_at: self.now.saturating_add(delay_ms),
            period,
            action,
        });
        id
    }

    /// Cancel one entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every pending entry (page teardown).
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Pop the earliest entry due at or before `until`, moving the clock to
    /// its due time. Ties fire in scheduling order. Repeating entries are
    /// re-armed one period later.
    ///
    /// Callers loop on this so that actions scheduled while handling a
    /// fired entry are measured from that entry's due time.
    pub fn pop_due(&mut self, until: u64) -> Option<A> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_at <= until)
            .min_by_key(|(_, e)| (e.due_at, e.id.0))
            .map(|(i, _)| i)?;

        let due_at = self.entries[idx].due_at;
        self.now = self.now.max(due_at);

        match self.entries[idx].period {
            Some(period) => {
                let entry = &mut self.entries[idx];
                entry.due_at = due_at.saturating_add(period);
                Some(entry.action.clone())
            }
            None => Some(self.entries.remove(idx).action),
        }
    }

    /// Move the clock forward to `until` once all due entries are drained.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
