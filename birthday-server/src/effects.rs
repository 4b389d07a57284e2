//! Audio/visual cue service.
//!
//! Pages never reach for a global sound player; the flow controller owns an
//! [`Effects`] handle and passes cues through it. Playback is best-effort:
//! the controller logs and drops any error, and the browser side wraps
//! `play()` in a `.catch` because autoplay may be blocked.

/// One-shot cues the pages can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Reveal,
    Success,
    Celebrate,
    MusicStart,
    MusicStop,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Reveal => "reveal",
            Cue::Success => "success",
            Cue::Celebrate => "celebrate",
            Cue::MusicStart => "music_start",
            Cue::MusicStop => "music_stop",
        }
    }
}

/// Cue playback handle.
pub trait Effects {
    fn play(&mut self, cue: Cue) -> Result<(), String>;

    /// Flip mute on or off. Returns the new muted state.
    fn toggle_mute(&mut self) -> bool;

    fn is_muted(&self) -> bool;
}

/// Browser effects: cues are queued as script calls and flushed into the
/// next HTML fragment the worker returns.
#[derive(Debug, Default)]
pub struct ScriptEffects {
    muted: bool,
    queued: Vec<Cue>,
}

impl ScriptEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued cues as a `<script>` block (empty when none).
    pub fn drain_script(&mut self) -> String {
        if self.queued.is_empty() {
            return String::new();
        }
        let mut js = String::from("<script>");
        for cue in self.queued.drain(..) {
            js.push_str(&format!(
                "Promise.resolve(window.birthdayEffects && window.birthdayEffects.play('{}')).catch(function(){{}});",
                cue.name()
            ));
        }
        js.push_str("</script>");
        js
    }
}

impl Effects for ScriptEffects {
    fn play(&mut self, cue: Cue) -> Result<(), String> {
        // Stopping music is still honoured while muted.
        if self.muted && cue != Cue::MusicStop {
            return Ok(());
        }
        self.queued.push(cue);
        Ok(())
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.queued.retain(|c| *c == Cue::MusicStop);
        }
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Records cues in order so tests can assert what a page played.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingEffects {
    pub played: Vec<Cue>,
    /// When set, every `play` call fails after recording the attempt.
    pub fail: bool,
    muted: bool,
}

#[cfg(test)]
impl RecordingEffects {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

#[cfg(test)]
impl Effects for RecordingEffects {
    fn play(&mut self, cue: Cue) -> Result<(), String> {
        self.played.push(cue);
        if self.fail {
            Err(format!("playback of {} blocked", cue.name()))
        } else {
            Ok(())
        }
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
