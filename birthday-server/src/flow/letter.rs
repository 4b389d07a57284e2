//! Letter page stages: envelope opens, content fades in, celebration,
//! and "read it again".

/// Delay before the opening reveal cue.
pub const OPEN_CUE_DELAY_MS: u64 = 500;
/// Delay between the envelope opening and the content (plus music) showing.
pub const CONTENT_DELAY_MS: u64 = 1000;
/// Delay between celebrating and offering "start over".
pub const START_OVER_DELAY_MS: u64 = 4000;
/// Delay between closing and reopening on "start over".
pub const REOPEN_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterStage {
    pub open: bool,
    pub content_visible: bool,
    pub celebrating: bool,
    pub start_over_visible: bool,
}

impl LetterStage {
    /// A freshly entered letter is open with its content still hidden.
    pub fn opened() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    /// Close everything down ahead of a reopen.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Letter body, one entry per paragraph. Empty strings are spacers.
pub fn letter_lines(recipient: &str, sender: &str) -> Vec<(String, bool)> {
    vec![
        (format!("Dear {},", recipient), true),
        (String::new(), false),
        (
            "Some people fill a room with noise. You fill it with something quieter and better, and everyone leaves a little lighter for it.".to_string(),
            false,
        ),
        (String::new(), false),
        (
            "Thank you for the long talks, the small kindnesses you never mention, and the way you remember what matters to other people.".to_string(),
            false,
        ),
        (
            "I hope this year is gentle with you, bold where you want it to be, and full of the people who make you laugh.".to_string(),
            false,
        ),
        (String::new(), false),
        ("Happy birthday. Keep being exactly you.".to_string(), false),
        (String::new(), false),
        (format!("With love, {}", sender), true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_resets_every_stage() {
        let mut stage = LetterStage {
            open: true,
            content_visible: true,
            celebrating: true,
            start_over_visible: true,
        };
        stage.close();
        assert_eq!(stage, LetterStage::default());
        assert!(LetterStage::opened().open);
    }

    #[test]
    fn lines_greet_and_sign() {
        let lines = letter_lines("Ada", "Grace");
        assert_eq!(lines.first(), Some(&("Dear Ada,".to_string(), true)));
        assert_eq!(lines.last(), Some(&("With love, Grace".to_string(), true)));
        assert!(lines.iter().filter(|(_, heading)| *heading).count() == 2);
    }
}
