use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Auto-play cadence for screens that advance themselves.
pub const AUTO_PLAY_INTERVAL_MS: u32 = 1500;

/// Delay before a staged visual reveal (the next digit block, a carry
/// bubble) appears after its step becomes current.
pub const REVEAL_DELAY_MS: u32 = 1000;

/// Audio cue the UI plays when the cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cue {
    Pop,
    Complete,
}

impl Cue {
    /// Asset name of the cue's sound file.
    pub fn asset(self) -> &'static str {
        match self {
            Cue::Pop => "pop",
            Cue::Complete => "complete",
        }
    }
}

/// Whether a screen can move backwards through its script. Most screens
/// only step forward; the long-division visualizer also supports
/// previous, auto-play, and restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Navigation {
    ForwardOnly,
    Full,
}

/// The presentation cursor over one step script: an index clamped to
/// `[0, len - 1]`, advancing monotonically until the last step marks the
/// lesson completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonCursor {
    current: usize,
    len: usize,
    navigation: Navigation,
    completed: bool,
}

impl LessonCursor {
    pub fn new(len: usize, navigation: Navigation) -> Result<Self> {
        if len == 0 {
            bail!("A lesson needs at least one step.");
        }
        Ok(Self {
            current: 0,
            len,
            navigation,
            completed: len == 1,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn navigation(&self) -> Navigation {
        self.navigation
    }

    /// Moves to the next step. Returns the cue to play, or `None` when
    /// already on the last step (the index never leaves the script).
    pub fn advance(&mut self) -> Option<Cue> {
        if self.current + 1 >= self.len {
            return None;
        }
        self.current += 1;
        if self.current == self.len - 1 {
            self.completed = true;
            Some(Cue::Complete)
        } else {
            Some(Cue::Pop)
        }
    }

    /// Moves back one step. Only full-navigation screens may go back;
    /// returns false when the move is not allowed or already at the
    /// start.
    pub fn back(&mut self) -> bool {
        if self.navigation != Navigation::Full || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.completed = false;
        true
    }

    /// Rewinds to the first step. Only full-navigation screens restart;
    /// forward-only screens get a new problem instead.
    pub fn restart(&mut self) -> bool {
        if self.navigation != Navigation::Full {
            return false;
        }
        self.current = 0;
        self.completed = self.len == 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_requires_a_nonempty_script() {
        assert!(LessonCursor::new(0, Navigation::ForwardOnly).is_err());
    }

    #[test]
    fn advance_walks_to_completion_with_cues() {
        let mut cursor = LessonCursor::new(3, Navigation::ForwardOnly).expect("cursor");
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_complete());
        assert_eq!(cursor.advance(), Some(Cue::Pop));
        assert_eq!(cursor.advance(), Some(Cue::Complete));
        assert!(cursor.is_complete());
        assert_eq!(cursor.current(), 2);
    }

    #[test]
    fn advance_clamps_at_the_last_step() {
        let mut cursor = LessonCursor::new(2, Navigation::ForwardOnly).expect("cursor");
        assert_eq!(cursor.advance(), Some(Cue::Complete));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.current(), 1);
        assert!(cursor.is_complete());
    }

    #[test]
    fn forward_only_screens_cannot_go_back_or_restart() {
        let mut cursor = LessonCursor::new(3, Navigation::ForwardOnly).expect("cursor");
        cursor.advance();
        assert!(!cursor.back());
        assert!(!cursor.restart());
        assert_eq!(cursor.current(), 1);
    }

    #[test]
    fn full_navigation_goes_back_and_uncompletes() {
        let mut cursor = LessonCursor::new(3, Navigation::Full).expect("cursor");
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_complete());
        assert!(cursor.back());
        assert!(!cursor.is_complete());
        assert_eq!(cursor.current(), 1);
        assert!(cursor.back());
        assert!(!cursor.back(), "cannot back off the first step");
    }

    #[test]
    fn full_navigation_restarts_to_the_first_step() {
        let mut cursor = LessonCursor::new(4, Navigation::Full).expect("cursor");
        cursor.advance();
        cursor.advance();
        assert!(cursor.restart());
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_complete());
    }

    #[test]
    fn single_step_script_is_complete_immediately() {
        let cursor = LessonCursor::new(1, Navigation::ForwardOnly).expect("cursor");
        assert!(cursor.is_complete());
    }

    #[test]
    fn cue_assets_name_the_sound_files() {
        assert_eq!(Cue::Pop.asset(), "pop");
        assert_eq!(Cue::Complete.asset(), "complete");
    }
}
