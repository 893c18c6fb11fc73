//! Per-level session state shared by gameplay systems

/// State of one play-through of a level.
///
/// Passed by reference to every system that needs it; there is no global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    key_collected: bool,
    level_index: usize,
    attempts: u32,
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a fresh start of `level_index`.
    pub fn begin(&mut self, level_index: usize) {
        if self.level_index == level_index {
            self.attempts += 1;
        } else {
            self.level_index = level_index;
            self.attempts = 1;
        }
        self.key_collected = false;
        log::debug!(
            "session begin: level {} attempt {}",
            self.level_index,
            self.attempts
        );
    }

    /// Record that the key was picked up. Prisoners start escaping and
    /// guards start watching for them.
    pub fn collect_key(&mut self) {
        self.key_collected = true;
    }

    #[must_use]
    pub fn key_collected(&self) -> bool {
        self.key_collected
    }

    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// How many times the current level has been started.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_resets_key() {
        let mut session = GameSession::new();
        session.begin(0);
        session.collect_key();
        assert!(session.key_collected());

        session.begin(0);
        assert!(!session.key_collected());
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn test_new_level_resets_attempts() {
        let mut session = GameSession::new();
        session.begin(0);
        session.begin(0);
        session.begin(1);
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.attempts(), 1);
    }
}
