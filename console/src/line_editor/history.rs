// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

/// Session history of submitted lines, oldest first.
///
/// The cursor counts steps back from the newest entry: `0` means "not browsing", `1`
/// is the newest entry, `entries.len()` is the oldest. When browsing starts, the tail
/// the user was typing is staged so that navigating forward past the newest entry
/// brings it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    cursor: usize,
    staged_line: String,
    max_size: Option<usize>,
}

impl History {
    /// `None` keeps every entry for the session.
    #[must_use]
    pub fn new(max_size: Option<usize>) -> Self {
        Self {
            max_size,
            ..Default::default()
        }
    }

    /// Record a submitted line. Empty lines are never recorded; repeats are.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            return;
        }

        self.entries.push_back(line);

        // Drop the oldest entries beyond the limit.
        if let Some(max_size) = self.max_size {
            while self.entries.len() > max_size {
                self.entries.pop_front();
            }
        }
    }

    /// Step to the next older entry. Returns the line to show, or `None` when already
    /// at the oldest entry (or there is no history at all).
    pub fn navigate_older(&mut self, current_tail: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }

        if self.cursor == 0 {
            self.staged_line = current_tail.to_string();
        }

        if self.cursor < self.entries.len() {
            self.cursor += 1;
            Some(self.current_line())
        } else {
            None
        }
    }

    /// Step to the next newer entry. Stepping past the newest entry returns the staged
    /// line. Returns `None` when not browsing.
    pub fn navigate_newer(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        Some(self.current_line())
    }

    /// Stop browsing.
    pub fn reset_cursor(&mut self) { self.cursor = 0; }

    #[must_use]
    pub fn entries(&self) -> &VecDeque<String> { &self.entries }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn staged_line(&self) -> &str { &self.staged_line }

    fn current_line(&self) -> &str {
        match self.cursor {
            0 => &self.staged_line,
            steps_back => &self.entries[self.entries.len() - steps_back],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history_with(lines: &[&str]) -> History {
        let mut history = History::new(None);
        for line in lines {
            history.push(*line);
        }
        history
    }

    #[test]
    fn test_push_skips_empty_keeps_repeats() {
        let history = history_with(&["a", "", "a", "b"]);
        assert_eq!(history.entries(), &VecDeque::from(vec![
            "a".to_string(),
            "a".to_string(),
            "b".to_string()
        ]));
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut history = History::new(Some(2));
        history.push("one");
        history.push("two");
        history.push("three");
        assert_eq!(history.entries(), &VecDeque::from(vec![
            "two".to_string(),
            "three".to_string()
        ]));
    }

    #[test]
    fn test_navigate_older_stops_at_oldest() {
        let mut history = history_with(&["a", "b"]);

        assert_eq!(history.navigate_older("x"), Some("b"));
        assert_eq!(history.navigate_older("b"), Some("a"));
        assert_eq!(history.navigate_older("a"), None);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.staged_line(), "x");
    }

    #[test]
    fn test_navigate_newer_restores_staged_line() {
        let mut history = history_with(&["a", "b"]);
        history.navigate_older("draft");
        history.navigate_older("b");

        assert_eq!(history.navigate_newer(), Some("b"));
        assert_eq!(history.navigate_newer(), Some("draft"));
        assert_eq!(history.navigate_newer(), None);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::new(None);
        assert_eq!(history.navigate_older("x"), None);
        assert_eq!(history.navigate_newer(), None);
        assert_eq!(history.staged_line(), "");
    }
}
