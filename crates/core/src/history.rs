/// Default number of prior turns kept when a new exchange is recorded
pub const DEFAULT_RETAIN: usize = 4;

/// Bounded rolling log of prior turns, sent to the backend for context.
///
/// Turns are plain strings with `USER:` / `ASSISTANT:` prefixes. Before a
/// new exchange is appended the log is truncated to the last `retain`
/// entries, so after append the window holds at most `retain + 2` turns.
/// Failed exchanges are never recorded.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    turns: Vec<String>,
    retain: usize,
}

impl HistoryWindow {
    pub fn new(retain: usize) -> Self {
        Self { turns: Vec::new(), retain }
    }

    pub fn turns(&self) -> &[String] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Window contents oldest to newest, as sent in the outbound request
    pub fn snapshot(&self) -> Vec<String> {
        self.turns.clone()
    }

    /// Record a settled exchange: truncate to the last `retain` turns,
    /// then append the new `USER:` / `ASSISTANT:` pair.
    pub fn record_exchange(&mut self, user: &str, assistant: &str) {
        if self.turns.len() > self.retain {
            self.turns.drain(..self.turns.len() - self.retain);
        }
        self.turns.push(format!("USER: {}", user));
        self.turns.push(format!("ASSISTANT: {}", assistant));
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_RETAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_exchange_prefixes_turns() {
        let mut history = HistoryWindow::default();
        history.record_exchange("hello", "hi there");

        assert_eq!(history.turns(), &["USER: hello", "ASSISTANT: hi there"]);
    }

    #[test]
    fn test_default_window_caps_at_six_turns() {
        let mut history = HistoryWindow::default();
        for i in 0..5 {
            history.record_exchange(&format!("q{}", i), &format!("a{}", i));
        }

        assert_eq!(history.len(), 6);
        assert_eq!(history.turns()[0], "USER: q2");
        assert_eq!(history.turns()[5], "ASSISTANT: a4");
    }

    #[test]
    fn test_retain_two_keeps_last_two_exchanges() {
        let mut history = HistoryWindow::new(2);
        for i in 0..3 {
            history.record_exchange(&format!("q{}", i), &format!("a{}", i));
        }

        assert_eq!(history.len(), 4);
        assert_eq!(
            history.turns(),
            &["USER: q1", "ASSISTANT: a1", "USER: q2", "ASSISTANT: a2"]
        );
    }

    #[test]
    fn test_snapshot_is_ordered_oldest_first() {
        let mut history = HistoryWindow::default();
        history.record_exchange("first", "one");
        history.record_exchange("second", "two");

        let snapshot = history.snapshot();
        assert_eq!(snapshot[0], "USER: first");
        assert_eq!(snapshot[3], "ASSISTANT: two");
    }

    #[test]
    fn test_retain_zero_keeps_only_latest_pair() {
        let mut history = HistoryWindow::new(0);
        history.record_exchange("q0", "a0");
        history.record_exchange("q1", "a1");

        assert_eq!(history.turns(), &["USER: q1", "ASSISTANT: a1"]);
    }
}
