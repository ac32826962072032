//! The conversation ledger — an append-only record of the session.
//!
//! One exchange per processed query, error paths included. The ledger is
//! owned exclusively by the pipeline; nothing else mutates it.

use serde::{Deserialize, Serialize};

/// How many recent exchanges are rendered into prompt context.
pub const RECENT_HISTORY_LIMIT: usize = 5;

/// A single query/response pair. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub query: String,
    pub response: String,
}

/// Ordered, append-only record of the session's exchanges.
///
/// Invariant: `interaction_count == exchanges.len()` at all times. The count
/// only grows via [`append`](ConversationLedger::append) and resets to zero
/// only via [`clear`](ConversationLedger::clear), which empties both as a
/// unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLedger {
    exchanges: Vec<Exchange>,
    interaction_count: u32,
}

impl ConversationLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one exchange and bump the interaction counter.
    pub fn append(&mut self, query: impl Into<String>, response: impl Into<String>) {
        self.exchanges.push(Exchange {
            query: query.into(),
            response: response.into(),
        });
        self.interaction_count += 1;
    }

    /// Clear all exchanges and the counter as a unit.
    pub fn clear(&mut self) {
        self.exchanges.clear();
        self.interaction_count = 0;
    }

    /// Total number of processed interactions this session.
    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    /// Number of recorded exchanges. Always equals the interaction count.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// All exchanges, oldest first.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Render the last `limit` exchanges as numbered turns for prompt
    /// context.
    pub fn recent_history(&self, limit: usize) -> String {
        if self.exchanges.is_empty() {
            return "No previous conversation.".into();
        }

        let start = self.exchanges.len().saturating_sub(limit);
        let mut rendered = String::new();
        for (i, exchange) in self.exchanges[start..].iter().enumerate() {
            rendered.push_str(&format!(
                "Exchange {}:\nUser: {}\nAssistant: {}\n\n",
                i + 1,
                exchange.query,
                exchange.response
            ));
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_count_in_lockstep() {
        let mut ledger = ConversationLedger::new();
        for i in 0..4 {
            ledger.append(format!("q{i}"), format!("r{i}"));
            assert_eq!(ledger.interaction_count() as usize, ledger.len());
        }
        assert_eq!(ledger.interaction_count(), 4);
    }

    #[test]
    fn clear_resets_both_as_a_unit() {
        let mut ledger = ConversationLedger::new();
        ledger.append("q", "r");
        ledger.clear();
        assert_eq!(ledger.interaction_count(), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn empty_history_has_placeholder() {
        let ledger = ConversationLedger::new();
        assert_eq!(ledger.recent_history(5), "No previous conversation.");
    }

    #[test]
    fn recent_history_windows_to_last_n() {
        let mut ledger = ConversationLedger::new();
        for i in 0..8 {
            ledger.append(format!("q{i}"), format!("r{i}"));
        }
        let history = ledger.recent_history(5);
        assert!(!history.contains("q2"));
        assert!(history.contains("q3"));
        assert!(history.contains("q7"));
        // Numbering restarts at 1 within the window.
        assert!(history.contains("Exchange 1:\nUser: q3"));
        assert!(history.contains("Exchange 5:\nUser: q7"));
    }

    #[test]
    fn history_renders_numbered_turns() {
        let mut ledger = ConversationLedger::new();
        ledger.append("What are your skills?", "Leadership and cloud.");
        let history = ledger.recent_history(5);
        assert!(history.contains("Exchange 1:"));
        assert!(history.contains("User: What are your skills?"));
        assert!(history.contains("Assistant: Leadership and cloud."));
    }
}
