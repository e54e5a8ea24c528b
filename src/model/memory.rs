use serde::{Deserialize, Serialize};

/// One player input and the narrator's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub input: String,
    pub output: String,
}

/// Ordered log of turns since the last template change or load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationMemory {
    turns: Vec<Turn>,
}

impl ConversationMemory {
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn record(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.turns.push(Turn {
            input: input.into(),
            output: output.into(),
        });
    }

    /// History as the narrator sees it.
    pub fn snapshot(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("Human: {}\nAI: {}", t.input, t.output))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drops the most recent turn. `None` means there was nothing to undo.
    pub fn undo(&mut self) -> Option<Turn> {
        self.turns.pop()
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_renders_turns_in_order() {
        let mut memory = ConversationMemory::default();
        assert_eq!(memory.snapshot(), "");

        memory.record("look around", "You see trees.");
        memory.record("go north", "A castle looms.");

        assert_eq!(
            memory.snapshot(),
            "Human: look around\nAI: You see trees.\nHuman: go north\nAI: A castle looms."
        );
    }

    #[test]
    fn undo_on_empty_is_noop() {
        let mut memory = ConversationMemory::default();
        assert!(memory.undo().is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn undo_removes_only_latest_turn() {
        let mut memory = ConversationMemory::default();
        memory.record("a", "1");
        memory.record("b", "2");

        let undone = memory.undo().unwrap();
        assert_eq!(undone.input, "b");
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.turns()[0].input, "a");
    }

    #[test]
    fn reset_clears() {
        let mut memory = ConversationMemory::default();
        memory.record("a", "1");
        memory.reset();
        assert!(memory.is_empty());
    }
}
