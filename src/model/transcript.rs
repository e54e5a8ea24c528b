use crate::model::catalog::Mode;

/// The scrolling story text, plus the byte offset where each recorded
/// turn starts so undo removes exactly that turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    turn_offsets: Vec<usize>,
}

impl Transcript {
    pub fn new(opening: impl Into<String>) -> Self {
        Self {
            text: opening.into(),
            turn_offsets: Vec::new(),
        }
    }

    /// Rebuilds a transcript from saved parts. Offsets must be ascending
    /// char boundaries inside `text`.
    pub fn from_parts(text: String, turn_offsets: Vec<usize>) -> Option<Self> {
        let mut prev = 0;
        for &offset in &turn_offsets {
            if offset < prev || offset > text.len() || !text.is_char_boundary(offset) {
                return None;
            }
            prev = offset;
        }
        Some(Self { text, turn_offsets })
    }

    pub fn reset(&mut self, opening: impl Into<String>) {
        self.text = opening.into();
        self.turn_offsets.clear();
    }

    pub fn append_turn(&mut self, mode: Mode, input: &str, output: &str) {
        self.turn_offsets.push(self.text.len());
        self.text
            .push_str(&format!("\n> {}: {}\n{}\n", mode.label(), input, output));
    }

    /// Removes the last turn's text. Returns false when no turn is recorded.
    pub fn pop_turn(&mut self) -> bool {
        match self.turn_offsets.pop() {
            Some(offset) => {
                self.text.truncate(offset);
                true
            }
            None => false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn turn_offsets(&self) -> &[usize] {
        &self.turn_offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_pop_restores_text() {
        let mut t = Transcript::new("Intro\n");
        t.append_turn(Mode::Do, "look around", "Trees.\nMore trees.\nEven more.");
        assert_eq!(
            t.text(),
            "Intro\n\n> Do: look around\nTrees.\nMore trees.\nEven more.\n"
        );

        assert!(t.pop_turn());
        assert_eq!(t.text(), "Intro\n");
        assert!(!t.pop_turn());
    }

    #[test]
    fn pop_is_exact_with_multiline_turns() {
        let mut t = Transcript::new("Intro\n");
        t.append_turn(Mode::Story, "one", "a");
        let after_first = t.text().to_string();
        t.append_turn(Mode::Continue, "two", "b\nc\nd\ne\nf\ng");

        t.pop_turn();
        assert_eq!(t.text(), after_first);
        assert_eq!(t.turn_offsets().len(), 1);
    }

    #[test]
    fn from_parts_rejects_bad_offsets() {
        assert!(Transcript::from_parts("abc".into(), vec![4]).is_none());
        assert!(Transcript::from_parts("abc".into(), vec![2, 1]).is_none());
        assert!(Transcript::from_parts("é".into(), vec![1]).is_none());
        assert!(Transcript::from_parts("abc".into(), vec![1, 3]).is_some());
    }
}
