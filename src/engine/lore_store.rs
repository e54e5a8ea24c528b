use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::StartupError;

pub const CHUNK_SIZE: usize = 1000;
pub const CHUNK_OVERLAP: usize = 200;

/// Tried in order; the empty separator splits into single characters.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Reads the lore document and cuts it into overlapping chunks.
pub fn load_lore(path: &Path) -> Result<Vec<String>, StartupError> {
    let text = fs::read_to_string(path).map_err(|source| StartupError::LoreUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let chunks = TextSplitter::default().split(&text);
    if chunks.is_empty() {
        return Err(StartupError::EmptyLore(path.to_path_buf()));
    }

    info!(path = %path.display(), chunks = chunks.len(), "Lore loaded");
    Ok(chunks)
}

/// Recursive character splitter. Lengths are counted in chars.
#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            chunk_overlap: CHUNK_OVERLAP,
        }
    }
}

impl TextSplitter {
    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, &SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let idx = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(idx).copied().unwrap_or("");
        let remaining = separators.get(idx + 1..).unwrap_or(&[]);

        let pieces: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();

        for piece in pieces {
            if char_len(&piece) < self.chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge(&fitting, separator));
                fitting.clear();
            }

            if remaining.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_with(&piece, remaining));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge(&fitting, separator));
        }

        chunks
    }

    /// Greedily packs pieces into chunks, keeping up to `chunk_overlap`
    /// chars of the previous chunk at the start of the next.
    fn merge(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);
            let joiner = if current.is_empty() { 0 } else { sep_len };

            if total + len + joiner > self.chunk_size {
                if total > self.chunk_size {
                    warn!(
                        size = total,
                        limit = self.chunk_size,
                        "Created a chunk longer than the limit"
                    );
                }

                if !current.is_empty() {
                    if let Some(chunk) = join_trimmed(&current, separator) {
                        chunks.push(chunk);
                    }

                    while total > self.chunk_overlap
                        || (total > 0
                            && total + len + if current.is_empty() { 0 } else { sep_len }
                                > self.chunk_size)
                    {
                        let Some(first) = current.pop_front() else {
                            break;
                        };
                        let joined = if current.is_empty() { 0 } else { sep_len };
                        total = total.saturating_sub(char_len(first) + joined);
                    }
                }
            }

            current.push_back(piece.as_str());
            total += len + if current.len() > 1 { sep_len } else { 0 };
        }

        if let Some(chunk) = join_trimmed(&current, separator) {
            chunks.push(chunk);
        }

        chunks
    }
}

fn join_trimmed(pieces: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = pieces.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
