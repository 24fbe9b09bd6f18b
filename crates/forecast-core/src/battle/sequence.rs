use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Input codes that unlock the easter egg, oldest first.
pub const SECRET_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Sliding-window matcher over the most recent input codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceMatcher {
    window: VecDeque<String>,
}

impl SequenceMatcher {
    /// Feed one code. Returns `true` when the window equals the secret;
    /// the window is then cleared so the full sequence is needed again.
    pub fn push(&mut self, code: &str) -> bool {
        if self.window.len() == SECRET_SEQUENCE.len() {
            self.window.pop_front();
        }
        self.window.push_back(code.to_string());

        let matched = self.window.len() == SECRET_SEQUENCE.len()
            && self
                .window
                .iter()
                .zip(SECRET_SEQUENCE.iter())
                .all(|(seen, want)| seen == want);
        if matched {
            self.window.clear();
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_sequence() {
        let mut m = SequenceMatcher::default();
        let hits: Vec<bool> = SECRET_SEQUENCE.iter().map(|c| m.push(c)).collect();
        assert_eq!(hits.iter().filter(|h| **h).count(), 1);
        assert!(hits[9]);
    }

    #[test]
    fn noise_before_sequence_is_ignored() {
        let mut m = SequenceMatcher::default();
        for c in ["KeyX", "ArrowUp", "Enter"] {
            assert!(!m.push(c));
        }
        let last = SECRET_SEQUENCE.iter().map(|c| m.push(c)).last();
        assert_eq!(last, Some(true));
    }

    #[test]
    fn broken_sequence_does_not_match() {
        let mut m = SequenceMatcher::default();
        for (i, c) in SECRET_SEQUENCE.iter().enumerate() {
            let code = if i == 4 { "ArrowRight" } else { c };
            assert!(!m.push(code));
        }
    }
}
