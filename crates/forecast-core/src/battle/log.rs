use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_CAPACITY: usize = 5;

/// Rolling battle log. Oldest lines are evicted once `capacity` is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl BattleLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: VecDeque::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Changes the capacity, dropping the oldest lines that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_first() {
        let mut log = BattleLog::new(3);
        for i in 0..5 {
            log.push(format!("line {i}"));
        }
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn shrinking_capacity_trims_oldest() {
        let mut log = BattleLog::new(5);
        for i in 0..5 {
            log.push(format!("line {i}"));
        }
        log.set_capacity(2);
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines, vec!["line 3", "line 4"]);

        log.set_capacity(4);
        log.push("line 5");
        log.push("line 6");
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn zero_capacity_keeps_one_line() {
        let mut log = BattleLog::new(0);
        log.push("a");
        log.push("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.last(), Some("b"));
    }
}
