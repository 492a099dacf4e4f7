//! Position-key occurrence counts for the repetition draw.

use std::collections::HashMap;

use crate::game_state::chess_rules::REPETITION_DRAW_COUNT;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTable {
    counts: HashMap<String, u32>,
}

impl RepetitionTable {
    /// A table holding the starting position once.
    pub fn new(initial_key: String) -> Self {
        let mut table = Self::default();
        table.record(initial_key);
        table
    }

    /// Count one more occurrence and return the new total.
    pub fn record(&mut self, key: String) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Take back one occurrence, dropping the key at zero.
    pub fn forget(&mut self, key: &str) {
        if let Some(count) = self.counts.get_mut(key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counts.remove(key);
            }
        }
    }

    pub fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_repetition_draw(&self, key: &str) -> bool {
        self.count(key) >= REPETITION_DRAW_COUNT
    }

    pub fn reset(&mut self, initial_key: String) {
        self.counts.clear();
        self.record(initial_key);
    }
}
