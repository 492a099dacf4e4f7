//! Side line for local analysis.
//!
//! A flat list of moves explored from a saved base position. Nothing on it
//! reaches the history tree or the peers. Playing from the middle of the line
//! drops everything after the shown ply, the way a move after an undo would.

use crate::game_state::game_state::GameState;
use crate::game_status::repetition::RepetitionTable;
use crate::history::move_record::MoveRecord;

#[derive(Debug, Clone)]
pub struct AnalysisLine {
    base: GameState,
    moves: Vec<MoveRecord>,
    /// Moves applied to `base` for the position on display.
    shown: usize,
}

impl AnalysisLine {
    pub fn new(base: GameState) -> Self {
        Self {
            base,
            moves: Vec::new(),
            shown: 0,
        }
    }

    #[inline]
    pub fn base(&self) -> &GameState {
        &self.base
    }

    #[inline]
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Ply on display; 0 is the base position.
    #[inline]
    pub fn ply(&self) -> usize {
        self.shown
    }

    pub fn position(&self) -> &GameState {
        self.shown
            .checked_sub(1)
            .and_then(|idx| self.moves.get(idx))
            .map(|record| &record.state)
            .unwrap_or(&self.base)
    }

    /// Append after the shown ply and show it. Returns the new ply.
    pub fn push(&mut self, record: MoveRecord) -> usize {
        self.moves.truncate(self.shown);
        self.moves.push(record);
        self.shown = self.moves.len();
        self.shown
    }

    pub fn undo(&mut self) -> bool {
        if self.shown == 0 {
            return false;
        }
        self.shown -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.shown >= self.moves.len() {
            return false;
        }
        self.shown += 1;
        true
    }

    pub fn jump(&mut self, ply: usize) -> bool {
        if ply > self.moves.len() {
            return false;
        }
        self.shown = ply;
        true
    }

    /// Occurrences along the line up to the shown ply, base included.
    pub fn repetitions(&self) -> RepetitionTable {
        let mut table = RepetitionTable::new(self.base.position_key());
        for record in &self.moves[..self.shown] {
            table.record(record.state.position_key());
        }
        table
    }
}
