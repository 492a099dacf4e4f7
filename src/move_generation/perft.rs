//! Perft node counting for the variant.
//!
//! Leaves are complete turns as produced by a [`MoveGenerator`], so every
//! promotion kind and every summon placement counts as its own node.

use std::num::NonZeroUsize;
use std::ops::AddAssign;
use std::thread;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::move_descriptions::MoveTarget;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub castles: usize,
    pub promotions: usize,
    pub summons: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    const LEAF: Self = Self {
        nodes: 1,
        captures: 0,
        castles: 0,
        promotions: 0,
        summons: 0,
        checks: 0,
        checkmates: 0,
    };

    /// Count `mv` as one leaf.
    fn tally(&mut self, mv: &GeneratedMove) {
        self.nodes += 1;
        self.captures += usize::from(mv.is_capture);
        self.castles += usize::from(matches!(mv.target, MoveTarget::Castle(_)));
        self.promotions += usize::from(mv.is_promotion());
        self.summons += usize::from(mv.is_summon());
        self.checks += usize::from(mv.annotations.gives_check);
        self.checkmates += usize::from(mv.annotations.is_checkmate);
    }
}

impl AddAssign for PerftCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.summons += rhs.summons;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    perft_single_thread(generator, game_state, depth)
}

pub fn perft_single_thread<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts::LEAF);
    }
    let mut total = PerftCounts::default();
    count_below(generator, game_state, depth, &mut total)?;
    Ok(total)
}

/// Per root turn counts, handy for diffing two generators.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<Vec<(Square, MoveTarget, PerftCounts)>> {
    let mut out = Vec::new();
    for mv in generator.generate_legal_moves(game_state)? {
        let counts = subtree(generator, &mv, depth)?;
        out.push((mv.from, mv.target, counts));
    }
    Ok(out)
}

/// Root turns are shared out over scoped worker threads, one chunk each.
pub fn perft_multi_threaded<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts::LEAF);
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    if root_moves.is_empty() {
        return Ok(PerftCounts::default());
    }
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk_len = root_moves.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    for mv in chunk {
                        local += subtree(generator, mv, depth)?;
                    }
                    Ok::<_, ChessErrors>(local)
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            total += handle.join().map_err(|_| ChessErrors::WorkerPanicked)??;
        }
        Ok(total)
    })
}

/// Counts for the subtree of a root turn searched to `depth` plies in total.
fn subtree<G: MoveGenerator>(generator: &G, mv: &GeneratedMove, depth: u8) -> MoveGenResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth <= 1 {
        counts.tally(mv);
    } else {
        count_below(generator, &mv.game_after_move, depth - 1, &mut counts)?;
    }
    Ok(counts)
}

fn count_below<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let moves = generator.generate_legal_moves(game_state)?;
    if depth == 1 {
        moves.iter().for_each(|mv| counts.tally(mv));
        return Ok(());
    }
    for mv in &moves {
        count_below(generator, &mv.game_after_move, depth - 1, counts)?;
    }
    Ok(())
}
