//! Game orchestrator: the one entry point a front end talks to.
//!
//! A `Game` owns the history tree, the repetition table and whatever
//! promotion or summon choice is outstanding. Positions are never mutated in
//! place; every commit stores a fresh snapshot in a history node and the
//! visible position is simply the snapshot at the tree's `current` node.
//!
//! Committed local moves, retiring undos and resets are queued as
//! [`SyncMessage`]s for the host to forward to peers.
//!
//! An analysis detour branches off the displayed position into an
//! [`AnalysisLine`]. Moves played there are never recorded or broadcast, and
//! a peer's move closes the detour.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chess_errors::ChessErrors;
use crate::game::config::{GameConfig, LocalSide};
use crate::game::sync::{InstanceId, SyncMessage, SyncPayload};
use crate::game_state::king_summon::{summon_eligible, summon_targets};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game_status::evaluator::{evaluate_status, GameStatus};
use crate::game_status::repetition::RepetitionTable;
use crate::history::analysis_line::AnalysisLine;
use crate::history::history_tree::{HistoryTree, NodeId};
use crate::history::move_record::MoveRecord;
use crate::move_generation::legal_move_apply::{
    apply_move, place_summoned, AppliedMove, SummonPlacement,
};
use crate::move_generation::legal_move_generator::{find_legal_target, legal_moves_from};
use crate::moves::move_descriptions::MoveTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The latest position is on display and accepts moves.
    Playing,
    /// An earlier position is on display; moves are refused.
    Reviewing,
    /// A local side line is on display; moves stay local.
    Analysing,
}

/// Why a request was refused. Nothing changes when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("an earlier position is on display")]
    Reviewing,
    #[error("a promotion or summon choice is outstanding")]
    AwaitingChoice,
    #[error("no piece on that square")]
    EmptySquare,
    #[error("that piece does not belong to the side to move")]
    NotSideToMove,
    #[error("that piece is not controlled locally")]
    NotLocalSide,
    #[error("illegal destination")]
    IllegalDestination,
    #[error("no summon available for that king")]
    SummonUnavailable,
    #[error("no choice is pending")]
    NothingPending,
    #[error("invalid piece choice")]
    InvalidChoice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A move was committed and is now the latest node.
    Applied(NodeId),
    /// A move was added to the analysis line at this ply.
    Analysed(usize),
    PendingPromotion {
        from: Square,
        to: Square,
        color: Color,
    },
    /// `from` is the square the king left when it has just arrived on the
    /// enemy home rank, `None` for a king summoning where it stands.
    PendingSummon {
        king: Square,
        from: Option<Square>,
        targets: Vec<Square>,
        color: Color,
    },
    /// An outstanding choice was dropped without committing anything.
    Cancelled,
    Rejected(Rejection),
}

impl MoveOutcome {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_) | MoveOutcome::Analysed(_))
    }
}

#[derive(Debug, Clone)]
struct SummonRequest {
    king: Square,
    from: Option<Square>,
    targets: Vec<Square>,
    color: Color,
    /// The king step for an arrival, applied but not yet committed.
    arrival: Option<AppliedMove>,
}

#[derive(Debug, Clone)]
enum Pending {
    Promotion { from: Square, to: Square, color: Color },
    Summon(SummonRequest),
}

impl Pending {
    fn outcome(&self) -> MoveOutcome {
        match self {
            Pending::Promotion { from, to, color } => MoveOutcome::PendingPromotion {
                from: *from,
                to: *to,
                color: *color,
            },
            Pending::Summon(request) => MoveOutcome::PendingSummon {
                king: request.king,
                from: request.from,
                targets: request.targets.clone(),
                color: request.color,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    instance_id: InstanceId,
    initial: GameState,
    history: HistoryTree,
    repetitions: RepetitionTable,
    pending: Option<Pending>,
    analysis: Option<AnalysisLine>,
    outbox: Vec<SyncMessage>,
}

impl Game {
    /// Standard starting position, both sides local, random instance id.
    pub fn new_game() -> Self {
        Self::from_state(GameConfig::default(), GameState::new_game())
    }

    pub fn with_config(config: GameConfig) -> Result<Self, ChessErrors> {
        let initial = GameState::from_fen(&config.starting_fen)?;
        Ok(Self::from_state(config, initial))
    }

    fn from_state(config: GameConfig, initial: GameState) -> Self {
        let instance_id = config.instance_id.unwrap_or_else(InstanceId::random);
        info!(%instance_id, local_side = ?config.local_side, "new game");
        Self {
            repetitions: RepetitionTable::new(initial.position_key()),
            config,
            instance_id,
            initial,
            history: HistoryTree::new(),
            pending: None,
            analysis: None,
            outbox: Vec::new(),
        }
    }

    #[inline]
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn local_side(&self) -> LocalSide {
        self.config.local_side
    }

    pub fn history(&self) -> &HistoryTree {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        if self.analysis.is_some() {
            Mode::Analysing
        } else if self.history.is_reviewing() {
            Mode::Reviewing
        } else {
            Mode::Playing
        }
    }

    /// The position on display.
    pub fn position(&self) -> &GameState {
        match &self.analysis {
            Some(line) => line.position(),
            None => self.snapshot(self.history.current()),
        }
    }

    /// The position at the tip of play, whatever is on display.
    pub fn live_position(&self) -> &GameState {
        self.snapshot(self.history.latest())
    }

    fn snapshot(&self, node: NodeId) -> &GameState {
        self.history
            .record(node)
            .map(|record| &record.state)
            .unwrap_or(&self.initial)
    }

    /// The outstanding promotion or summon choice, if any.
    pub fn pending(&self) -> Option<MoveOutcome> {
        self.pending.as_ref().map(Pending::outcome)
    }

    /// Legal targets of the piece on `square`. Empty while reviewing.
    pub fn legal_moves(&self, square: Square) -> Vec<MoveTarget> {
        if self.mode() == Mode::Reviewing {
            return Vec::new();
        }
        legal_moves_from(self.position(), square)
    }

    /// Status of the live position, or of the analysis position while
    /// analysing.
    pub fn status(&self) -> GameStatus {
        match &self.analysis {
            Some(line) => evaluate_status(line.position(), &line.repetitions()),
            None => evaluate_status(self.live_position(), &self.repetitions),
        }
    }

    pub fn analysis(&self) -> Option<&AnalysisLine> {
        self.analysis.as_ref()
    }

    /// Branch a local side line off the position on display. Restarts the
    /// line when one is already open.
    pub fn start_analysis(&mut self) -> &GameState {
        self.drop_pending();
        let base = self.snapshot(self.history.current()).clone();
        info!(fen = %base.get_fen(), "started analysis");
        self.analysis.insert(AnalysisLine::new(base)).position()
    }

    /// Close the side line and show the history view again.
    pub fn leave_analysis(&mut self) -> bool {
        self.drop_pending();
        let left = self.analysis.take().is_some();
        if left {
            info!("left analysis");
        }
        left
    }

    /// Show `ply` of the analysis line, 0 being its base.
    pub fn jump_in_analysis(&mut self, ply: usize) -> Option<&GameState> {
        self.drop_pending();
        let line = self.analysis.as_mut()?;
        if !line.jump(ply) {
            return None;
        }
        Some(line.position())
    }

    /// Try to move the piece on `from` to `to`.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        let piece = match self.check_mover(from) {
            Ok(piece) => piece,
            Err(rejection) => return MoveOutcome::Rejected(rejection),
        };
        let state = self.position();
        let Some(target) = find_legal_target(state, from, to) else {
            debug!(%from, %to, "illegal destination");
            return MoveOutcome::Rejected(Rejection::IllegalDestination);
        };

        let mover = piece.color;
        if piece.kind == PieceKind::Pawn && to.row == mover.opposite().home_row() {
            self.pending = Some(Pending::Promotion {
                from,
                to,
                color: mover,
            });
            debug!(%from, %to, "promotion pending");
            return MoveOutcome::PendingPromotion {
                from,
                to,
                color: mover,
            };
        }

        let applied = match apply_move(state, from, target, None) {
            Ok(applied) => applied,
            Err(err) => {
                warn!(%from, %to, error = %err, "legal move failed to apply");
                return MoveOutcome::Rejected(Rejection::IllegalDestination);
            }
        };

        if let (PieceKind::King, MoveTarget::Step(king)) = (piece.kind, target) {
            let arrived = &applied.state;
            if summon_eligible(king, mover, arrived.king_states.get(mover)) {
                let targets = summon_targets(&arrived.board, king, mover, Some(from));
                if !targets.is_empty() {
                    let request = SummonRequest {
                        king,
                        from: Some(from),
                        targets,
                        color: mover,
                        arrival: Some(applied),
                    };
                    debug!(%from, %king, "arrival summon pending");
                    let pending = Pending::Summon(request);
                    let outcome = pending.outcome();
                    self.pending = Some(pending);
                    return outcome;
                }
            }
        }

        self.commit(from, to, applied, None, None)
    }

    pub fn resolve_promotion(&mut self, kind: PieceKind) -> MoveOutcome {
        let Some(Pending::Promotion { from, to, .. }) = self.pending else {
            return MoveOutcome::Rejected(Rejection::NothingPending);
        };
        if !kind.is_promotion_choice() {
            return MoveOutcome::Rejected(Rejection::InvalidChoice);
        }

        match apply_move(self.position(), from, MoveTarget::Step(to), Some(kind)) {
            Ok(applied) => {
                self.pending = None;
                self.commit(from, to, applied, None, None)
            }
            Err(err) => {
                warn!(%from, %to, error = %err, "promotion failed to apply");
                MoveOutcome::Rejected(Rejection::InvalidChoice)
            }
        }
    }

    pub fn cancel_promotion(&mut self) -> MoveOutcome {
        if !matches!(self.pending, Some(Pending::Promotion { .. })) {
            return MoveOutcome::Rejected(Rejection::NothingPending);
        }
        self.pending = None;
        MoveOutcome::Cancelled
    }

    /// Open a summon for a king already standing on the enemy home rank.
    pub fn request_summon(&mut self, king: Square) -> MoveOutcome {
        let piece = match self.check_mover(king) {
            Ok(piece) => piece,
            Err(rejection) => return MoveOutcome::Rejected(rejection),
        };
        if piece.kind != PieceKind::King {
            return MoveOutcome::Rejected(Rejection::SummonUnavailable);
        }

        let targets: Vec<Square> = legal_moves_from(self.position(), king)
            .into_iter()
            .filter_map(|target| match target {
                MoveTarget::Summon(square) => Some(square),
                _ => None,
            })
            .collect();
        if targets.is_empty() {
            return MoveOutcome::Rejected(Rejection::SummonUnavailable);
        }

        let pending = Pending::Summon(SummonRequest {
            king,
            from: None,
            targets,
            color: piece.color,
            arrival: None,
        });
        let outcome = pending.outcome();
        self.pending = Some(pending);
        outcome
    }

    pub fn resolve_summon(&mut self, kind: PieceKind, target: Square) -> MoveOutcome {
        let Some(Pending::Summon(request)) = &self.pending else {
            return MoveOutcome::Rejected(Rejection::NothingPending);
        };
        if !request.targets.contains(&target) {
            return MoveOutcome::Rejected(Rejection::IllegalDestination);
        }
        if !kind.is_promotion_choice() {
            return MoveOutcome::Rejected(Rejection::InvalidChoice);
        }

        let king = request.king;
        let placement = SummonPlacement {
            kind,
            square: target,
        };
        let committed = match (&request.arrival, request.from) {
            (Some(arrival), Some(from)) => {
                place_summoned(&arrival.state, request.color, placement).map(|state| {
                    (from, arrival.clone(), Some(placement), Some(state))
                })
            }
            _ => apply_move(self.position(), king, MoveTarget::Summon(target), Some(kind))
                .map(|applied| (king, applied, None, None)),
        };

        match committed {
            Ok((from, applied, arrival_summon, state)) => {
                self.pending = None;
                info!(%king, %target, ?kind, "summoned");
                self.commit(from, king, applied, arrival_summon, state)
            }
            Err(err) => {
                warn!(%king, %target, error = %err, "summon failed to apply");
                MoveOutcome::Rejected(Rejection::InvalidChoice)
            }
        }
    }

    /// Drop a summon. An arriving king still completes its move.
    pub fn cancel_summon(&mut self) -> MoveOutcome {
        if !matches!(self.pending, Some(Pending::Summon(_))) {
            return MoveOutcome::Rejected(Rejection::NothingPending);
        }
        let Some(Pending::Summon(request)) = self.pending.take() else {
            return MoveOutcome::Rejected(Rejection::NothingPending);
        };
        match (request.arrival, request.from) {
            (Some(arrival), Some(from)) => self.commit(from, request.king, arrival, None, None),
            _ => MoveOutcome::Cancelled,
        }
    }

    /// Step the view back one move. Undoing the latest move of a locally
    /// controlled color takes it back for good and tells the peers. While
    /// analysing this walks the analysis line instead.
    pub fn undo(&mut self) -> Option<&GameState> {
        self.drop_pending();
        let moved = match self.analysis.as_mut() {
            Some(line) => line.undo(),
            None => self.undo_played(),
        };
        if moved {
            Some(self.position())
        } else {
            None
        }
    }

    pub fn redo(&mut self) -> Option<&GameState> {
        self.drop_pending();
        let moved = match self.analysis.as_mut() {
            Some(line) => line.redo(),
            None => self.redo_played(),
        };
        if moved {
            Some(self.position())
        } else {
            None
        }
    }

    fn undo_played(&mut self) -> bool {
        let local_side = self.config.local_side;
        let Some(step) = self.history.undo(|record| local_side.controls(record.turn)) else {
            return false;
        };

        if let Some(retired) = step.retired {
            if let Some(record) = self.history.record(retired) {
                self.repetitions.forget(&record.state.position_key());
                info!(node = retired.index(), mv = %record.notation(), "took back move");
            }
            self.broadcast(SyncPayload::Undo);
        }
        true
    }

    fn redo_played(&mut self) -> bool {
        let Some(step) = self.history.redo() else {
            return false;
        };

        if step.reentered {
            if let Some(record) = self.history.record(step.node).cloned() {
                self.repetitions.record(record.state.position_key());
                info!(node = step.node.index(), mv = %record.notation(), "replayed move");
                self.broadcast(SyncPayload::Move(Box::new(record)));
            }
        }
        true
    }

    /// Show a history node. Leaves any analysis line.
    pub fn jump_to(&mut self, node: NodeId) -> Option<&GameState> {
        self.drop_pending();
        if !self.history.jump_to(node) {
            return None;
        }
        self.analysis = None;
        Some(self.position())
    }

    /// Start over from the initial position and tell the peers.
    pub fn reset(&mut self) {
        self.reset_local();
        self.broadcast(SyncPayload::Reset);
    }

    fn reset_local(&mut self) {
        self.history.reset();
        self.repetitions.reset(self.initial.position_key());
        self.pending = None;
        self.analysis = None;
        info!("game reset");
    }

    /// Append a peer's move. Returns `false` for echoes of our own moves and
    /// for records that do not continue the live position.
    pub fn apply_remote(&mut self, sender: InstanceId, record: MoveRecord) -> bool {
        if sender == self.instance_id {
            debug!("ignored own move echo");
            return false;
        }
        let expected = self.live_position().side_to_move;
        if record.turn != expected {
            warn!(%sender, mv = %record.notation(), "remote move out of turn");
            return false;
        }

        self.pending = None;
        if self.analysis.take().is_some() {
            info!(%sender, "remote move closed analysis");
        }
        self.repetitions.record(record.state.position_key());
        info!(%sender, mv = %record.notation(), "applied remote move");
        self.history.remote_apply(record);
        true
    }

    pub fn apply_remote_undo(&mut self, sender: InstanceId) -> bool {
        if sender == self.instance_id {
            debug!("ignored own undo echo");
            return false;
        }
        self.pending = None;
        self.analysis = None;
        match self.history.remote_undo() {
            Some(record) => {
                self.repetitions.forget(&record.state.position_key());
                info!(%sender, mv = %record.notation(), "peer took back move");
                true
            }
            None => false,
        }
    }

    /// Dispatch a message from the sync channel.
    pub fn receive(&mut self, message: SyncMessage) -> bool {
        if message.is_echo_of(self.instance_id) {
            return false;
        }
        match message.payload {
            SyncPayload::Move(record) => self.apply_remote(message.sender, *record),
            SyncPayload::Undo => self.apply_remote_undo(message.sender),
            SyncPayload::Reset => {
                self.reset_local();
                true
            }
        }
    }

    pub fn receive_json(&mut self, text: &str) -> Result<bool, ChessErrors> {
        Ok(self.receive(SyncMessage::from_json(text)?))
    }

    /// Messages queued since the last call, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<SyncMessage> {
        std::mem::take(&mut self.outbox)
    }

    /// Both colors are free to move on an analysis line.
    fn check_mover(&self, from: Square) -> Result<Piece, Rejection> {
        let mode = self.mode();
        if mode == Mode::Reviewing {
            return Err(Rejection::Reviewing);
        }
        if self.pending.is_some() {
            return Err(Rejection::AwaitingChoice);
        }
        let state = self.position();
        let piece = state.board.piece_at(from).ok_or(Rejection::EmptySquare)?;
        if piece.color != state.side_to_move {
            return Err(Rejection::NotSideToMove);
        }
        if mode == Mode::Playing && !self.config.local_side.controls(piece.color) {
            return Err(Rejection::NotLocalSide);
        }
        Ok(piece)
    }

    fn commit(
        &mut self,
        from: Square,
        to: Square,
        applied: AppliedMove,
        arrival_summon: Option<SummonPlacement>,
        state: Option<GameState>,
    ) -> MoveOutcome {
        let record = MoveRecord::from_applied(from, to, applied, arrival_summon, state);
        if let Some(line) = self.analysis.as_mut() {
            debug!(mv = %record.notation(), "analysis move");
            return MoveOutcome::Analysed(line.push(record));
        }

        self.repetitions.record(record.state.position_key());
        info!(mv = %record.notation(), turn = ?record.turn, "committed move");

        let outcome = self.history.record_move(record.clone());
        self.broadcast(SyncPayload::Move(Box::new(record)));
        MoveOutcome::Applied(outcome.node)
    }

    fn drop_pending(&mut self) {
        if self.pending.take().is_some() {
            debug!("dropped pending choice");
        }
    }

    fn broadcast(&mut self, payload: SyncPayload) {
        self.outbox.push(SyncMessage::new(self.instance_id, payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn game_from(fen: &str) -> Game {
        Game::with_config(GameConfig::default().with_starting_fen(fen)).unwrap()
    }

    #[test]
    fn rejections_leave_the_game_untouched() {
        let mut game = Game::new_game();
        assert_eq!(
            game.attempt_move(sq("e4"), sq("e5")),
            MoveOutcome::Rejected(Rejection::EmptySquare)
        );
        assert_eq!(
            game.attempt_move(sq("e7"), sq("e5")),
            MoveOutcome::Rejected(Rejection::NotSideToMove)
        );
        assert_eq!(
            game.attempt_move(sq("e2"), sq("e5")),
            MoveOutcome::Rejected(Rejection::IllegalDestination)
        );
        assert!(game.history().is_empty());
        assert!(game.drain_outbox().is_empty());
    }

    #[test]
    fn local_side_gates_input() {
        let config = GameConfig::default().with_local_side(LocalSide::Only(Color::Dark));
        let mut game = Game::with_config(config).unwrap();
        assert_eq!(
            game.attempt_move(sq("e2"), sq("e4")),
            MoveOutcome::Rejected(Rejection::NotLocalSide)
        );
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        let mut game = game_from("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let outcome = game.attempt_move(sq("a7"), sq("a8"));
        assert_eq!(
            outcome,
            MoveOutcome::PendingPromotion {
                from: sq("a7"),
                to: sq("a8"),
                color: Color::Light,
            }
        );
        assert!(game.position().board.piece_at(sq("a7")).is_some());
        assert_eq!(
            game.attempt_move(sq("e1"), sq("d1")),
            MoveOutcome::Rejected(Rejection::AwaitingChoice)
        );
        assert_eq!(
            game.resolve_promotion(PieceKind::King),
            MoveOutcome::Rejected(Rejection::InvalidChoice)
        );

        assert_eq!(game.cancel_promotion(), MoveOutcome::Cancelled);
        assert!(game.history().is_empty());

        game.attempt_move(sq("a7"), sq("a8"));
        assert!(game.resolve_promotion(PieceKind::Rook).is_applied());
        assert_eq!(
            game.position().board.piece_at(sq("a8")),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.resolve_promotion(PieceKind::Rook), MoveOutcome::Rejected(Rejection::NothingPending));
    }

    #[test]
    fn cancelled_arrival_summon_still_moves_the_king() {
        let mut game = game_from("8/4K3/8/8/k7/8/8/8 w - - 0 1");
        let outcome = game.attempt_move(sq("e7"), sq("e8"));
        assert_eq!(
            outcome,
            MoveOutcome::PendingSummon {
                king: sq("e8"),
                from: Some(sq("e7")),
                targets: vec![sq("d8"), sq("f8")],
                color: Color::Light,
            }
        );
        assert!(game.cancel_summon().is_applied());
        assert_eq!(
            game.position().board.piece_at(sq("e8")),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
        assert_eq!(game.position().board.piece_count(), 2);
        assert_eq!(game.position().side_to_move, Color::Dark);
    }

    #[test]
    fn standing_summon_can_be_dropped() {
        let mut game = game_from("4K3/8/8/8/k7/8/8/8 w - - 0 1");
        assert_eq!(
            game.request_summon(sq("a4")),
            MoveOutcome::Rejected(Rejection::NotSideToMove)
        );
        let outcome = game.request_summon(sq("e8"));
        assert!(matches!(outcome, MoveOutcome::PendingSummon { from: None, .. }));
        assert_eq!(
            game.resolve_summon(PieceKind::Queen, sq("e7")),
            MoveOutcome::Rejected(Rejection::IllegalDestination)
        );
        assert_eq!(game.cancel_summon(), MoveOutcome::Cancelled);
        assert!(game.history().is_empty());

        game.request_summon(sq("e8"));
        assert!(game.resolve_summon(PieceKind::Bishop, sq("d8")).is_applied());
        let record = game.history().record(game.history().latest()).unwrap();
        assert_eq!(record.from, sq("e8"));
        assert_eq!(record.to, sq("e8"));
        assert_eq!(
            record.summon,
            Some(SummonPlacement {
                kind: PieceKind::Bishop,
                square: sq("d8"),
            })
        );
    }

    #[test]
    fn own_echo_is_ignored() {
        let mut game = Game::new_game();
        game.attempt_move(sq("e2"), sq("e4"));
        let outbox = game.drain_outbox();
        assert_eq!(outbox.len(), 1);
        assert!(!game.receive(outbox[0].clone()));
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn analysis_moves_stay_local() {
        let config = GameConfig::default().with_local_side(LocalSide::Only(Color::Light));
        let mut game = Game::with_config(config).unwrap();
        game.attempt_move(sq("e2"), sq("e4"));
        game.drain_outbox();
        let live = game.live_position().clone();

        game.start_analysis();
        assert_eq!(game.mode(), Mode::Analysing);
        // Either color may move on the line.
        assert_eq!(game.attempt_move(sq("e7"), sq("e5")), MoveOutcome::Analysed(1));
        assert_eq!(game.attempt_move(sq("g1"), sq("f3")), MoveOutcome::Analysed(2));
        assert!(game.drain_outbox().is_empty());
        assert_eq!(game.history().len(), 2);
        assert_eq!(*game.live_position(), live);

        let back = game.undo().unwrap();
        assert_eq!(back.side_to_move, Color::Light);
        assert!(game.undo().is_some());
        assert!(game.undo().is_none());
        assert_eq!(*game.position(), live);
        assert!(game.jump_in_analysis(2).is_some());
        assert_eq!(game.analysis().map(AnalysisLine::ply), Some(2));

        assert!(game.leave_analysis());
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(*game.position(), live);
        assert!(!game.leave_analysis());
        assert_eq!(
            game.attempt_move(sq("e7"), sq("e5")),
            MoveOutcome::Rejected(Rejection::NotLocalSide)
        );
    }

    #[test]
    fn analysis_promotion_lands_on_the_line() {
        let mut game = game_from("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        game.start_analysis();
        game.attempt_move(sq("a7"), sq("b8"));
        assert_eq!(game.resolve_promotion(PieceKind::Queen), MoveOutcome::Analysed(1));
        assert!(game.history().is_empty());
        assert_eq!(
            game.position().board.piece_at(sq("b8")),
            Some(Piece::new(Color::Light, PieceKind::Queen))
        );
    }

    #[test]
    fn cancelling_a_summon_keeps_a_pending_promotion() {
        let mut game = game_from("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        game.attempt_move(sq("a7"), sq("a8"));
        assert_eq!(game.cancel_summon(), MoveOutcome::Rejected(Rejection::NothingPending));
        assert!(matches!(game.pending(), Some(MoveOutcome::PendingPromotion { .. })));
    }
}
