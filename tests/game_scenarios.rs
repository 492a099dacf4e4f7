use hop_chess::game::config::GameConfig;
use hop_chess::game::game::{Game, Mode, MoveOutcome};
use hop_chess::game_state::chess_types::{CastleSide, Color, Piece, PieceKind, Square};
use hop_chess::game_state::king_summon::SummonPhase;
use hop_chess::game_status::evaluator::DrawKind;
use hop_chess::moves::move_descriptions::MoveTarget;

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn game_from(fen: &str) -> Game {
    Game::with_config(GameConfig::default().with_starting_fen(fen)).unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for text in moves {
        let outcome = game.attempt_move(sq(&text[..2]), sq(&text[2..]));
        assert!(outcome.is_applied(), "{text} was not applied: {outcome:?}");
    }
}

#[test]
fn rook_hops_exactly_one_square_past_a_friendly_blocker() {
    let game = game_from("4k3/8/8/8/8/8/P7/R3K3 w - - 0 1");
    let targets = game.legal_moves(sq("a1"));

    assert!(targets.contains(&MoveTarget::Step(sq("a3"))));
    assert!(!targets.contains(&MoveTarget::Step(sq("a2"))));
    for far in ["a4", "a5", "a8"] {
        assert!(!targets.contains(&MoveTarget::Step(sq(far))), "{far}");
    }
    // Along the rank the king is the blocker and f1 lies just past it.
    assert!(targets.contains(&MoveTarget::Step(sq("d1"))));
    assert!(targets.contains(&MoveTarget::Step(sq("f1"))));
    assert!(!targets.contains(&MoveTarget::Step(sq("g1"))));
}

#[test]
fn back_rank_mate_leaves_no_move_for_any_defender() {
    // The bishop keeps f7 from stepping back to e8 as a block.
    let mut game = game_from("6k1/5ppp/8/8/2B5/8/8/R5K1 w - - 0 1");
    play(&mut game, &["a1a8"]);

    let status = game.status();
    assert!(status.check);
    assert!(status.checkmate);
    assert!(!status.stalemate);
    assert!(status.draw.is_none());

    let defenders: Vec<Square> = game
        .position()
        .board
        .pieces_of(Color::Dark)
        .map(|(square, _)| square)
        .collect();
    assert_eq!(defenders.len(), 4);
    for square in defenders {
        assert!(game.legal_moves(square).is_empty(), "{square} can still move");
    }
}

#[test]
fn threefold_repetition_draws_on_the_third_occurrence() {
    let mut game = Game::new_game();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"];

    for (ply, text) in shuffle.iter().enumerate() {
        play(&mut game, &[text]);
        let draw = game.status().draw;
        if ply + 1 < shuffle.len() {
            assert!(draw.is_none(), "early draw after ply {}", ply + 1);
        } else {
            let draw = draw.unwrap();
            assert_eq!(draw.kind, DrawKind::ThreefoldRepetition);
            assert_eq!(draw.message, "Draw by threefold repetition.");
        }
    }
}

#[test]
fn taking_back_a_repetition_takes_back_the_draw() {
    let mut game = Game::new_game();
    play(
        &mut game,
        &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"],
    );
    assert!(game.status().draw.is_some());

    game.undo().unwrap();
    assert!(game.status().draw.is_none());
    game.redo().unwrap();
    assert_eq!(
        game.status().draw.map(|d| d.kind),
        Some(DrawKind::ThreefoldRepetition)
    );
}

#[test]
fn hundred_quiet_halfmoves_draw_by_the_fifty_move_rule() {
    let mut game = game_from("4k3/8/8/8/8/8/8/R3K3 w - - 98 60");
    play(&mut game, &["a1a2"]);
    assert_eq!(game.position().halfmove_clock, 99);
    assert!(game.status().draw.is_none());

    play(&mut game, &["e8d8"]);
    let draw = game.status().draw.unwrap();
    assert_eq!(draw.kind, DrawKind::FiftyMoveRule);
    assert_eq!(draw.message, "Draw by fifty-move rule.");
}

#[test]
fn a_capture_resets_the_halfmove_clock() {
    let mut game = game_from("4k3/8/8/8/8/8/p7/R3K3 w - - 40 30");
    play(&mut game, &["a1a2"]);
    assert_eq!(game.position().halfmove_clock, 0);
    assert_eq!(
        game.history().record(game.history().latest()).unwrap().captured,
        Some(Piece::new(Color::Dark, PieceKind::Pawn))
    );
}

#[test]
fn both_castles_move_king_and_rook() {
    let mut game = game_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let castles: Vec<CastleSide> = game
        .legal_moves(sq("e1"))
        .into_iter()
        .filter_map(|target| match target {
            MoveTarget::Castle(castle) => Some(castle.side),
            _ => None,
        })
        .collect();
    assert_eq!(castles, vec![CastleSide::KingSide, CastleSide::QueenSide]);

    play(&mut game, &["e1g1"]);
    let board = &game.position().board;
    assert_eq!(board.piece_at(sq("g1")), Some(Piece::new(Color::Light, PieceKind::King)));
    assert_eq!(board.piece_at(sq("f1")), Some(Piece::new(Color::Light, PieceKind::Rook)));
    assert!(board.is_empty(sq("h1")));
    assert!(!game.position().has_castling_right(Color::Light, CastleSide::QueenSide));

    play(&mut game, &["e8c8"]);
    let record = game.history().record(game.history().latest()).unwrap();
    assert_eq!(record.notation(), "O-O-O");
    assert_eq!(
        game.position().board.piece_at(sq("d8")),
        Some(Piece::new(Color::Dark, PieceKind::Rook))
    );
}

#[test]
fn en_passant_is_offered_only_right_after_the_double_step() {
    let mut game = game_from("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    play(&mut game, &["d7d5"]);
    assert_eq!(game.position().en_passant_square, Some(sq("d6")));
    assert!(game.legal_moves(sq("e5")).contains(&MoveTarget::Step(sq("d6"))));

    play(&mut game, &["e5d6"]);
    let record = game.history().record(game.history().latest()).unwrap();
    assert!(record.en_passant);
    assert!(game.position().board.is_empty(sq("d5")));
    assert_eq!(game.position().board.piece_count(), 3);
}

#[test]
fn king_summons_on_arrival_then_must_return_home() {
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
    assert!(game.resolve_summon(PieceKind::Knight, sq("f8")).is_applied());
    assert_eq!(
        game.position().board.piece_at(sq("f8")),
        Some(Piece::new(Color::Light, PieceKind::Knight))
    );
    assert_eq!(
        game.position().king_states.get(Color::Light).phase(),
        SummonPhase::Summoned
    );
    let record = game.history().record(game.history().latest()).unwrap();
    assert_eq!(record.notation(), "e7e8@f8=N");
    assert_eq!(game.history().len(), 2);

    play(
        &mut game,
        &[
            "a4a5", "e8e7", "a5a4", "e7e6", "a4a5", "e6e5", "a5a4", "e5e4", "a4a5", "e4e3",
            "a5a4", "e3e2", "a4a5",
        ],
    );
    assert_eq!(
        game.position().king_states.get(Color::Light).phase(),
        SummonPhase::Summoned
    );

    play(&mut game, &["e2e1"]);
    let state = game.position().king_states.get(Color::Light);
    assert_eq!(state.phase(), SummonPhase::Ready);
    assert!(state.can_summon());

    // Back up the board; the summon is offered again on the next arrival.
    play(
        &mut game,
        &[
            "a5a4", "e1e2", "a4a5", "e2e3", "a5a4", "e3e4", "a4a5", "e4e5", "a5a4", "e5e6",
            "a4a5", "e6e7", "a5a4",
        ],
    );
    let outcome = game.attempt_move(sq("e7"), sq("e8"));
    assert_eq!(
        outcome,
        MoveOutcome::PendingSummon {
            king: sq("e8"),
            from: Some(sq("e7")),
            targets: vec![sq("d8")],
            color: Color::Light,
        }
    );
    assert!(game.resolve_summon(PieceKind::Rook, sq("d8")).is_applied());
    assert_eq!(
        game.position().king_states.get(Color::Light).phase(),
        SummonPhase::Summoned
    );
}

#[test]
fn branching_undo_drops_the_abandoned_line() {
    let mut game = Game::new_game();
    play(&mut game, &["e2e4", "e7e5", "g1f3"]);
    let abandoned = game.history().latest();

    game.undo().unwrap();
    assert_eq!(game.mode(), Mode::Playing);
    assert!(game.history().can_redo());

    play(&mut game, &["b1c3"]);
    assert!(game.history().node(abandoned).is_none());
    assert!(game.redo().is_none());

    let line: Vec<String> = game.history().main_line().iter().map(|r| r.notation()).collect();
    assert_eq!(line, vec!["e2e4", "e7e5", "b1c3"]);
    assert_eq!(game.history().current(), game.history().latest());
}

#[test]
fn undoing_two_moves_then_branching_drops_both() {
    let mut game = Game::new_game();
    play(&mut game, &["e2e4", "e7e5"]);
    let second = game.history().latest();
    play(&mut game, &["g1f3"]);
    let third = game.history().latest();

    game.undo().unwrap();
    game.undo().unwrap();
    assert_eq!(game.mode(), Mode::Playing);
    assert_eq!(game.position().side_to_move, Color::Dark);

    play(&mut game, &["d7d5"]);
    assert!(game.history().node(second).is_none());
    assert!(game.history().node(third).is_none());
    assert!(!game.history().can_redo());
    assert_eq!(game.history().len(), 3);

    let line: Vec<String> = game.history().main_line().iter().map(|r| r.notation()).collect();
    assert_eq!(line, vec!["e2e4", "d7d5"]);
}

#[test]
fn undo_then_redo_restores_the_position() {
    let mut game = Game::new_game();
    play(&mut game, &["e2e4", "d7d5"]);
    let before = game.position().clone();

    let undone = game.undo().unwrap().clone();
    assert_eq!(undone.side_to_move, Color::Dark);
    assert_eq!(undone.en_passant_square, Some(sq("e3")));

    let redone = game.redo().unwrap();
    assert_eq!(*redone, before);
    assert_eq!(redone.en_passant_square, Some(sq("d6")));
}

#[test]
fn review_mode_refuses_moves_until_back_at_the_tip() {
    let mut game = Game::new_game();
    play(&mut game, &["e2e4", "e7e5"]);

    let root = game.history().root();
    let shown = game.jump_to(root).unwrap();
    assert_eq!(*shown, hop_chess::game_state::game_state::GameState::new_game());
    assert_eq!(game.mode(), Mode::Reviewing);
    assert!(game.legal_moves(sq("d2")).is_empty());
    assert!(matches!(game.attempt_move(sq("d2"), sq("d4")), MoveOutcome::Rejected(_)));

    let latest = game.history().latest();
    game.jump_to(latest).unwrap();
    assert_eq!(game.mode(), Mode::Playing);
    play(&mut game, &["d2d4"]);
}
