//! Interactive hop chess demo.
//!
//! Usage:
//! `cargo run --bin hopchess`
//! `cargo run --bin hopchess -- --color white --fen "8/4K3/8/8/k7/8/8/8 w - - 0 1"`
//! `RUST_LOG=hop_chess=debug cargo run --bin hopchess -- --sync`
//!
//! Reads one command per line from stdin; `help` lists them.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hop_chess::game::config::{GameConfig, LocalSide};
use hop_chess::game::game::{Game, MoveOutcome};
use hop_chess::game_state::chess_types::{PieceKind, Square};
use hop_chess::moves::move_descriptions::MoveTarget;
use hop_chess::utils::algebraic::parse_coordinate_move;
use hop_chess::utils::render_game_state::render_game_state;

const HELP: &str = "\
commands:
  e2e4 | move e2e4         move a piece
  moves e2                 list legal targets of a piece
  promote q|r|b|n          finish a pending promotion
  summon e8                open a summon for a king on the enemy home rank
  summon q|r|b|n d8        finish a pending summon
  cancel                   drop a pending promotion or summon
  undo | redo | jump N     walk the history (N = ply on the main line)
  analyse | leave          open or close a local analysis line
  line                     list the analysis line
  status | board | fen | history | reset | help | quit";

#[derive(Debug, Parser)]
#[command(name = "hopchess", about = "Hop chess rules engine demo")]
struct HopChessArgs {
    /// Side this terminal controls: white, black or both.
    #[arg(short, long)]
    color: Option<String>,
    /// Starting position in FEN.
    #[arg(short, long)]
    fen: Option<String>,
    /// Print outgoing sync messages as JSON.
    #[arg(long)]
    sync: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = HopChessArgs::parse();
    let mut config = GameConfig::default().with_local_side(LocalSide::from_color_param(args.color.as_deref()));
    if let Some(fen) = args.fen {
        config = config.with_starting_fen(fen);
    }
    let mut game = Game::with_config(config)?;

    println!("{}", render_game_state(game.position()));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        if matches!(words[0], "quit" | "exit") {
            break;
        }

        match run_command(&mut game, &words) {
            Ok(text) => println!("{text}"),
            Err(text) => println!("error: {text}"),
        }
        for message in game.drain_outbox() {
            if args.sync {
                println!("sync: {}", message.to_json()?);
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn run_command(game: &mut Game, words: &[&str]) -> Result<String, String> {
    match words {
        ["help"] => Ok(HELP.to_owned()),
        ["board"] => Ok(render_game_state(game.position())),
        ["fen"] => Ok(game.position().get_fen()),
        ["status"] => Ok(format!("{:?}", game.status())),
        ["history"] => Ok(history_text(game)),
        ["analyse" | "analyze"] => Ok(render_game_state(game.start_analysis())),
        ["leave"] => {
            if game.leave_analysis() {
                Ok(render_game_state(game.position()))
            } else {
                Err("not analysing".to_owned())
            }
        }
        ["line"] => Ok(analysis_text(game)),
        ["reset"] => {
            game.reset();
            Ok(render_game_state(game.position()))
        }
        ["undo"] => game
            .undo()
            .map(render_game_state)
            .ok_or_else(|| "nothing to undo".to_owned()),
        ["redo"] => game
            .redo()
            .map(render_game_state)
            .ok_or_else(|| "nothing to redo".to_owned()),
        ["jump", ply] if game.analysis().is_some() => {
            let ply: usize = ply.parse().map_err(|_| format!("bad ply: {ply}"))?;
            game.jump_in_analysis(ply)
                .map(render_game_state)
                .ok_or_else(|| format!("no ply {ply}"))
        }
        ["jump", ply] => {
            let ply: usize = ply.parse().map_err(|_| format!("bad ply: {ply}"))?;
            let path = game.history().path_to(game.history().latest());
            let node = *path.get(ply).ok_or_else(|| format!("no ply {ply}"))?;
            game.jump_to(node)
                .map(render_game_state)
                .ok_or_else(|| "unknown node".to_owned())
        }
        ["moves", square] => {
            let square: Square = square.parse().map_err(|e| format!("{e}"))?;
            let listed: Vec<String> = game.legal_moves(square).iter().map(describe_target).collect();
            Ok(listed.join(" "))
        }
        ["promote", kind] => Ok(report(game, |g| Ok(g.resolve_promotion(piece_choice(kind)?)))),
        ["summon", square] => {
            let king: Square = square.parse().map_err(|e| format!("{e}"))?;
            Ok(report(game, |g| Ok(g.request_summon(king))))
        }
        ["summon", kind, square] => {
            let kind = piece_choice(kind)?;
            let target: Square = square.parse().map_err(|e| format!("{e}"))?;
            Ok(report(game, |g| Ok(g.resolve_summon(kind, target))))
        }
        ["cancel"] => Ok(report(game, |g| {
            Ok(match g.cancel_promotion() {
                MoveOutcome::Rejected(_) => g.cancel_summon(),
                outcome => outcome,
            })
        })),
        ["move", text] | [text] => {
            let (from, to) = parse_coordinate_move(text).map_err(|e| format!("{e}"))?;
            Ok(report(game, |g| Ok(g.attempt_move(from, to))))
        }
        _ => Err(format!("unknown command: {}", words.join(" "))),
    }
}

fn report(game: &mut Game, act: impl FnOnce(&mut Game) -> Result<MoveOutcome, String>) -> String {
    let outcome = match act(game) {
        Ok(outcome) => outcome,
        Err(text) => return format!("error: {text}"),
    };
    match outcome {
        MoveOutcome::Applied(_) | MoveOutcome::Analysed(_) => {
            let status = game.status();
            let mut text = render_game_state(game.position());
            if status.checkmate {
                text.push_str("\ncheckmate");
            } else if status.stalemate {
                text.push_str("\nstalemate");
            } else if status.check {
                text.push_str("\ncheck");
            }
            if let Some(draw) = status.draw {
                text.push('\n');
                text.push_str(&draw.message);
            }
            text
        }
        MoveOutcome::PendingPromotion { to, .. } => format!("promotion on {to}: promote q|r|b|n"),
        MoveOutcome::PendingSummon { king, targets, .. } => {
            let squares: Vec<String> = targets.iter().map(Square::to_string).collect();
            format!("king on {king} may summon onto {}: summon q|r|b|n <square>", squares.join(" "))
        }
        MoveOutcome::Cancelled => "cancelled".to_owned(),
        MoveOutcome::Rejected(rejection) => format!("rejected: {rejection}"),
    }
}

fn piece_choice(text: &str) -> Result<PieceKind, String> {
    let mut chars = text.chars();
    match (chars.next().and_then(PieceKind::from_letter), chars.next()) {
        (Some(kind), None) if kind.is_promotion_choice() => Ok(kind),
        _ => Err(format!("pick one of q, r, b, n (got {text})")),
    }
}

fn describe_target(target: &MoveTarget) -> String {
    match target {
        MoveTarget::Step(to) => to.to_string(),
        MoveTarget::Castle(castle) => format!("{}(castle)", castle.king_to),
        MoveTarget::Summon(square) => format!("{square}(summon)"),
    }
}

fn history_text(game: &Game) -> String {
    let line: Vec<String> = game
        .history()
        .main_line()
        .iter()
        .enumerate()
        .map(|(ply, record)| format!("{}. {}", ply + 1, record.notation()))
        .collect();
    if line.is_empty() {
        "no moves yet".to_owned()
    } else {
        line.join("\n")
    }
}

fn analysis_text(game: &Game) -> String {
    let Some(line) = game.analysis() else {
        return "not analysing".to_owned();
    };
    let moves: Vec<String> = line
        .moves()
        .iter()
        .enumerate()
        .map(|(ply, record)| {
            let marker = if ply + 1 == line.ply() { "*" } else { " " };
            format!("{marker}{}. {}", ply + 1, record.notation())
        })
        .collect();
    if moves.is_empty() {
        "analysis line is empty".to_owned()
    } else {
        moves.join("\n")
    }
}
