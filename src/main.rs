use std::io::{self, BufRead, Write};

use anyhow::Result;
use chess::{Board, BoardStatus, ChessMove, Color, File, Game, MoveGen, Piece, Rank, Square};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tablero::search::Search;
use tablero::types::{insufficient_material, parse_coord_move, DEFAULT_DEPTH, MAX_DEPTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// human vs human
    Hvh,
    /// human vs machine
    Hva,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(s: Side) -> Color {
        match s {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tablero", about = "Terminal chess against a fixed-depth negamax opponent")]
struct Args {
    /// Play against another human (hvh) or against the machine (hva)
    #[arg(long, value_enum, default_value_t = Mode::Hva)]
    mode: Mode,

    /// Side the human plays when facing the machine
    #[arg(long, value_enum, default_value_t = Side::White)]
    color: Side,

    /// Search depth; values outside 1..=4 are clamped
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: i32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let depth = args.depth.clamp(1, MAX_DEPTH);
    if depth != args.depth {
        eprintln!("depth {} out of range, playing at depth {}", args.depth, depth);
    }
    let human: Color = args.color.into();
    let flipped = args.mode == Mode::Hva && human == Color::Black;

    let mut game = Game::new();
    let mut search = Search::new();
    let mut log: Vec<String> = Vec::new();

    println!("commands: a coordinate move (e2e4, e7e8q), moves, eval, new, quit");
    if args.mode == Mode::Hva && human == Color::Black {
        machine_move(&mut game, &mut search, depth, &mut log);
    }
    render(&game, flipped);

    let stdin = io::stdin();
    let mut out = io::stdout();
    prompt(&mut out)?;
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" => break,
            "new" => {
                game = Game::new();
                log.clear();
                if args.mode == Mode::Hva && human == Color::Black {
                    machine_move(&mut game, &mut search, depth, &mut log);
                }
                render(&game, flipped);
            }
            "moves" => print_log(&log),
            "eval" => {
                let score = search.evaluate(&game.current_position());
                println!("static eval: {score} (half-centipawns, side to move)");
            }
            cmd => {
                if game_over(&game) {
                    println!("the game is over, type new to restart");
                } else if args.mode == Mode::Hva && game.side_to_move() != human {
                    println!("it is not your turn");
                } else {
                    match resolve_move(&game.current_position(), cmd) {
                        Err(e) => println!("{e}"),
                        Ok(mv) => {
                            game.make_move(mv);
                            log.push(mv.to_string());
                            if game.can_declare_draw() {
                                game.declare_draw();
                            }
                            if !game_over(&game)
                                && args.mode == Mode::Hva
                                && game.side_to_move() != human
                            {
                                machine_move(&mut game, &mut search, depth, &mut log);
                            }
                            render(&game, flipped);
                        }
                    }
                }
            }
        }
        prompt(&mut out)?;
    }

    Ok(())
}

fn prompt(out: &mut io::Stdout) -> Result<()> {
    print!("> ");
    out.flush()?;
    Ok(())
}

/// Search and play the machine's reply. Does nothing when no legal move
/// exists; the caller reports the result through the status line.
fn machine_move(game: &mut Game, search: &mut Search, depth: i32, log: &mut Vec<String>) {
    let board = game.current_position();
    let (best, _score) = search.choose_move(&board, depth);
    if let Some(m) = best {
        println!("machine plays {m}");
        game.make_move(m);
        log.push(m.to_string());
        if game.can_declare_draw() {
            game.declare_draw();
        }
    }
}

/// Parse an entered move and check it against the position. A bare pawn push
/// to the last rank promotes to a queen, so `e7e8` means `e7e8q`.
fn resolve_move(b: &Board, input: &str) -> Result<ChessMove, String> {
    let mv = parse_coord_move(input).map_err(|e| e.to_string())?;
    if is_legal(b, mv) {
        return Ok(mv);
    }
    if mv.get_promotion().is_none() {
        let queening = ChessMove::new(mv.get_source(), mv.get_dest(), Some(Piece::Queen));
        if is_legal(b, queening) {
            return Ok(queening);
        }
    }
    Err(format!("illegal move {input}"))
}

fn is_legal(b: &Board, mv: ChessMove) -> bool {
    MoveGen::new_legal(b).any(|m| m == mv)
}

fn game_over(game: &Game) -> bool {
    game.result().is_some()
        || game.current_position().status() != BoardStatus::Ongoing
        || insufficient_material(&game.current_position())
}

fn status_text(game: &Game) -> String {
    let b = game.current_position();
    match b.status() {
        BoardStatus::Checkmate => {
            let winner = if b.side_to_move() == Color::White { "black" } else { "white" };
            format!("checkmate, {winner} wins")
        }
        BoardStatus::Stalemate => "stalemate, draw".to_string(),
        BoardStatus::Ongoing => {
            if game.result().is_some() || insufficient_material(&b) {
                "draw".to_string()
            } else {
                let side = if b.side_to_move() == Color::White { "white" } else { "black" };
                if b.checkers().popcnt() > 0 {
                    format!("check, {side} to move")
                } else {
                    format!("{side} to move")
                }
            }
        }
    }
}

/// Print the board with the human's side at the bottom.
fn render(game: &Game, flipped: bool) {
    let b = game.current_position();
    for rr in 0..8 {
        let rank = if flipped { rr } else { 7 - rr };
        print!("{} ", rank + 1);
        for cc in 0..8 {
            let file = if flipped { 7 - cc } else { cc };
            let sq = Square::make_square(Rank::from_index(rank), File::from_index(file));
            match (b.piece_on(sq), b.color_on(sq)) {
                (Some(p), Some(c)) => print!("{} ", glyph(p, c)),
                _ => print!("· "),
            }
        }
        println!();
    }
    print!("  ");
    for cc in 0..8 {
        let file = if flipped { 7 - cc } else { cc };
        print!("{} ", (b'a' + file as u8) as char);
    }
    println!();
    println!("{}", status_text(game));
}

fn glyph(piece: Piece, color: Color) -> char {
    match (color, piece) {
        (Color::White, Piece::Pawn) => '♙',
        (Color::White, Piece::Rook) => '♖',
        (Color::White, Piece::Knight) => '♘',
        (Color::White, Piece::Bishop) => '♗',
        (Color::White, Piece::Queen) => '♕',
        (Color::White, Piece::King) => '♔',
        (Color::Black, Piece::Pawn) => '♟',
        (Color::Black, Piece::Rook) => '♜',
        (Color::Black, Piece::Knight) => '♞',
        (Color::Black, Piece::Bishop) => '♝',
        (Color::Black, Piece::Queen) => '♛',
        (Color::Black, Piece::King) => '♚',
    }
}

fn print_log(log: &[String]) {
    if log.is_empty() {
        println!("(no moves yet)");
        return;
    }
    for (i, pair) in log.chunks(2).enumerate() {
        match pair {
            [w, b] => println!("{}. {} {}", i + 1, w, b),
            [w] => println!("{}. {}", i + 1, w),
            _ => {}
        }
    }
}
