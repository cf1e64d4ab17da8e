use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, Color, Piece, Square};
use thiserror::Error;

// ---------------------------
// Tunables / constants
// ---------------------------
pub const DEFAULT_DEPTH: i32 = 3;
pub const MAX_DEPTH: i32 = 4;
pub const INF: i32 = 60_000;
pub const MATE: i32 = 30_000;

// Piece values (centipawns)
pub const P: i32 = 100;
pub const N: i32 = 320;
pub const B: i32 = 330;
pub const R_: i32 = 500;
pub const Q_: i32 = 900;

// ---------------------------
// Piece-square tables
// ---------------------------
// Stored from white's point of view, rank 8 first. Black reads the same
// tables through the rotated index, see `pst_index_for`.
pub const PST_PAWN: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];
pub const PST_KNIGHT: [i32; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];
pub const PST_BISHOP: [i32; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];
pub const PST_ROOK: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];
pub const PST_QUEEN: [i32; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5,  5,  5,  5,  0,-10,
    -5,  0,  5,  5,  5,  5,  0, -5,
     0,  0,  5,  5,  5,  5,  0, -5,
   -10,  5,  5,  5,  5,  5,  0,-10,
   -10,  0,  5,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];
pub const PST_KING: [i32; 64] = [
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -10,-20,-20,-20,-20,-20,-20,-10,
    20, 20,  0,  0,  0,  0, 20, 20,
    20, 30, 10,  0,  0, 10, 30, 20,
];

#[inline] pub fn pst_for(piece: Piece, idx: usize) -> i32 {
    match piece {
        Piece::Pawn => PST_PAWN[idx],
        Piece::Knight => PST_KNIGHT[idx],
        Piece::Bishop => PST_BISHOP[idx],
        Piece::Rook => PST_ROOK[idx],
        Piece::Queen => PST_QUEEN[idx],
        Piece::King => PST_KING[idx],
    }
}

/// Table index for a piece of `color` on `sq`. White reads the tables as
/// stored; black reads through a 180° rotation of the board.
#[inline] pub fn pst_index_for(color: Color, sq: Square) -> usize {
    let rank = sq.get_rank().to_index();
    let file = sq.get_file().to_index();
    let idx = (7 - rank) * 8 + file;
    if color == Color::White { idx } else { 63 - idx }
}

// ---------------------------
// Small helpers
// ---------------------------
#[inline] pub fn piece_val(pc: Piece) -> i32 {
    match pc {
        Piece::Pawn => P, Piece::Knight => N, Piece::Bishop => B,
        Piece::Rook => R_, Piece::Queen => Q_, Piece::King => 0,
    }
}
#[inline] pub fn opp(c: Color) -> Color { if c == Color::White { Color::Black } else { Color::White } }

#[inline]
pub fn halfmove_clock_from_fen(b: &Board) -> u32 {
    let fen = b.to_string();
    fen.split_whitespace().nth(4).and_then(|s| s.parse::<u32>().ok()).unwrap_or(0)
}

pub fn insufficient_material(b: &Board) -> bool {
    let no_pawns = (b.pieces(Piece::Pawn)).popcnt() == 0;
    let no_rooks = (b.pieces(Piece::Rook)).popcnt() == 0;
    let no_queens = (b.pieces(Piece::Queen)).popcnt() == 0;
    if no_pawns && no_rooks && no_queens {
        let minors = |c: Color| {
            (b.pieces(Piece::Knight) & b.color_combined(c)).popcnt() as i32
          + (b.pieces(Piece::Bishop) & b.color_combined(c)).popcnt() as i32
        };
        return minors(Color::White) <= 1 && minors(Color::Black) <= 1;
    }
    false
}

/// True when the board itself already decides the game: mate, stalemate,
/// or a board-local draw. Repetition needs move history and is tracked by
/// the game layer, not here.
#[inline]
pub fn is_game_over(b: &Board) -> bool {
    b.status() != BoardStatus::Ongoing
        || insufficient_material(b)
        || halfmove_clock_from_fen(b) >= 100
}

// ---------------------------
// Coordinate move parsing
// ---------------------------
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected a coordinate move like e2e4 or e7e8q, got {0:?}")]
    Malformed(String),
    #[error("bad square {0:?}")]
    BadSquare(String),
    #[error("bad promotion piece {0:?} (use q, r, b or n)")]
    BadPromotion(char),
}

pub fn parse_coord_move(s: &str) -> Result<ChessMove, ParseMoveError> {
    if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
        return Err(ParseMoveError::Malformed(s.to_string()));
    }
    let from = Square::from_str(&s[0..2])
        .map_err(|_| ParseMoveError::BadSquare(s[0..2].to_string()))?;
    let to = Square::from_str(&s[2..4])
        .map_err(|_| ParseMoveError::BadSquare(s[2..4].to_string()))?;
    let promo = match s[4..].chars().next() {
        None => None,
        Some('q') => Some(Piece::Queen),
        Some('r') => Some(Piece::Rook),
        Some('b') => Some(Piece::Bishop),
        Some('n') => Some(Piece::Knight),
        Some(c) => return Err(ParseMoveError::BadPromotion(c)),
    };
    Ok(ChessMove::new(from, to, promo))
}
