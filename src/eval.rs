use chess::{Board, BoardStatus, MoveGen};

use crate::types::*;

/// Material + piece-square evaluation from the side to move's point of view.
///
/// Scores are in half-centipawns: the mobility term is worth half a pawn step
/// per legal move, and doubling the material sum keeps everything integral.
pub struct MaterialEval;

impl MaterialEval {
    pub fn eval(&self, b: &Board) -> i32 {
        match b.status() {
            BoardStatus::Checkmate => return -MATE,
            BoardStatus::Stalemate => return 0,
            BoardStatus::Ongoing => {}
        }
        if insufficient_material(b) { return 0; }
        if halfmove_clock_from_fen(b) >= 100 { return 0; }

        let us = b.side_to_move();
        let mut score = 0i32;
        for sq in *b.combined() {
            let (piece, color) = match (b.piece_on(sq), b.color_on(sq)) {
                (Some(p), Some(c)) => (p, c),
                _ => continue,
            };
            let sgn = if color == us { 1 } else { -1 };
            score += sgn * (piece_val(piece) + pst_for(piece, pst_index_for(color, sq)));
        }

        // Mobility counts against the mover, half a pawn per legal reply.
        let mobility = MoveGen::new_legal(b).len() as i32;
        score * 2 - mobility
    }
}
