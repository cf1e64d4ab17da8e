use chess::{Board, ChessMove, MoveGen, Piece};

use crate::types::opp;

/// Capture test for a legal move. The destination-occupancy check misses
/// en passant (the captured pawn is not on the destination square), so that
/// case is caught by its shape: the only legal pawn move that goes
/// diagonally onto an empty square.
#[inline]
pub fn is_capture(b: &Board, mv: ChessMove) -> bool {
    let to = mv.get_dest();
    if b.color_on(to) == Some(opp(b.side_to_move())) { return true; }
    b.piece_on(mv.get_source()) == Some(Piece::Pawn)
        && mv.get_source().get_file() != to.get_file()
        && b.piece_on(to).is_none()
}

/// All legal moves with captures hoisted to the front. The sort is stable,
/// so generation order is preserved within each group.
pub fn captures_first(b: &Board) -> Vec<ChessMove> {
    let mut moves: Vec<ChessMove> = MoveGen::new_legal(b).collect();
    moves.sort_by_key(|&m| !is_capture(b, m));
    moves
}
