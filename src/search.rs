use chess::{Board, ChessMove};

use crate::eval::MaterialEval;
use crate::ordering::captures_first;
use crate::types::{is_game_over, INF};

/// Fixed-depth negamax with alpha-beta pruning.
///
/// The search never touches the caller's board: children are fresh copies
/// made with `Board::make_move_new`, so the position passed in is unchanged
/// when the search returns.
pub struct Search {
    pub nodes: u64,
    eval: MaterialEval,
}

impl Search {
    pub fn new() -> Self {
        Self { nodes: 0, eval: MaterialEval }
    }

    #[inline] pub fn evaluate(&self, b: &Board) -> i32 { self.eval.eval(b) }

    /// Root entry point: the best legal move for the side to move and its
    /// score, or `(None, -INF)` when there is no legal move (the caller
    /// already knows whether that means mate or stalemate).
    ///
    /// Each root move is searched with a fresh full window; ties keep the
    /// first move found, so the result is deterministic under the stable
    /// capture-first ordering.
    pub fn choose_move(&mut self, b: &Board, depth: i32) -> (Option<ChessMove>, i32) {
        self.nodes = 0;
        let mut best_move: Option<ChessMove> = None;
        let mut best_score = -INF;

        for m in captures_first(b) {
            let nb = b.make_move_new(m);
            let score = -self.negamax(&nb, depth - 1, -INF, INF);
            tracing::trace!(mv = %m, score, "root move");
            if score > best_score {
                best_score = score;
                best_move = Some(m);
            }
        }

        tracing::debug!(
            depth,
            nodes = self.nodes,
            best = %best_move.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
            score = best_score,
            "search finished"
        );
        (best_move, best_score)
    }

    pub fn negamax(&mut self, b: &Board, depth: i32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes = self.nodes.wrapping_add(1);

        if depth <= 0 || is_game_over(b) {
            return self.evaluate(b);
        }

        let mut max = -INF;
        for m in captures_first(b) {
            let nb = b.make_move_new(m);
            let score = -self.negamax(&nb, depth - 1, -beta, -alpha);
            if score > max { max = score; }
            if score > alpha { alpha = score; }
            if alpha >= beta { break; }
        }
        max
    }
}

impl Default for Search {
    fn default() -> Self { Self::new() }
}
