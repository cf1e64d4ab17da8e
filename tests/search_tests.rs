use std::str::FromStr;

use chess::{Board, ChessMove, MoveGen, Square};
use tablero::ordering::{captures_first, is_capture};
use tablero::{is_game_over, Search, INF, MATE};

const SCHOLARS: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
const PRE_FOOLS: &str = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
const ITALIAN: &str = "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
const RUY: &str = "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn board(fen: &str) -> Board {
    Board::from_str(fen).expect("valid FEN")
}

// Same tree walk as the real searcher, minus the pruning. The alpha-beta
// result must match this one exactly.
fn negamax_unpruned(search: &Search, b: &Board, depth: i32) -> i32 {
    if depth <= 0 || is_game_over(b) {
        return search.evaluate(b);
    }
    let mut max = -INF;
    for m in captures_first(b) {
        let nb = b.make_move_new(m);
        let score = -negamax_unpruned(search, &nb, depth - 1);
        if score > max {
            max = score;
        }
    }
    max
}

fn choose_unpruned(search: &Search, b: &Board, depth: i32) -> (Option<ChessMove>, i32) {
    let mut best = None;
    let mut best_score = -INF;
    for m in captures_first(b) {
        let nb = b.make_move_new(m);
        let score = -negamax_unpruned(search, &nb, depth - 1);
        if score > best_score {
            best_score = score;
            best = Some(m);
        }
    }
    (best, best_score)
}

#[test]
fn repeated_searches_agree() {
    let b = board(ITALIAN);
    let first = Search::new().choose_move(&b, 3);
    let second = Search::new().choose_move(&b, 3);
    assert_eq!(first, second, "fresh searchers must agree");

    let mut reused = Search::new();
    let once = reused.choose_move(&b, 3);
    let again = reused.choose_move(&b, 3);
    assert_eq!(once, again, "a reused searcher must agree with itself");
}

#[test]
fn no_state_leaks_between_positions() {
    let a = board(ITALIAN);
    let c = board(RUY);
    let mut search = Search::new();
    let fresh = Search::new().choose_move(&a, 2);
    search.choose_move(&c, 2);
    assert_eq!(search.choose_move(&a, 2), fresh);
}

#[test]
fn search_leaves_the_position_untouched() {
    let b = board(ITALIAN);
    let before = b.to_string();
    let mut search = Search::new();
    search.choose_move(&b, 3);
    search.negamax(&b, 2, -INF, INF);
    assert_eq!(b.to_string(), before);
}

#[test]
fn depth_zero_reduces_to_the_evaluation() {
    for fen in [ITALIAN, RUY, SCHOLARS] {
        let b = board(fen);
        let mut search = Search::new();
        assert_eq!(search.negamax(&b, 0, -INF, INF), search.evaluate(&b));
    }
    let b = Board::default();
    let mut search = Search::new();
    assert_eq!(search.negamax(&b, 0, -INF, INF), search.evaluate(&b));
}

#[test]
fn pruning_does_not_change_the_result() {
    for (fen, depth) in [(ITALIAN, 2), (RUY, 2), (SCHOLARS, 2)] {
        let b = board(fen);
        let mut search = Search::new();
        let pruned = search.choose_move(&b, depth);
        let reference = choose_unpruned(&search, &b, depth);
        assert_eq!(pruned, reference, "alpha-beta diverged on {fen}");
    }
    let b = Board::default();
    let mut search = Search::new();
    assert_eq!(search.choose_move(&b, 3), choose_unpruned(&search, &b, 3));
}

#[test]
fn finds_mate_in_one_as_white() {
    let b = board(SCHOLARS);
    let mating = ChessMove::new(Square::F3, Square::F7, None);
    for depth in 1..=3 {
        let (best, score) = Search::new().choose_move(&b, depth);
        assert_eq!(best, Some(mating), "depth {depth} missed the mate");
        assert_eq!(score, MATE);
    }
}

#[test]
fn finds_mate_in_one_as_black() {
    let b = board(PRE_FOOLS);
    let mating = ChessMove::new(Square::D8, Square::H4, None);
    for depth in 1..=2 {
        let (best, score) = Search::new().choose_move(&b, depth);
        assert_eq!(best, Some(mating), "depth {depth} missed the mate");
        assert_eq!(score, MATE);
    }
}

#[test]
fn no_legal_moves_reports_none() {
    let mated = board(FOOLS_MATE);
    let (best, score) = Search::new().choose_move(&mated, 3);
    assert_eq!(best, None);
    assert_eq!(score, -INF);

    let stalemated = board("5k2/5P2/5K2/8/8/8/8/8 b - - 0 1");
    let (best, _) = Search::new().choose_move(&stalemated, 3);
    assert_eq!(best, None);
}

#[test]
fn ordering_is_a_stable_capture_partition() {
    let b = board(RUY);
    let generated: Vec<ChessMove> = MoveGen::new_legal(&b).collect();
    let mut expected: Vec<ChessMove> = generated
        .iter()
        .copied()
        .filter(|&m| is_capture(&b, m))
        .collect();
    let n_captures = expected.len();
    expected.extend(generated.iter().copied().filter(|&m| !is_capture(&b, m)));

    let ordered = captures_first(&b);
    assert_eq!(ordered, expected);
    assert_eq!(n_captures, 2, "Bxc6 and Nxe5");
    assert!(ordered[..n_captures].iter().all(|&m| is_capture(&b, m)));
}

#[test]
fn en_passant_counts_as_a_capture() {
    let b = board("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let ep = ChessMove::new(Square::E5, Square::F6, None);
    assert!(
        MoveGen::new_legal(&b).any(|m| m == ep),
        "en passant should be legal here"
    );
    assert!(is_capture(&b, ep));
    assert!(!is_capture(&b, ChessMove::new(Square::E5, Square::E6, None)));
}
