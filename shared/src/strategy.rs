//! One-ply move heuristic for the engine side
//!
//! The decision is an ordered list of rules. Each rule either proposes a move
//! or declines, and the first proposal wins:
//!
//! 1. [`Rule::WinNow`] completes a line holding two of our marks
//! 2. [`Rule::Block`] fills the gap in a line holding two opponent marks
//! 3. [`Rule::Opening`] answers the opponent's first move (corner -> center,
//!    anything else -> top-left corner)
//! 4. [`Rule::Random`] picks uniformly among the empty cells
//!
//! With a single opponent mark on the board neither `WinNow` nor `Block` can
//! fire, so the opening rule still governs the engine's first reply.

use crate::board::{Board, Cell, Line, Mark, Move, CELL_COUNT};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const CENTER: Move = Move::at(1, 1);
const TOP_LEFT: Move = Move::at(0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    WinNow,
    Block,
    Opening,
    Random,
}

impl Rule {
    /// Evaluation order of the heuristic
    pub const ORDER: [Rule; 4] = [Rule::WinNow, Rule::Block, Rule::Opening, Rule::Random];

    /// Returns the move this rule would play, or `None` if it does not apply.
    pub fn propose<R: Rng + ?Sized>(self, board: &Board, own: Mark, rng: &mut R) -> Option<Move> {
        match self {
            Rule::WinNow => completing_move(board, own),
            Rule::Block => completing_move(board, own.opponent()),
            Rule::Opening => opening_reply(board, own.opponent()),
            Rule::Random => board.empty_cells().choose(rng).copied(),
        }
    }
}

/// A chosen move together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub rule: Rule,
}

/// Picks the move for `own` on `board`; the opponent is `own.opponent()`.
///
/// # Panics
/// If the board has no empty cell. The caller must stop once the outcome is
/// no longer ongoing.
pub fn decide<R: Rng + ?Sized>(board: &Board, own: Mark, rng: &mut R) -> Decision {
    assert!(
        board.count_empty() > 0,
        "choose_move called on a full board"
    );

    Rule::ORDER
        .into_iter()
        .find_map(|rule| {
            rule.propose(board, own, &mut *rng)
                .map(|mv| Decision { mv, rule })
        })
        .expect("random rule always proposes when a cell is empty")
}

pub fn choose_move<R: Rng + ?Sized>(board: &Board, own: Mark, rng: &mut R) -> Move {
    decide(board, own, rng).mv
}

/// First line, in [`Line::ALL`] order, with two `mark` cells and one empty cell.
fn completing_move(board: &Board, mark: Mark) -> Option<Move> {
    Line::ALL.into_iter().find_map(|line| {
        let moves = line.moves();
        let owned = moves.iter().filter(|mv| board.get(**mv) == mark.cell()).count();
        let mut empty = moves.iter().filter(|mv| board.get(**mv) == Cell::Empty);

        match (owned, empty.next(), empty.next()) {
            (2, Some(mv), None) => Some(*mv),
            _ => None,
        }
    })
}

fn opening_reply(board: &Board, opponent: Mark) -> Option<Move> {
    if board.count_empty() != CELL_COUNT - 1 {
        return None;
    }

    match board.cells_with(opponent).as_slice() {
        [first] if first.is_corner() => Some(CENTER),
        [_] => Some(TOP_LEFT),
        _ => None,
    }
}

/// Heuristic player owning its own random source
#[derive(Debug)]
pub struct Strategist<R = StdRng> {
    own: Mark,
    rng: R,
}

impl Strategist<StdRng> {
    pub fn from_entropy(own: Mark) -> Self {
        Self::new(own, StdRng::from_entropy())
    }

    /// Reproducible strategist; the same seed replays the same random fallbacks.
    pub fn seeded(own: Mark, seed: u64) -> Self {
        Self::new(own, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Strategist<R> {
    pub fn new(own: Mark, rng: R) -> Self {
        Self { own, rng }
    }

    pub fn mark(&self) -> Mark {
        self.own
    }

    pub fn decide(&mut self, board: &Board) -> Decision {
        decide(board, self.own, &mut self.rng)
    }

    pub fn choose_move(&mut self, board: &Board) -> Move {
        self.decide(board).mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{apply_move, evaluate_outcome, is_legal_move, Outcome};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn board_with(player: &[(usize, usize)], engine: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(row, col) in player {
            board.set_cell(row, col, Cell::PlayerMark).unwrap();
        }
        for &(row, col) in engine {
            board.set_cell(row, col, Cell::EngineMark).unwrap();
        }
        board
    }

    #[test]
    fn test_opening_corner_gets_center() {
        for corner in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            let board = board_with(&[corner], &[]);
            let decision = decide(&board, Mark::Engine, &mut rng());
            assert_eq!(decision.mv, Move::at(1, 1));
            assert_eq!(decision.rule, Rule::Opening);
        }
    }

    #[test]
    fn test_opening_edge_gets_top_left() {
        let board = board_with(&[(0, 1)], &[]);
        assert_eq!(
            choose_move(&board, Mark::Engine, &mut rng()),
            Move::at(0, 0)
        );

        let center = board_with(&[(1, 1)], &[]);
        assert_eq!(
            choose_move(&center, Mark::Engine, &mut rng()),
            Move::at(0, 0)
        );
    }

    #[test]
    fn test_opening_ignores_own_single_mark() {
        let board = board_with(&[], &[(0, 1)]);
        assert_eq!(opening_reply(&board, Mark::Player), None);
    }

    #[test]
    fn test_win_now_completes_row() {
        let board = board_with(&[], &[(0, 0), (0, 1)]);
        let decision = decide(&board, Mark::Engine, &mut rng());
        assert_eq!(decision.mv, Move::at(0, 2));
        assert_eq!(decision.rule, Rule::WinNow);
    }

    #[test]
    fn test_win_beats_block() {
        let board = board_with(&[(2, 0), (2, 1), (1, 0)], &[(0, 0), (0, 1)]);
        assert_eq!(
            choose_move(&board, Mark::Engine, &mut rng()),
            Move::at(0, 2)
        );
    }

    #[test]
    fn test_block_fills_gap() {
        let board = board_with(&[(1, 0), (1, 1)], &[(0, 0)]);
        let decision = decide(&board, Mark::Engine, &mut rng());
        assert_eq!(decision.mv, Move::at(1, 2));
        assert_eq!(decision.rule, Rule::Block);
    }

    #[test]
    fn test_scan_prefers_rows_then_columns_then_diagonals() {
        // Column 2 and the anti-diagonal both have a gap; the column comes first.
        let board = board_with(&[(1, 0)], &[(0, 2), (1, 2), (1, 1)]);
        assert_eq!(completing_move(&board, Mark::Engine), Some(Move::at(2, 2)));

        // Only the anti-diagonal (0,2),(1,1),(2,0) has a gap.
        let anti = board_with(&[(0, 0)], &[(0, 2), (1, 1)]);
        assert_eq!(completing_move(&anti, Mark::Engine), Some(Move::at(2, 0)));

        let full_line = board_with(&[(0, 2)], &[(0, 0), (0, 1)]);
        assert_eq!(completing_move(&full_line, Mark::Engine), None);
    }

    #[test]
    fn test_random_fallback_is_legal() {
        let board = board_with(&[(0, 0), (2, 1)], &[(1, 1), (0, 1)]);
        // No line holds two of either mark next to a gap.
        let mut rng = rng();
        for _ in 0..50 {
            let mv = choose_move(&board, Mark::Engine, &mut rng);
            assert!(is_legal_move(&board, mv.row() as i64, mv.col() as i64));
        }
    }

    #[test]
    fn test_random_only_choice() {
        let board = board_with(
            &[(0, 0), (0, 2), (1, 0), (2, 1)],
            &[(0, 1), (1, 1), (1, 2), (2, 0)],
        );
        assert_eq!(evaluate_outcome(&board), Outcome::Ongoing);
        assert_eq!(
            choose_move(&board, Mark::Engine, &mut rng()),
            Move::at(2, 2)
        );
    }

    #[test]
    #[should_panic(expected = "full board")]
    fn test_choose_move_on_full_board_panics() {
        let board = board_with(
            &[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)],
            &[(0, 1), (1, 1), (1, 2), (2, 0)],
        );
        choose_move(&board, Mark::Engine, &mut rng());
    }

    #[test]
    fn test_seeded_strategists_agree() {
        let board = board_with(&[(0, 0), (2, 1)], &[(1, 1), (0, 1)]);
        let mut a = Strategist::seeded(Mark::Engine, 42);
        let mut b = Strategist::seeded(Mark::Engine, 42);
        for _ in 0..10 {
            assert_eq!(a.choose_move(&board), b.choose_move(&board));
        }
    }

    #[test]
    fn test_self_play_always_terminates_legally() {
        let mut engine = Strategist::seeded(Mark::Engine, 1);
        let mut player = Strategist::seeded(Mark::Player, 2);

        for _ in 0..20 {
            let mut board = Board::new();
            let mut outcome = Outcome::Ongoing;
            let mut turn = Mark::Player;

            while !outcome.is_over() {
                let strategist = match turn {
                    Mark::Player => &mut player,
                    Mark::Engine => &mut engine,
                };
                let mv = strategist.choose_move(&board);
                assert!(is_legal_move(&board, mv.row() as i64, mv.col() as i64));
                apply_move(&mut board, mv, turn);
                outcome = evaluate_outcome(&board);
                turn = turn.opponent();
            }
        }
    }
}
