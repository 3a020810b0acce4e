//! Plain-text rendering for the terminal

use shared::{Board, Outcome, BOARD_SIZE};

/// Draws the board with row and column indices around it.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("    0 1 2\n");
    for (row, text) in board.to_string().lines().enumerate() {
        out.push_str(&format!("{}   {}", row, text));
        if row + 1 < BOARD_SIZE {
            out.push('\n');
        }
    }
    out
}

pub fn outcome_banner(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Ongoing => None,
        Outcome::PlayerWins => Some("You win!"),
        Outcome::EngineWins => Some("Server wins!"),
        Outcome::Tie => Some("Tie!"),
    }
}
