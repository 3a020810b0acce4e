//! Client-side mirror of the server's board

use log::debug;
use shared::{
    apply_move, evaluate_outcome, validate_move, Board, IllegalMove, Mark, Message, MoveRequest,
    Outcome,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("server accepted a move we never sent")]
    UnexpectedAcceptance,
    #[error("server move does not fit the local board: {0}")]
    Diverged(#[from] IllegalMove),
    #[error("server reported {reported:?} but the local board says {local:?}")]
    OutcomeMismatch { reported: Outcome, local: Outcome },
}

/// What the server said about our last move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Rejected,
    Accepted(Outcome),
}

#[derive(Debug, Default)]
pub struct ClientGameState {
    board: Board,
    pending: Option<MoveRequest>,
    moves: usize,
}

impl ClientGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Remembers the move we are about to send so the reply can be applied.
    pub fn submit(&mut self, request: MoveRequest) {
        self.pending = Some(request);
    }

    /// Applies the server's verdict on the pending move.
    pub fn apply_validation(&mut self, message: &Message) -> Result<Verdict, SyncError> {
        let pending = self.pending.take();
        if message.error {
            debug!("Server rejected {:?}", pending);
            return Ok(Verdict::Rejected);
        }

        let request = pending.ok_or(SyncError::UnexpectedAcceptance)?;
        let outcome = self.place(request.row, request.col, Mark::Player, message.winner)?;
        Ok(Verdict::Accepted(outcome))
    }

    /// Applies the engine's reply move.
    pub fn apply_engine(&mut self, message: &Message) -> Result<Outcome, SyncError> {
        self.place(message.step[0], message.step[1], Mark::Engine, message.winner)
    }

    fn place(
        &mut self,
        row: i64,
        col: i64,
        mark: Mark,
        reported: Outcome,
    ) -> Result<Outcome, SyncError> {
        let mv = validate_move(&self.board, row, col)?;
        apply_move(&mut self.board, mv, mark);
        self.moves += 1;

        let local = evaluate_outcome(&self.board);
        if local != reported {
            return Err(SyncError::OutcomeMismatch { reported, local });
        }
        Ok(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Cell;

    fn server_reply(step: [i64; 2], winner: Outcome, error: bool) -> Message {
        Message { step, winner, error }
    }

    #[test]
    fn test_accepted_move_is_mirrored() {
        let mut game = ClientGameState::new();
        game.submit(MoveRequest { row: 0, col: 0 });

        let verdict = game
            .apply_validation(&server_reply([0, 0], Outcome::Ongoing, false))
            .unwrap();
        assert_eq!(verdict, Verdict::Accepted(Outcome::Ongoing));
        assert_eq!(game.board().cell_at(0, 0), Ok(Cell::PlayerMark));

        let outcome = game
            .apply_engine(&server_reply([1, 1], Outcome::Ongoing, false))
            .unwrap();
        assert_eq!(outcome, Outcome::Ongoing);
        assert_eq!(game.board().cell_at(1, 1), Ok(Cell::EngineMark));
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn test_rejected_move_leaves_board_alone() {
        let mut game = ClientGameState::new();
        game.submit(MoveRequest { row: 7, col: 7 });

        let verdict = game
            .apply_validation(&server_reply([7, 7], Outcome::Ongoing, true))
            .unwrap();
        assert_eq!(verdict, Verdict::Rejected);
        assert_eq!(game.board().count_empty(), 9);
    }

    #[test]
    fn test_acceptance_without_pending_move() {
        let mut game = ClientGameState::new();
        let result = game.apply_validation(&server_reply([0, 0], Outcome::Ongoing, false));
        assert_eq!(result, Err(SyncError::UnexpectedAcceptance));
    }

    #[test]
    fn test_engine_move_on_occupied_cell_diverges() {
        let mut game = ClientGameState::new();
        game.submit(MoveRequest { row: 2, col: 2 });
        game.apply_validation(&server_reply([2, 2], Outcome::Ongoing, false))
            .unwrap();

        let result = game.apply_engine(&server_reply([2, 2], Outcome::Ongoing, false));
        assert!(matches!(result, Err(SyncError::Diverged(_))));
    }

    #[test]
    fn test_outcome_mismatch_detected() {
        let mut game = ClientGameState::new();
        game.submit(MoveRequest { row: 1, col: 1 });
        let result = game.apply_validation(&server_reply([1, 1], Outcome::PlayerWins, false));
        assert_eq!(
            result,
            Err(SyncError::OutcomeMismatch {
                reported: Outcome::PlayerWins,
                local: Outcome::Ongoing
            })
        );
    }
}
