//! Game state module - the status state machine around a board
//!
//! `Game` is an ordinary value owned by the caller. It ties a layout, the
//! current board and a [`GameStatus`] together and enforces the lifecycle:
//!
//! ```text
//! Idle --start--> Playing --settle--> Won | Lost
//!   ^                |                    |
//!   +------stop------+-------stop---------+
//!                    ^                    |
//!                    +------restart-------+
//! ```
//!
//! Applying a jump and classifying the result are separate steps
//! ([`Game::apply_jump`] then [`Game::settle`]) so a front end can animate
//! in between; [`Game::jump`] does both at once.

use tracing::info;

use crate::board::Board;
use crate::layout::Layout;
use crate::rules::{self, JumpError, MoveList};
use crate::snapshot::GameSnapshot;
use crate::types::{GameStatus, Jump, Position};

/// Complete game state
#[derive(Debug, Clone, Default)]
pub struct Game {
    layout: Option<Layout>,
    board: Option<Board>,
    status: GameStatus,
    /// Monotonic deal id (increments on every start/restart).
    deal_id: u32,
    /// Jumps applied since the last deal.
    jumps: u32,
    last_jump: Option<Jump>,
}

impl Game {
    /// Create an idle game with no board
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal a fresh board from `layout` and enter `Playing`.
    ///
    /// The status is forced to `Playing` without classifying the deal.
    pub fn start(&mut self, layout: &Layout) {
        self.layout = Some(layout.clone());
        self.deal();
    }

    /// Deal the current layout again. Does nothing while no layout was ever
    /// started.
    pub fn restart(&mut self) {
        if self.layout.is_some() {
            self.deal();
        }
    }

    fn deal(&mut self) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let board = Board::from_layout(layout);
        self.deal_id = self.deal_id.wrapping_add(1);
        self.jumps = 0;
        self.last_jump = None;
        self.status = GameStatus::Playing;
        info!(
            layout = layout.name(),
            deal = self.deal_id,
            pegs = board.count_occupied(),
            "dealt board"
        );
        self.board = Some(board);
    }

    /// Abandon the current board and go `Idle`.
    pub fn stop(&mut self) {
        if self.status != GameStatus::Idle {
            info!(deal = self.deal_id, status = %self.status, "stopped game");
        }
        self.board = None;
        self.last_jump = None;
        self.status = GameStatus::Idle;
    }

    /// Apply a jump without reclassifying.
    ///
    /// Rejected with [`JumpError::NotPlaying`] unless the status is `Playing`,
    /// and with [`JumpError::Illegal`] if the jump is not legal on the current
    /// board. On error nothing changes.
    pub fn apply_jump(&mut self, from: Position, to: Position) -> Result<(), JumpError> {
        let board = match (self.status, self.board.as_ref()) {
            (GameStatus::Playing, Some(board)) => board,
            (status, _) => return Err(JumpError::NotPlaying { status }),
        };
        let next = rules::apply_jump(board, from, to)?;
        self.board = Some(next);
        self.jumps += 1;
        self.last_jump = Some(Jump::new(from, to));
        Ok(())
    }

    /// Classify the current board and store the result.
    ///
    /// Only a `Playing` game is reclassified; `Idle`, `Won` and `Lost` are
    /// returned unchanged.
    pub fn settle(&mut self) -> GameStatus {
        if self.status != GameStatus::Playing {
            return self.status;
        }
        if let Some(board) = self.board.as_ref() {
            self.status = rules::classify(board);
            if self.status.is_terminal() {
                info!(
                    deal = self.deal_id,
                    status = %self.status,
                    pegs = board.count_occupied(),
                    jumps = self.jumps,
                    "game over"
                );
            }
        }
        self.status
    }

    /// Apply a jump and classify the result.
    pub fn jump(&mut self, from: Position, to: Position) -> Result<GameStatus, JumpError> {
        self.apply_jump(from, to)?;
        Ok(self.settle())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn deal_id(&self) -> u32 {
        self.deal_id
    }

    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    pub fn last_jump(&self) -> Option<Jump> {
        self.last_jump
    }

    /// Pegs left on the board (0 while idle)
    pub fn pegs_left(&self) -> usize {
        self.board.map_or(0, |b| b.count_occupied())
    }

    /// Legal jumps on the current board; empty unless `Playing`.
    pub fn legal_moves(&self) -> MoveList {
        match (self.status, self.board.as_ref()) {
            (GameStatus::Playing, Some(board)) => rules::legal_moves(board),
            _ => MoveList::new(),
        }
    }

    /// Export a snapshot for renderers into an existing buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        out.status = self.status;
        out.deal_id = self.deal_id;
        out.jumps = self.jumps;
        out.last_jump = self.last_jump;
        if let Some(board) = self.board.as_ref() {
            out.board = board.to_rows();
            out.pegs = board.count_occupied() as u32;
            out.legal_moves = self.legal_moves().len() as u32;
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{classic_cross, Catalog};
    use crate::types::Cell;

    fn p(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn started() -> Game {
        let mut game = Game::new();
        game.start(&classic_cross());
        game
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new();
        assert_eq!(game.status(), GameStatus::Idle);
        assert!(game.board().is_none());
        assert_eq!(game.pegs_left(), 0);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_start_enters_playing() {
        let game = started();
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.pegs_left(), 32);
        assert_eq!(game.deal_id(), 1);
        assert_eq!(game.legal_moves().len(), 4);
    }

    #[test]
    fn test_jump_while_idle_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.apply_jump(p(3, 1), p(3, 3)),
            Err(JumpError::NotPlaying {
                status: GameStatus::Idle
            })
        );
    }

    #[test]
    fn test_apply_then_settle() {
        let mut game = started();
        game.apply_jump(p(3, 1), p(3, 3)).unwrap();
        // status untouched until settle
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.pegs_left(), 31);
        assert_eq!(game.jumps(), 1);
        assert_eq!(game.last_jump(), Some(Jump::new(p(3, 1), p(3, 3))));
        assert_eq!(game.settle(), GameStatus::Playing);
    }

    #[test]
    fn test_illegal_jump_changes_nothing() {
        let mut game = started();
        let before = *game.board().unwrap();
        assert!(matches!(
            game.jump(p(0, 0), p(0, 2)),
            Err(JumpError::Illegal { .. })
        ));
        assert_eq!(game.board(), Some(&before));
        assert_eq!(game.jumps(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    /// Play the first legal jump until the game ends.
    fn play_out(game: &mut Game) -> GameStatus {
        while game.status() == GameStatus::Playing {
            let first = game.legal_moves()[0];
            game.jump(first.from, first.to).unwrap();
        }
        game.status()
    }

    #[test]
    fn test_terminal_status_is_sticky() {
        let mut game = started();
        let end = play_out(&mut game);
        assert!(end.is_terminal());
        let board = *game.board().unwrap();

        // no more jumps and settle keeps the verdict
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.settle(), end);
        assert_eq!(
            game.apply_jump(p(3, 1), p(3, 3)),
            Err(JumpError::NotPlaying { status: end })
        );
        assert_eq!(game.board(), Some(&board));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = started();
        play_out(&mut game);
        game.restart();
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.pegs_left(), 32);
        assert_eq!(game.jumps(), 0);
        assert_eq!(game.last_jump(), None);
        assert_eq!(game.deal_id(), 2);
    }

    #[test]
    fn test_restart_without_layout_stays_idle() {
        let mut game = Game::new();
        game.restart();
        assert_eq!(game.status(), GameStatus::Idle);
    }

    #[test]
    fn test_stop_goes_idle_and_drops_board() {
        let mut game = started();
        game.jump(p(3, 1), p(3, 3)).unwrap();
        game.stop();
        assert_eq!(game.status(), GameStatus::Idle);
        assert!(game.board().is_none());
        assert_eq!(game.settle(), GameStatus::Idle);
        // restart deals the remembered layout again
        game.restart();
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.pegs_left(), 32);
    }

    #[test]
    fn test_start_switches_layout() {
        let catalog = Catalog::builtin().unwrap();
        let mut game = started();
        game.start(catalog.get("Diamond").unwrap());
        assert_eq!(game.layout().unwrap().name(), "Diamond");
        assert_eq!(game.pegs_left(), 24);
    }

    #[test]
    fn test_snapshot_mirrors_game() {
        let mut game = started();
        game.jump(p(5, 3), p(3, 3)).unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.status, GameStatus::Playing);
        assert_eq!(snap.pegs, 31);
        assert_eq!(snap.jumps, 1);
        assert_eq!(snap.legal_moves, game.legal_moves().len() as u32);
        assert_eq!(snap.board[5][3], Cell::Empty);
        assert_eq!(snap.board[4][3], Cell::Empty);
        assert_eq!(snap.board[3][3], Cell::Occupied);

        game.stop();
        let mut reused = snap;
        game.snapshot_into(&mut reused);
        assert_eq!(reused.status, GameStatus::Idle);
        assert_eq!(reused.pegs, 0);
        assert_eq!(reused.legal_moves, 0);
        assert_eq!(reused.last_jump, None);
        assert!(reused.board.iter().flatten().all(|&c| c == Cell::Invalid));
    }
}
