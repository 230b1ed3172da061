use crate::types::{Cell, GameStatus, Jump, BOARD_SIZE};

/// Row-major cell grid as exported to renderers
pub type CellGrid = [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: CellGrid,
    pub status: GameStatus,
    pub deal_id: u32,
    pub pegs: u32,
    pub jumps: u32,
    pub legal_moves: u32,
    pub last_jump: Option<Jump>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::Invalid; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.status = GameStatus::Idle;
        self.deal_id = 0;
        self.pegs = 0;
        self.jumps = 0;
        self.legal_moves = 0;
        self.last_jump = None;
    }

    /// Cell at `(row, col)`, `Invalid` when out of range
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Cell::Invalid)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::Invalid; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            status: GameStatus::Idle,
            deal_id: 0,
            pegs: 0,
            jumps: 0,
            legal_moves: 0,
            last_jump: None,
        }
    }
}
