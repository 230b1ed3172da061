//! Jump rules - validation, enumeration, execution and classification
//!
//! Every function here is pure: it reads a [`Board`] and returns a value. Nothing
//! is cached between calls, so callers may invoke them immediately or after any
//! delay (e.g. once a jump animation has finished).

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::Board;
use crate::types::{Cell, Direction, GameStatus, Jump, Position, MAX_MOVES};

/// Legal jumps for one board, in enumeration order.
pub type MoveList = ArrayVec<Jump, MAX_MOVES>;

/// Legal jumps out of a single hole: at most one per direction.
pub type DestinationList = ArrayVec<Position, 4>;

/// Errors raised when a jump cannot be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JumpError {
    #[error("illegal jump from {from} to {to}")]
    Illegal { from: Position, to: Position },

    #[error("no game in progress (status: {status})")]
    NotPlaying { status: GameStatus },
}

/// Check whether the peg at `from` may jump to `to`.
///
/// Legal iff both ends are on the board, `to` is empty, `from` holds a peg, the
/// two are exactly two cells apart along one axis, and the cell between them
/// holds a peg.
pub fn is_legal_jump(board: &Board, from: Position, to: Position) -> bool {
    if !from.in_bounds() || !to.in_bounds() {
        return false;
    }
    if board.get(to) != Some(Cell::Empty) || board.get(from) != Some(Cell::Occupied) {
        return false;
    }

    let dr = (to.row - from.row).abs();
    let dc = (to.col - from.col).abs();
    if !((dr == 2 && dc == 0) || (dr == 0 && dc == 2)) {
        return false;
    }

    board.is_occupied(Jump::new(from, to).mid())
}

/// All legal jumps, row-major by source, then Up, Down, Left, Right.
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    for from in board.pegs() {
        for dir in Direction::ALL {
            let to = from.offset(dir, 2);
            if is_legal_jump(board, from, to) {
                moves.push(Jump::new(from, to));
            }
        }
    }
    moves
}

/// Legal destinations for the peg at `from`, in Up, Down, Left, Right order.
///
/// Empty when `from` is not a peg.
pub fn legal_moves_from(board: &Board, from: Position) -> DestinationList {
    let mut out = DestinationList::new();
    if !board.is_occupied(from) {
        return out;
    }
    for dir in Direction::ALL {
        let to = from.offset(dir, 2);
        if is_legal_jump(board, from, to) {
            out.push(to);
        }
    }
    out
}

/// True if any jump is available. Stops at the first one found.
pub fn has_legal_move(board: &Board) -> bool {
    board.pegs().any(|from| {
        Direction::ALL
            .iter()
            .any(|&dir| is_legal_jump(board, from, from.offset(dir, 2)))
    })
}

/// Carry out a jump, producing the next board.
///
/// The jump is validated first; an illegal pair returns
/// [`JumpError::Illegal`] and the input board is left as it was. This does not
/// classify the result, see [`classify`].
pub fn apply_jump(board: &Board, from: Position, to: Position) -> Result<Board, JumpError> {
    if !is_legal_jump(board, from, to) {
        return Err(JumpError::Illegal { from, to });
    }

    let jump = Jump::new(from, to);
    let mut next = *board;
    next.set(from, Cell::Empty);
    next.set(jump.mid(), Cell::Empty);
    next.set(to, Cell::Occupied);

    debug!(%jump, pegs = next.count_occupied(), "applied jump");
    Ok(next)
}

/// Classify a board as `Playing`, `Won` or `Lost`.
///
/// `Won` is decided by the peg count alone (exactly one peg). Otherwise the
/// board is `Playing` while a jump exists and `Lost` once none does. Never
/// returns `Idle`; that status belongs to whoever owns the board.
pub fn classify(board: &Board) -> GameStatus {
    let pegs = board.count_occupied();
    let status = if pegs == 1 {
        GameStatus::Won
    } else if has_legal_move(board) {
        GameStatus::Playing
    } else {
        GameStatus::Lost
    };
    debug!(pegs, %status, "classified board");
    status
}
