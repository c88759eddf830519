//! Bingo engine: square boards, an ordered draw sequence and two win policies

use std::convert::Infallible;
use std::ops::ControlFlow;
use thiserror::Error;
use tracing::{debug, trace};

/// Value printed on a cell and drawn from the sequence
pub type Number = i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BingoError {
    #[error("draw sequence is empty")]
    EmptyDraws,
    #[error("no boards to play")]
    NoBoards,
    #[error("board has no cells")]
    EmptyBoard,
    #[error("board is not square: row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("board {board} is {size}x{size}, expected {expected}x{expected}")]
    SizeMismatch {
        board: usize,
        size: usize,
        expected: usize,
    },
    #[error("no board won after {draws} draws")]
    NoWinner { draws: usize },
    #[error("score of board {board} does not fit in a 64-bit integer")]
    ScoreOverflow { board: usize },
    #[error("board index {index} out of range for {len} boards")]
    BoardOutOfRange { index: usize, len: usize },
    #[error("position ({row}, {col}) out of range for a {size}x{size} board")]
    PositionOutOfRange { row: usize, col: usize, size: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub number: Number,
    pub marked: bool,
}

/// Which winning board decides the result of [`Bingo::play`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinPolicy {
    /// Stop at the first board to complete a line
    First,
    /// Keep playing and report the last board to complete a line
    Last,
}

/// A board completing a row or column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    /// Index of the board in input order
    pub board: usize,
    /// Position in the draw sequence of the winning number
    pub draw_index: usize,
    /// The winning number
    pub number: Number,
    /// Unmarked sum times `number`
    pub score: Number,
}

/// An N×N bingo board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Build an unmarked board, rejecting grids that are empty or not square.
    pub fn new(rows: Vec<Vec<Number>>) -> Result<Self, BingoError> {
        let size = rows.len();
        if size == 0 {
            return Err(BingoError::EmptyBoard);
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, numbers) in rows.into_iter().enumerate() {
            if numbers.len() != size {
                return Err(BingoError::NotSquare {
                    row,
                    len: numbers.len(),
                    size,
                });
            }
            cells.extend(numbers.into_iter().map(|number| Cell {
                number,
                marked: false,
            }));
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every position holding `number`, in row-major order.
    pub fn locate(&self, number: Number) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.number == number)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    pub fn mark(&mut self, pos: Position) -> Result<(), BingoError> {
        let i = self.checked_index(pos)?;
        self.cells[i].marked = true;
        Ok(())
    }

    pub fn row_complete(&self, row: usize) -> Result<bool, BingoError> {
        self.checked_index(Position::new(row, 0))?;
        Ok(self.is_row_complete(row))
    }

    pub fn column_complete(&self, col: usize) -> Result<bool, BingoError> {
        self.checked_index(Position::new(0, col))?;
        Ok(self.is_column_complete(col))
    }

    /// Sum of unmarked cells, or `None` on overflow.
    pub fn unmarked_sum(&self) -> Option<Number> {
        self.cells
            .iter()
            .filter(|cell| !cell.marked)
            .try_fold(0 as Number, |sum, cell| sum.checked_add(cell.number))
    }

    /// Unmarked sum times `last_drawn`, or `None` on overflow.
    pub fn score(&self, last_drawn: Number) -> Option<Number> {
        self.unmarked_sum()?.checked_mul(last_drawn)
    }

    /// Marks `number` and reports whether a line touched by a mark completed.
    ///
    /// Marking stops at the first completing cell, so a board holding the
    /// number twice is frozen as soon as one of them wins. Later copies stay
    /// unmarked and count towards the score, even under `WinPolicy::Last`.
    fn apply(&mut self, number: Number) -> bool {
        for pos in self.locate(number) {
            self.cells[pos.row * self.size + pos.col].marked = true;
            if self.is_row_complete(pos.row) || self.is_column_complete(pos.col) {
                return true;
            }
        }
        false
    }

    fn is_row_complete(&self, row: usize) -> bool {
        self.cells[row * self.size..(row + 1) * self.size]
            .iter()
            .all(|cell| cell.marked)
    }

    fn is_column_complete(&self, col: usize) -> bool {
        self.cells
            .iter()
            .skip(col)
            .step_by(self.size)
            .all(|cell| cell.marked)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.size && pos.col < self.size).then_some(pos.row * self.size + pos.col)
    }

    fn checked_index(&self, pos: Position) -> Result<usize, BingoError> {
        self.index(pos).ok_or(BingoError::PositionOutOfRange {
            row: pos.row,
            col: pos.col,
            size: self.size,
        })
    }
}

/// Boards plus the draw sequence they are played against.
///
/// A game is meant to be played once; clone a fresh engine to replay it
/// under another policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bingo {
    draws: Vec<Number>,
    boards: Vec<Board>,
}

impl Bingo {
    /// Rejects empty draw sequences, empty board lists and boards whose size
    /// differs from the first board.
    pub fn new(draws: Vec<Number>, boards: Vec<Board>) -> Result<Self, BingoError> {
        if draws.is_empty() {
            return Err(BingoError::EmptyDraws);
        }
        let expected = boards.first().ok_or(BingoError::NoBoards)?.size();
        if let Some((board, b)) = boards
            .iter()
            .enumerate()
            .find(|(_, b)| b.size() != expected)
        {
            return Err(BingoError::SizeMismatch {
                board,
                size: b.size(),
                expected,
            });
        }
        Ok(Self { draws, boards })
    }

    pub fn draws(&self) -> &[Number] {
        &self.draws
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Side length shared by every board
    pub fn board_size(&self) -> usize {
        self.boards[0].size()
    }

    pub fn board(&self, index: usize) -> Result<&Board, BingoError> {
        let len = self.boards.len();
        self.boards
            .get(index)
            .ok_or(BingoError::BoardOutOfRange { index, len })
    }

    fn board_mut(&mut self, index: usize) -> Result<&mut Board, BingoError> {
        let len = self.boards.len();
        self.boards
            .get_mut(index)
            .ok_or(BingoError::BoardOutOfRange { index, len })
    }

    pub fn locate(&self, board: usize, number: Number) -> Result<Vec<Position>, BingoError> {
        Ok(self.board(board)?.locate(number))
    }

    pub fn mark(&mut self, board: usize, row: usize, col: usize) -> Result<(), BingoError> {
        self.board_mut(board)?.mark(Position::new(row, col))
    }

    pub fn row_complete(&self, board: usize, row: usize) -> Result<bool, BingoError> {
        self.board(board)?.row_complete(row)
    }

    pub fn column_complete(&self, board: usize, col: usize) -> Result<bool, BingoError> {
        self.board(board)?.column_complete(col)
    }

    pub fn score(&self, board: usize, last_drawn: Number) -> Result<Number, BingoError> {
        self.board(board)?
            .score(last_drawn)
            .ok_or(BingoError::ScoreOverflow { board })
    }

    /// Play the draws under `policy`.
    ///
    /// Boards are visited in index order for every draw, and each board is
    /// checked right after each of its marks. `First` returns the first win
    /// seen; `Last` keeps going, skipping boards that already won, and
    /// returns the final one. A win whose score overflows stops the game
    /// with [`BingoError::ScoreOverflow`].
    #[tracing::instrument(level = "debug", skip(self), fields(boards = self.boards.len(), draws = self.draws.len()))]
    pub fn play(&mut self, policy: WinPolicy) -> Result<Win, BingoError> {
        let mut last = None;
        let flow = self.run(|win| match policy {
            WinPolicy::First => ControlFlow::Break(win),
            WinPolicy::Last => {
                last = Some(win);
                ControlFlow::Continue(())
            }
        })?;
        match flow {
            ControlFlow::Break(win) => Ok(win),
            ControlFlow::Continue(()) => last.ok_or(BingoError::NoWinner {
                draws: self.draws.len(),
            }),
        }
    }

    /// Every win in the order it happens, playing the draws to the end.
    pub fn win_order(&mut self) -> Result<Vec<Win>, BingoError> {
        let mut wins = Vec::new();
        let flow = self.run(|win| {
            wins.push(win);
            ControlFlow::<Infallible>::Continue(())
        })?;
        match flow {
            ControlFlow::Continue(()) => Ok(wins),
        }
    }

    fn run<B>(
        &mut self,
        mut on_win: impl FnMut(Win) -> ControlFlow<B>,
    ) -> Result<ControlFlow<B>, BingoError> {
        let mut won = vec![false; self.boards.len()];
        for (draw_index, &number) in self.draws.iter().enumerate() {
            trace!(draw_index, number, "draw");
            for (board, state) in self.boards.iter_mut().enumerate() {
                if won[board] || !state.apply(number) {
                    continue;
                }
                won[board] = true;
                let score = state
                    .score(number)
                    .ok_or(BingoError::ScoreOverflow { board })?;
                debug!(board, draw_index, number, score, "board won");
                let win = Win {
                    board,
                    draw_index,
                    number,
                    score,
                };
                if let ControlFlow::Break(b) = on_win(win) {
                    return Ok(ControlFlow::Break(b));
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}
