use std::backtrace::Backtrace;

use crate::solver::engine::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A failure inside the constraint engine itself.
///
/// This is distinct from an unsatisfiable puzzle, which is a normal result
/// and never reported through this type.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("constraint references undeclared variable ?{0}")]
    UnknownVariable(VariableId),
}

/// A malformed puzzle description, rejected before any model is built.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("puzzle grid has no cells")]
    EmptyGrid,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("clue {clue} at ({row}, {col}) is outside the range 0-4")]
    ClueOutOfRange { row: usize, col: usize, clue: u8 },
    #[error("unexpected symbol {symbol:?} at ({row}, {col})")]
    UnexpectedSymbol { row: usize, col: usize, symbol: char },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("engine: {inner}\n{backtrace}")]
    Engine {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Engine {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
