use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// A `(row, col)` grid position.
pub type Coord = (usize, usize);

/// The fixed classification of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// An open cell that may hold a bulb or be lit.
    Empty,
    /// An opaque cell with no clue.
    Black,
    /// An opaque cell requiring exactly this many bulbs among its orthogonal
    /// empty neighbors. The clue is always in `0..=4`.
    Numbered(u8),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// `true` for black and numbered cells alike.
    pub fn is_opaque(&self) -> bool {
        !self.is_empty()
    }
}

/// The immutable puzzle grid.
///
/// A `Board` is validated once at construction and never mutated: the model
/// builder, the visibility index, and the renderer all read from the same
/// grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board from rows of cells, rejecting empty or ragged grids
    /// and out-of-range clues.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, PuzzleError> {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 || col_count == 0 {
            return Err(PuzzleError::EmptyGrid);
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != col_count {
                return Err(PuzzleError::RaggedGrid {
                    row: row_index,
                    expected: col_count,
                    found: row.len(),
                });
            }
            for (col_index, cell) in row.iter().enumerate() {
                if let Cell::Numbered(clue) = cell {
                    if *clue > 4 {
                        return Err(PuzzleError::ClueOutOfRange {
                            row: row_index,
                            col: col_index,
                            clue: *clue,
                        });
                    }
                }
            }
        }

        Ok(Self {
            rows: row_count,
            cols: col_count,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The classification of the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds; callers index only into
    /// the grid they were given.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) is outside a {}x{} board",
            row,
            col,
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col]
    }

    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_empty()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
    }

    /// Whether `(row, col)` is a valid coordinate.
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    /// Parses a textual grid: one line per row, `.` for empty, `#` for
    /// black, `0`-`4` for a numbered cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (row_index, line) in s.lines().map(str::trim_end).enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for (col_index, symbol) in line.chars().enumerate() {
                let cell = match symbol {
                    '.' => Cell::Empty,
                    '#' => Cell::Black,
                    '0'..='4' => Cell::Numbered(symbol as u8 - b'0'),
                    '5'..='9' => {
                        return Err(PuzzleError::ClueOutOfRange {
                            row: row_index,
                            col: col_index,
                            clue: symbol as u8 - b'0',
                        })
                    }
                    _ => {
                        return Err(PuzzleError::UnexpectedSymbol {
                            row: row_index,
                            col: col_index,
                            symbol,
                        })
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }
        Board::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_a_textual_grid() {
        let board: Board = ".#.\n.1.\n...".parse().unwrap();
        assert_eq!(board.dimensions(), (3, 3));
        assert_eq!(board.cell(0, 0), Cell::Empty);
        assert_eq!(board.cell(0, 1), Cell::Black);
        assert_eq!(board.cell(1, 1), Cell::Numbered(1));
        assert!(board.is_empty(2, 2));
    }

    #[test]
    fn rejects_a_ragged_grid() {
        let result: Result<Board, _> = "..\n...".parse();
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_an_empty_grid() {
        let result: Result<Board, _> = "".parse();
        assert_eq!(result.unwrap_err(), PuzzleError::EmptyGrid);
    }

    #[test]
    fn rejects_an_out_of_range_clue() {
        let result: Result<Board, _> = ".5.".parse();
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::ClueOutOfRange {
                row: 0,
                col: 1,
                clue: 5
            }
        );
    }

    #[test]
    fn rejects_an_unknown_symbol() {
        let result: Result<Board, _> = ".x.".parse();
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::UnexpectedSymbol {
                row: 0,
                col: 1,
                symbol: 'x'
            }
        );
    }

    #[test]
    fn clue_range_is_checked_on_direct_construction() {
        let result = Board::from_rows(vec![vec![Cell::Numbered(7)]]);
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::ClueOutOfRange {
                row: 0,
                col: 0,
                clue: 7
            }
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_access_panics() {
        let board: Board = "..".parse().unwrap();
        board.cell(1, 0);
    }
}
