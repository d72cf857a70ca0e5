use std::collections::HashMap;
use std::fmt;

use prettytable::{Cell as TableCell, Row, Table};
use serde::Serialize;

use crate::{
    board::{Board, Cell, Coord},
    model::CellState,
};

/// The outcome of solving a puzzle.
///
/// An unsatisfiable puzzle is a normal result, reported here rather than as
/// an error; a partially filled board is never produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolution {
    Solved(SolvedBoard),
    Unsatisfiable,
}

impl Resolution {
    pub fn is_solved(&self) -> bool {
        matches!(self, Resolution::Solved(_))
    }

    pub fn solved(&self) -> Option<&SolvedBoard> {
        match self {
            Resolution::Solved(board) => Some(board),
            Resolution::Unsatisfiable => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Solved(board) => board.fmt(f),
            Resolution::Unsatisfiable => writeln!(f, "no solution exists"),
        }
    }
}

/// One rendered grid position: opaque cells keep their classification, empty
/// cells carry their resolved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tile {
    Black,
    Clue(u8),
    State(CellState),
}

impl Tile {
    fn symbol(&self) -> String {
        match self {
            Tile::Black => "#".to_string(),
            Tile::Clue(clue) => clue.to_string(),
            Tile::State(CellState::Bulb) => "*".to_string(),
            Tile::State(CellState::Lit) => "-".to_string(),
            Tile::State(CellState::Dark) => " ".to_string(),
        }
    }
}

/// A fully resolved board, produced from a satisfying model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolvedBoard {
    tiles: Vec<Vec<Tile>>,
}

impl SolvedBoard {
    /// Lays a per-cell assignment back onto the grid shape.
    pub fn from_assignment(board: &Board, states: &HashMap<Coord, CellState>) -> Self {
        let tiles = (0..board.rows())
            .map(|row| {
                (0..board.cols())
                    .map(|col| match board.cell(row, col) {
                        Cell::Black => Tile::Black,
                        Cell::Numbered(clue) => Tile::Clue(clue),
                        Cell::Empty => Tile::State(
                            states.get(&(row, col)).copied().unwrap_or(CellState::Dark),
                        ),
                    })
                    .collect()
            })
            .collect();
        Self { tiles }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.tiles.len(), self.tiles.first().map(Vec::len).unwrap_or(0))
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[row][col]
    }

    /// The resolved state of an empty cell, or `None` on opaque cells.
    pub fn state(&self, row: usize, col: usize) -> Option<CellState> {
        match self.tiles[row][col] {
            Tile::State(state) => Some(state),
            _ => None,
        }
    }

    /// The coordinates of every placed bulb, row-major.
    pub fn bulbs(&self) -> impl Iterator<Item = Coord> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row, tiles)| {
            tiles.iter().enumerate().filter_map(move |(col, tile)| {
                matches!(tile, Tile::State(CellState::Bulb)).then_some((row, col))
            })
        })
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        for tiles in &self.tiles {
            table.add_row(Row::new(
                tiles.iter().map(|tile| TableCell::new(&tile.symbol())).collect(),
            ));
        }
        table
    }
}

impl fmt::Display for SolvedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}
