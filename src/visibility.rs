use std::collections::HashMap;

use crate::board::{Board, Cell, Coord};

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Precomputed line-of-sight information for a board.
///
/// For every empty cell this records its sight set: the empty cells reachable
/// along each of the four orthogonal rays, walking outward from the adjacent
/// cell and stopping at the first opaque cell or the grid edge. The rays are
/// independent and the cell itself is never part of its own sight set.
///
/// For every numbered cell it records the empty orthogonal neighbors that
/// count towards the clue.
#[derive(Debug, Clone)]
pub struct Visibility {
    sight: HashMap<Coord, Vec<Coord>>,
    neighbors: HashMap<Coord, Vec<Coord>>,
}

impl Visibility {
    /// Walks the whole board once and indexes sight sets and clue neighbors.
    pub fn index(board: &Board) -> Self {
        let mut sight = HashMap::new();
        let mut neighbors = HashMap::new();

        for (row, col) in board.coords() {
            match board.cell(row, col) {
                Cell::Empty => {
                    sight.insert((row, col), walk_rays(board, row, col));
                }
                Cell::Numbered(_) => {
                    neighbors.insert((row, col), empty_adjacent(board, row, col));
                }
                Cell::Black => {}
            }
        }

        Self { sight, neighbors }
    }

    /// The sight set of an empty cell. Empty for cells walled in on all four
    /// sides, and for coordinates that are not empty cells at all.
    pub fn sight_set(&self, row: usize, col: usize) -> &[Coord] {
        self.sight
            .get(&(row, col))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The empty orthogonal neighbors of a numbered cell (between 0 and 4 of
    /// them).
    pub fn empty_neighbors(&self, row: usize, col: usize) -> &[Coord] {
        self.neighbors
            .get(&(row, col))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn walk_rays(board: &Board, row: usize, col: usize) -> Vec<Coord> {
    let mut seen = Vec::new();
    for (dr, dc) in DIRECTIONS {
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while board.in_bounds(r, c) && board.is_empty(r as usize, c as usize) {
            seen.push((r as usize, c as usize));
            r += dr;
            c += dc;
        }
    }
    seen
}

fn empty_adjacent(board: &Board, row: usize, col: usize) -> Vec<Coord> {
    DIRECTIONS
        .iter()
        .filter_map(|(dr, dc)| {
            let r = row as isize + dr;
            let c = col as isize + dc;
            (board.in_bounds(r, c) && board.is_empty(r as usize, c as usize))
                .then(|| (r as usize, c as usize))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn as_set(coords: &[Coord]) -> HashSet<Coord> {
        coords.iter().copied().collect()
    }

    #[test]
    fn rays_stop_at_opaque_cells() {
        let visibility = Visibility::index(&board("...#.\n.....\n....."));

        // (0, 1): left to the edge, right up to the black cell, down the
        // full column.
        let sight = as_set(visibility.sight_set(0, 1));
        let expected: HashSet<Coord> =
            [(0, 0), (0, 2), (1, 1), (2, 1)].into_iter().collect();
        assert_eq!(sight, expected);
    }

    #[test]
    fn a_cell_past_the_blocker_is_not_seen() {
        let visibility = Visibility::index(&board("..#.."));
        let sight = as_set(visibility.sight_set(0, 0));
        assert_eq!(sight, [(0, 1)].into_iter().collect());
    }

    #[test]
    fn a_walled_in_cell_has_an_empty_sight_set() {
        let visibility = Visibility::index(&board(".#.\n#.#\n.#."));
        assert!(visibility.sight_set(1, 1).is_empty());
    }

    #[test]
    fn a_lone_cell_has_an_empty_sight_set() {
        let visibility = Visibility::index(&board("."));
        assert!(visibility.sight_set(0, 0).is_empty());
    }

    #[test]
    fn clue_neighbors_exclude_opaque_cells() {
        let visibility = Visibility::index(&board(".#.\n.2.\n.#."));

        let neighbors = as_set(visibility.empty_neighbors(1, 1));
        assert_eq!(neighbors, [(1, 0), (1, 2)].into_iter().collect());
    }

    #[test]
    fn corner_clues_have_fewer_neighbors() {
        let visibility = Visibility::index(&board("1.\n.."));
        let neighbors = as_set(visibility.empty_neighbors(0, 0));
        assert_eq!(neighbors, [(0, 1), (1, 0)].into_iter().collect());
    }
}
