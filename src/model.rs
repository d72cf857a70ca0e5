use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    board::{Board, Cell, Coord},
    error::Result,
    render::{Resolution, SolvedBoard},
    solver::{
        constraint::Constraint,
        constraints::{
            exact_count::ExactCountConstraint, forbid_value::ForbidValueConstraint,
            implies_any_equal::ImpliesAnyEqualConstraint,
            implies_equal::ImpliesEqualConstraint, require_value::RequireValueConstraint,
        },
        engine::{SearchStats, SolverEngine, VariableId},
        semantics::DomainSemantics,
        solution::{HashSetDomain, Solution},
    },
    visibility::Visibility,
};

/// The resolved state of one empty cell.
///
/// The three states are mutually exclusive values of a single variable, so
/// "a bulb is not lit" and "a lit cell is not a bulb" need no extra rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Neither a bulb nor illuminated. Excluded from every solved board by
    /// [`Rule::Illuminated`].
    Dark,
    /// Illuminated by at least one bulb in sight.
    Lit,
    /// Holds a bulb.
    Bulb,
}

impl CellState {
    pub const ALL: [CellState; 3] = [CellState::Dark, CellState::Lit, CellState::Bulb];
}

/// A declarative Light Up rule over cell-state variables.
///
/// Rules are data; [`LightUpSemantics::build_constraint`] lowers each one to
/// a generic engine constraint.
#[derive(Debug, Clone)]
pub enum Rule {
    /// A bulb lights every cell it sees. Lit cells cannot themselves be
    /// bulbs, so this same rule keeps two bulbs out of each other's sight.
    BulbShines { bulb: VariableId, seen: VariableId },
    /// A lit cell must have a bulb somewhere in its sight set; nothing is
    /// lit spontaneously.
    LitHasSource {
        cell: VariableId,
        sight: Vec<VariableId>,
    },
    /// Every empty cell ends up lit or holds the bulb doing the lighting.
    Illuminated { cell: VariableId },
    /// A cell whose sight set is empty can never be lit from elsewhere and
    /// must hold its own bulb.
    IsolatedBulb { cell: VariableId },
    /// A numbered cell demands exactly this many bulbs among its empty
    /// orthogonal neighbors.
    ClueCount {
        neighbors: Vec<VariableId>,
        bulbs: u8,
    },
}

/// The Light Up frontend for the constraint engine.
#[derive(Debug, Clone)]
pub struct LightUpSemantics;

impl DomainSemantics for LightUpSemantics {
    type Value = CellState;
    type VariableMetadata = Coord;
    type ConstraintDefinition = Rule;

    fn build_constraint(&self, definition: &Rule) -> Box<dyn Constraint<Self>> {
        match definition {
            Rule::BulbShines { bulb, seen } => Box::new(ImpliesEqualConstraint::new(
                *bulb,
                CellState::Bulb,
                *seen,
                CellState::Lit,
            )),
            Rule::LitHasSource { cell, sight } => Box::new(ImpliesAnyEqualConstraint::new(
                *cell,
                CellState::Lit,
                sight.clone(),
                CellState::Bulb,
            )),
            Rule::Illuminated { cell } => {
                Box::new(ForbidValueConstraint::new(*cell, CellState::Dark))
            }
            Rule::IsolatedBulb { cell } => {
                Box::new(RequireValueConstraint::new(*cell, CellState::Bulb))
            }
            Rule::ClueCount { neighbors, bulbs } => Box::new(ExactCountConstraint::new(
                neighbors.clone(),
                CellState::Bulb,
                *bulbs as usize,
            )),
        }
    }
}

/// The full constraint model for one board.
///
/// Building the model is pure and synchronous: one tri-state variable per
/// empty cell, plus the rule set derived from the board's visibility index.
/// Each call to [`LightUpModel::solve`] runs an independent engine session
/// over a fresh copy of the initial state, so models can be solved from
/// several threads without cross-talk.
pub struct LightUpModel {
    board: Board,
    rules: Vec<Rule>,
    initial: Solution<LightUpSemantics>,
}

impl LightUpModel {
    pub fn new(board: &Board) -> Self {
        let visibility = Visibility::index(board);

        let mut ids: HashMap<Coord, VariableId> = HashMap::new();
        let mut domains = im::HashMap::new();
        let mut metadata = im::HashMap::new();
        for (row, col) in board.coords() {
            if board.is_empty(row, col) {
                let var = ids.len() as VariableId;
                ids.insert((row, col), var);
                domains.insert(
                    var,
                    Box::new(HashSetDomain::of(&CellState::ALL))
                        as crate::solver::solution::Domain<CellState>,
                );
                metadata.insert(var, (row, col));
            }
        }

        let mut rules = Vec::new();
        for (row, col) in board.coords() {
            match board.cell(row, col) {
                Cell::Empty => {
                    let cell = ids[&(row, col)];
                    rules.push(Rule::Illuminated { cell });

                    let sight = visibility.sight_set(row, col);
                    if sight.is_empty() {
                        rules.push(Rule::IsolatedBulb { cell });
                    } else {
                        let sight_vars: Vec<VariableId> =
                            sight.iter().map(|seen| ids[seen]).collect();
                        for &seen in &sight_vars {
                            rules.push(Rule::BulbShines { bulb: cell, seen });
                        }
                        rules.push(Rule::LitHasSource {
                            cell,
                            sight: sight_vars,
                        });
                    }
                }
                Cell::Numbered(clue) => {
                    let neighbors = visibility
                        .empty_neighbors(row, col)
                        .iter()
                        .map(|neighbor| ids[neighbor])
                        .collect();
                    rules.push(Rule::ClueCount {
                        neighbors,
                        bulbs: clue,
                    });
                }
                Cell::Black => {}
            }
        }

        debug!(
            variables = ids.len(),
            rules = rules.len(),
            "built constraint model"
        );

        let initial = Solution::new(domains, metadata, Arc::new(LightUpSemantics));
        Self {
            board: board.clone(),
            rules,
            initial,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn variable_count(&self) -> usize {
        self.initial.domains.len()
    }

    /// Lowers the declarative rules into runnable engine constraints.
    pub fn constraints(&self) -> Vec<Box<dyn Constraint<LightUpSemantics>>> {
        self.rules
            .iter()
            .map(|rule| self.initial.semantics.build_constraint(rule))
            .collect()
    }

    /// Solves with a default engine configuration.
    pub fn solve(&self) -> Result<Resolution> {
        let engine = SolverEngine::default();
        self.solve_with(&engine).map(|(resolution, _stats)| resolution)
    }

    /// Runs one engine session and maps the outcome back onto the grid.
    pub fn solve_with(
        &self,
        engine: &SolverEngine<LightUpSemantics>,
    ) -> Result<(Resolution, SearchStats)> {
        // A clue with no empty neighbor at all gives the engine no arcs to
        // propagate, so that one a-priori contradiction is settled here.
        let hopeless_clue = self.rules.iter().any(|rule| {
            matches!(rule, Rule::ClueCount { neighbors, bulbs }
                if neighbors.is_empty() && *bulbs > 0)
        });
        if hopeless_clue {
            return Ok((Resolution::Unsatisfiable, SearchStats::default()));
        }

        let constraints = self.constraints();
        let (solution, stats) = engine.solve(&constraints, self.initial.clone())?;
        let resolution = match solution {
            Some(model) => Resolution::Solved(self.extract(&model)),
            None => Resolution::Unsatisfiable,
        };
        Ok((resolution, stats))
    }

    fn extract(&self, model: &Solution<LightUpSemantics>) -> SolvedBoard {
        let mut states = HashMap::new();
        for (var, coord) in &model.metadata {
            let state = model
                .domains
                .get(var)
                .and_then(|domain| domain.get_singleton_value())
                .expect("complete model has a value for every cell");
            states.insert(*coord, state);
        }
        SolvedBoard::from_assignment(&self.board, &states)
    }
}
