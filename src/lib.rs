//! Akari solves the "Light Up" logic puzzle by translating its rules into a
//! declarative constraint model and handing the search to a generic CSP
//! engine.
//!
//! The crate is built in two layers: a problem-agnostic solver backend and
//! the Light Up frontend on top of it.
//!
//! # Core Concepts
//!
//! - **[`board::Board`]**: the immutable input grid, classifying each cell as
//!   empty, black, or numbered.
//! - **[`visibility::Visibility`]**: for each empty cell, the cells it can
//!   see along the four orthogonal rays.
//! - **[`model::LightUpModel`]**: one tri-state variable per empty cell plus
//!   the declarative rule set; any satisfying assignment is a valid,
//!   fully-lit solution and vice versa.
//! - **[`solver::engine::SolverEngine`]**: the generic engine that searches
//!   for such an assignment.
//! - **[`render::Resolution`]**: the solved board laid back onto the grid, or
//!   an explicit unsatisfiable result.
//!
//! # Example
//!
//! ```
//! use akari::board::Board;
//! use akari::model::LightUpModel;
//! use akari::render::Resolution;
//!
//! let board: Board = ".#.\n...\n.1.".parse().unwrap();
//! let model = LightUpModel::new(&board);
//!
//! match model.solve().unwrap() {
//!     Resolution::Solved(solved) => {
//!         // Every empty cell is lit or holds a bulb.
//!         assert!(solved.bulbs().count() > 0);
//!     }
//!     Resolution::Unsatisfiable => panic!("this board has a solution"),
//! }
//! ```

pub mod board;
pub mod error;
pub mod model;
pub mod render;
pub mod solver;
pub mod visibility;
