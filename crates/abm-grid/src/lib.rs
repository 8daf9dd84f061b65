//! `abm-grid`: the cell space both spread models run on.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`lattice`]   | `Lattice` (2D grid topology, CSR neighborhoods), `Coord`   |
//! | [`cell`]      | `CellState`: fixed-schema per-cell record                 |
//! | [`occupancy`] | `Occupancy`: agent → cell and cell → residents tables     |
//! | [`grid`]      | `Grid`: lattice + cell states + occupancy                 |
//! | [`error`]     | `GridError`, `GridResult<T>`                               |
//!
//! # Neighborhood model
//!
//! Cells are connected orthogonally (4-neighborhood, von Neumann).  With
//! `torus = true` (the default for both models) the edges wrap.  A cell's
//! neighbor list is deduplicated, so on tiny toroidal grids a cell may list
//! itself as its own neighbor (a 1×1 torus is one cell connected to itself).

pub mod cell;
pub mod error;
pub mod grid;
pub mod lattice;
pub mod occupancy;


pub use cell::{CellState, PERSISTENCE_TICKS};
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use lattice::{Coord, Lattice};
pub use occupancy::Occupancy;
