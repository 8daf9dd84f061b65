//! 2D lattice topology.
//!
//! # Data layout
//!
//! Cells are numbered row-major (`CellId = y * width + x`).  Neighborhoods
//! are precomputed once into **Compressed Sparse Row (CSR)** form: the
//! neighbors of cell `c` occupy
//!
//! ```text
//! neighbor_ids[ neighbor_start[c] .. neighbor_start[c+1] ]
//! ```
//!
//! so a neighborhood query is a contiguous slice borrow with no allocation.
//! Neighbor order is fixed (north, west, east, south) which keeps random
//! neighbor selection reproducible under a fixed seed.

use abm_core::CellId;

use crate::{GridError, GridResult};

/// Orthogonal offsets in (dx, dy): north, west, east, south.
const VON_NEUMANN: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// An integer grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Immutable grid topology: dimensions plus CSR 4-neighborhoods.
pub struct Lattice {
    width:          u32,
    height:         u32,
    /// CSR row pointer.  Length = `cell_count + 1`.
    neighbor_start: Vec<usize>,
    neighbor_ids:   Vec<CellId>,
}

impl Lattice {
    /// Build a `width × height` lattice, wrapping at the edges when `torus`.
    ///
    /// Every cell must be addressable by a `CellId`, so the lattice holds at
    /// most `u32::MAX` cells.
    pub fn new(width: u32, height: u32, torus: bool) -> GridResult<Self> {
        let cell_count = width as u64 * height as u64;
        if cell_count == 0 || cell_count > u32::MAX as u64 {
            return Err(GridError::InvalidDimensions { width, height });
        }

        let cell_count = cell_count as usize;
        let mut neighbor_start = Vec::with_capacity(cell_count + 1);
        let mut neighbor_ids   = Vec::with_capacity(cell_count * VON_NEUMANN.len());

        neighbor_start.push(0);
        for y in 0..height as i64 {
            for x in 0..width as i64 {
                let row_begin = neighbor_ids.len();
                for (dx, dy) in VON_NEUMANN {
                    let (mut nx, mut ny) = (x + dx, y + dy);
                    if torus {
                        nx = nx.rem_euclid(width as i64);
                        ny = ny.rem_euclid(height as i64);
                    } else if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let id = CellId((ny * width as i64 + nx) as u32);
                    if !neighbor_ids[row_begin..].contains(&id) {
                        neighbor_ids.push(id);
                    }
                }
                neighbor_start.push(neighbor_ids.len());
            }
        }

        Ok(Self { width, height, neighbor_start, neighbor_ids })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterator over every `CellId` in row-major order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cell_count() as u32).map(CellId)
    }

    // ── Coordinates ───────────────────────────────────────────────────────

    /// The cell at `coord`, or `OutOfBounds`.
    pub fn cell_at(&self, coord: Coord) -> GridResult<CellId> {
        if coord.x >= self.width || coord.y >= self.height {
            return Err(GridError::OutOfBounds {
                x:      coord.x,
                y:      coord.y,
                width:  self.width,
                height: self.height,
            });
        }
        Ok(CellId(coord.y * self.width + coord.x))
    }

    /// Coordinate of `cell`.
    #[inline]
    pub fn coord(&self, cell: CellId) -> Coord {
        Coord::new(cell.0 % self.width, cell.0 / self.width)
    }

    // ── Neighborhoods ─────────────────────────────────────────────────────

    /// The deduplicated 4-neighborhood of `cell`.
    #[inline]
    pub fn neighbors(&self, cell: CellId) -> &[CellId] {
        let start = self.neighbor_start[cell.index()];
        let end   = self.neighbor_start[cell.index() + 1];
        &self.neighbor_ids[start..end]
    }
}
