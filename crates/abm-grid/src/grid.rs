//! The `Grid`: lattice, cell states, and occupancy under one owner.

use abm_core::{AgentId, CellId, SimRng};

use crate::{CellState, Coord, GridError, GridResult, Lattice, Occupancy};

/// A multi-occupancy 2D grid: any number of agents may share a cell.
///
/// All mutation goes through `&mut Grid`, so the tick loop is the only
/// writer.  Agent-level state (informed, traits, …) is *not* stored here;
/// the grid only knows where agents are.
pub struct Grid {
    lattice:   Lattice,
    cells:     Vec<CellState>,
    occupancy: Occupancy,
}

impl Grid {
    /// Build an empty `width × height` grid with every cell at its default
    /// (clean, no facility) state.
    pub fn new(width: u32, height: u32, torus: bool) -> GridResult<Self> {
        let lattice = Lattice::new(width, height, torus)?;
        let cell_count = lattice.cell_count();
        Ok(Self {
            lattice,
            cells:     vec![CellState::default(); cell_count],
            occupancy: Occupancy::new(cell_count),
        })
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.lattice.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.lattice.height()
    }

    // ── Cell state ────────────────────────────────────────────────────────

    #[inline]
    pub fn cell(&self, cell: CellId) -> &CellState {
        &self.cells[cell.index()]
    }

    #[inline]
    pub fn cell_mut(&mut self, cell: CellId) -> &mut CellState {
        &mut self.cells[cell.index()]
    }

    /// All cell states in row-major order.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// `true` if any cell of `cell`'s 4-neighborhood is contaminated.
    pub fn neighborhood_contaminated(&self, cell: CellId) -> bool {
        self.lattice
            .neighbors(cell)
            .iter()
            .any(|&n| self.cells[n.index()].contaminated)
    }

    pub fn contaminated_count(&self) -> usize {
        self.cells.iter().filter(|c| c.contaminated).count()
    }

    /// Flag `count` distinct cells, chosen uniformly, as sport facilities.
    pub fn mark_facilities(&mut self, count: usize, rng: &mut SimRng) -> GridResult<()> {
        let cell_count = self.cells.len();
        if count > cell_count {
            return Err(GridError::TooManyFacilities { requested: count, cells: cell_count });
        }
        for i in rng.sample_indices(cell_count, count) {
            self.cells[i].sport_facility = true;
        }
        Ok(())
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Place `agent` at `coord` (or relocate it there if already placed).
    pub fn place(&mut self, agent: AgentId, coord: Coord) -> GridResult<CellId> {
        let cell = self.lattice.cell_at(coord)?;
        self.occupancy.set(agent, cell);
        Ok(cell)
    }

    /// Current cell of `agent`.
    ///
    /// `action` names what the caller was trying to do; it ends up in the
    /// `NotPlaced` error message when the agent has no cell.
    pub fn position(&self, agent: AgentId, action: &'static str) -> GridResult<CellId> {
        self.occupancy.position(agent).ok_or_else(|| {
            tracing::error!(%agent, action, "couldn't perform operation on the grid");
            GridError::NotPlaced { agent, action }
        })
    }

    /// Current coordinate of `agent`, or `None` if unplaced.
    pub fn coord_of(&self, agent: AgentId) -> Option<Coord> {
        self.occupancy.position(agent).map(|c| self.lattice.coord(c))
    }

    /// Agents on `cell` in arrival order.
    #[inline]
    pub fn residents(&self, cell: CellId) -> &[AgentId] {
        self.occupancy.residents(cell)
    }

    pub fn placed_count(&self) -> usize {
        self.occupancy.placed_count()
    }

    /// Move `agent` to a uniformly chosen cell of its 4-neighborhood.
    ///
    /// Returns the destination.  An agent on a cell with no neighbors (a 1×1
    /// non-toroidal grid) stays where it is.
    pub fn move_to_random_neighbor(
        &mut self,
        agent: AgentId,
        rng:   &mut SimRng,
    ) -> GridResult<CellId> {
        let from = self.position(agent, "move around the grid")?;
        let Some(&to) = rng.choose(self.lattice.neighbors(from)) else {
            return Ok(from);
        };
        tracing::trace!(%agent, from = ?self.lattice.coord(from), to = ?self.lattice.coord(to), "move");
        self.occupancy.set(agent, to);
        Ok(to)
    }
}
