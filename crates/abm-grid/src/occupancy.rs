//! Agent placement tables.

use abm_core::{AgentId, CellId};

/// Which cell each agent is on, and which agents are on each cell.
///
/// `positions` is indexed by `AgentId`; `None` means "never placed".
/// `residents` is indexed by `CellId` and keeps agents in arrival order: a
/// move appends the agent to the end of its destination list, even when the
/// destination is the cell it just left.
pub struct Occupancy {
    positions: Vec<Option<CellId>>,
    residents: Vec<Vec<AgentId>>,
}

impl Occupancy {
    /// Empty tables for a grid of `cell_count` cells.
    pub fn new(cell_count: usize) -> Self {
        Self {
            positions: Vec::new(),
            residents: vec![Vec::new(); cell_count],
        }
    }

    /// Current cell of `agent`, or `None` if it was never placed.
    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<CellId> {
        self.positions.get(agent.index()).copied().flatten()
    }

    /// Agents on `cell` in arrival order.
    #[inline]
    pub fn residents(&self, cell: CellId) -> &[AgentId] {
        &self.residents[cell.index()]
    }

    /// Number of placed agents.
    pub fn placed_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    /// Put `agent` on `cell`, removing it from its previous cell if any.
    pub fn set(&mut self, agent: AgentId, cell: CellId) {
        if self.positions.len() <= agent.index() {
            self.positions.resize(agent.index() + 1, None);
        }
        if let Some(old) = self.positions[agent.index()] {
            self.residents[old.index()].retain(|&a| a != agent);
        }
        self.positions[agent.index()] = Some(cell);
        self.residents[cell.index()].push(agent);
    }
}
