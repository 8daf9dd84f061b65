//! Fixed-schema per-cell state.

/// Consecutive ticks a contaminated cell may go without an infected occupant
/// before it reverts to clean.
pub const PERSISTENCE_TICKS: u32 = 3;

/// Everything a cell records about itself.
///
/// Replaces a free-form property bag: every model reads and writes the same
/// three fields, and cells nobody touches stay at `Default`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellState {
    /// An infected agent stood here recently (disease model).
    pub contaminated: bool,

    /// Ticks since the last infected occupant left.  Meaningful only while
    /// `contaminated`.
    pub persistence: u32,

    /// The cell hosts a sport facility (trend model).
    pub sport_facility: bool,
}

impl CellState {
    /// Mark the cell contaminated.  Returns `true` if it was clean before.
    #[inline]
    pub fn contaminate(&mut self) -> bool {
        let was_clean = !self.contaminated;
        self.contaminated = true;
        was_clean
    }

    /// Advance the persistence counter by one tick.
    ///
    /// An infected occupant resets the counter; otherwise it grows, and on
    /// reaching [`PERSISTENCE_TICKS`] the cell is cleared and the counter
    /// reset.  Clean cells are left untouched.  Returns `true` if the cell
    /// was cleared by this call.
    pub fn decay(&mut self, infected_present: bool) -> bool {
        if !self.contaminated {
            return false;
        }
        if infected_present {
            self.persistence = 0;
            return false;
        }
        self.persistence += 1;
        if self.persistence >= PERSISTENCE_TICKS {
            self.contaminated = false;
            self.persistence = 0;
            return true;
        }
        false
    }
}
