//! The two-state run machine.

/// Whether a simulation still executes ticks.
///
/// ```text
/// Running ──(no susceptible persons at tick start)──▶ Stopped
/// ```
///
/// `Stopped` is terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

impl RunState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}
