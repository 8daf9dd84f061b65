//! Simulation time and run configuration.
//!
//! Time is a plain monotonically increasing `Tick` counter.  One tick advances
//! every agent once; there is no mapping to wall-clock time in these models.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// `true` on every `interval`-th tick (tick 0 included).  An interval of
    /// zero never matches.
    #[inline]
    pub fn is_on_interval(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration shared by both model variants.
///
/// Typically loaded from the `[sim]` table of a TOML file by the demo
/// binaries and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Upper bound on executed ticks.  A run also ends earlier once every
    /// person is informed/infected.
    pub max_ticks: u64,

    /// Collect a snapshot every N ticks.  1 = every tick.
    pub output_interval_ticks: u64,

    /// Worker thread count for batch runs.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                  42,
            max_ticks:             100,
            output_interval_ticks: 1,
            num_threads:           None,
        }
    }
}

impl SimConfig {
    /// The tick at which a run is cut off (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.output_interval_ticks == 0 {
            return Err(CoreError::Config(
                "output_interval_ticks must be at least 1".into(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
