//! Monotonic event counters and the ratio reporters derived from them.

/// How a trend message reached its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Two persons on the same cell.
    Direct,
    /// An influencer's broadcast.
    Indirect,
}

/// How an infection happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InfectionRoute {
    /// From a co-located infected person.
    Direct,
    /// From a contaminated cell (own or adjacent).
    Location,
}

/// `successes / attempts`, or exactly `0.0` when there were no attempts.
#[inline]
pub fn success_ratio(successes: u64, attempts: u64) -> f64 {
    if attempts == 0 {
        0.0
    } else {
        successes as f64 / attempts as f64
    }
}

/// Trend-model interaction counters.  Only ever incremented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionCounters {
    direct_attempts:    u64,
    direct_successes:   u64,
    indirect_attempts:  u64,
    indirect_successes: u64,
}

impl InteractionCounters {
    pub fn record_attempt(&mut self, channel: Channel) {
        match channel {
            Channel::Direct   => self.direct_attempts += 1,
            Channel::Indirect => self.indirect_attempts += 1,
        }
    }

    pub fn record_success(&mut self, channel: Channel) {
        match channel {
            Channel::Direct   => self.direct_successes += 1,
            Channel::Indirect => self.indirect_successes += 1,
        }
    }

    pub fn attempts(&self, channel: Channel) -> u64 {
        match channel {
            Channel::Direct   => self.direct_attempts,
            Channel::Indirect => self.indirect_attempts,
        }
    }

    pub fn successes(&self, channel: Channel) -> u64 {
        match channel {
            Channel::Direct   => self.direct_successes,
            Channel::Indirect => self.indirect_successes,
        }
    }

    pub fn total_attempts(&self) -> u64 {
        self.direct_attempts + self.indirect_attempts
    }

    pub fn ratio(&self, channel: Channel) -> f64 {
        success_ratio(self.successes(channel), self.attempts(channel))
    }
}

/// Disease-model infection counters.  Only ever incremented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfectionCounters {
    direct:   u64,
    location: u64,
}

impl InfectionCounters {
    pub fn record(&mut self, route: InfectionRoute) {
        match route {
            InfectionRoute::Direct   => self.direct += 1,
            InfectionRoute::Location => self.location += 1,
        }
    }

    pub fn get(&self, route: InfectionRoute) -> u64 {
        match route {
            InfectionRoute::Direct   => self.direct,
            InfectionRoute::Location => self.location,
        }
    }
}
