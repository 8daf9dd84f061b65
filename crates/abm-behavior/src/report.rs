//! Reporter row types consumed by the data collector.

/// A model-level report that can be written as one table row.  Parameter
/// sets implement it too, so batch tables can carry the inputs of each run.
///
/// `fields()` must return exactly `headers().len()` values, in header order.
pub trait ReportRow {
    fn headers() -> &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

/// One agent's reporter values at a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub role:     &'static str,
    pub informed: bool,
    /// Grid column; `None` for non-spatial agents.
    pub x:        Option<u32>,
    /// Grid row; `None` for non-spatial agents.
    pub y:        Option<u32>,
    /// Encounters for a person, followers reached for an influencer.
    pub counter:  u64,
}

impl ReportRow for AgentRow {
    fn headers() -> &'static [&'static str] {
        &["tick", "agent_id", "role", "informed", "x", "y", "counter"]
    }

    fn fields(&self) -> Vec<String> {
        let opt = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        vec![
            self.tick.to_string(),
            self.agent_id.to_string(),
            self.role.to_string(),
            (self.informed as u8).to_string(),
            opt(self.x),
            opt(self.y),
            self.counter.to_string(),
        ]
    }
}
