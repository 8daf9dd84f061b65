//! Agent roles and per-role state.

use std::fmt;

use abm_core::AgentId;

/// Boolean traits that shape transition probabilities.
///
/// Each model reads only the trait it cares about: the trend model reads
/// `sport_enthusiast`, the disease model `has_comorbidities`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Traits {
    pub sport_enthusiast:  bool,
    pub has_comorbidities: bool,
}

impl Traits {
    pub const fn sport_enthusiast() -> Self {
        Self { sport_enthusiast: true, has_comorbidities: false }
    }

    pub const fn comorbid() -> Self {
        Self { sport_enthusiast: false, has_comorbidities: true }
    }
}

// ── Person ────────────────────────────────────────────────────────────────────

/// A regular person on the grid.
///
/// `informed` doubles as "infected" in the disease model.  It is private and
/// only [`Person::acquire`] writes it, which makes the state one-way.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    informed: bool,

    pub traits: Traits,

    /// Probability of gossiping to a co-located non-enthusiast.
    pub gossip_prob: f64,

    /// Probability of rejecting the trend when told about it.
    pub skepticism_prob: f64,

    /// Probability of taking a step on a `move` call.
    pub moving_prob: f64,

    /// Times this person has been told about the trend.
    encounters: u64,
}

impl Default for Person {
    fn default() -> Self {
        Self {
            informed:        false,
            traits:          Traits::default(),
            gossip_prob:     0.5,
            skepticism_prob: 0.2,
            moving_prob:     1.0,
            encounters:      0,
        }
    }
}

impl Person {
    pub fn new(traits: Traits) -> Self {
        Self { traits, ..Self::default() }
    }

    /// Builder-style: start out already informed/infected.
    pub fn informed(mut self) -> Self {
        self.informed = true;
        self
    }

    pub fn with_gossip_prob(mut self, p: f64) -> Self {
        self.gossip_prob = p;
        self
    }

    pub fn with_skepticism_prob(mut self, p: f64) -> Self {
        self.skepticism_prob = p;
        self
    }

    pub fn with_moving_prob(mut self, p: f64) -> Self {
        self.moving_prob = p;
        self
    }

    #[inline]
    pub fn is_informed(&self) -> bool {
        self.informed
    }

    /// Become informed/infected.  Returns `true` only on the transition, so
    /// callers can count successes without double counting.
    #[inline]
    pub fn acquire(&mut self) -> bool {
        let transitioned = !self.informed;
        self.informed = true;
        transitioned
    }

    #[inline]
    pub fn record_encounter(&mut self) {
        self.encounters += 1;
    }

    #[inline]
    pub fn encounters(&self) -> u64 {
        self.encounters
    }
}

// ── Influencer ────────────────────────────────────────────────────────────────

/// A non-spatial broadcaster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Influencer {
    reached: u64,
}

impl Influencer {
    #[inline]
    pub fn record_reach(&mut self) {
        self.reached += 1;
    }

    /// Followers this influencer has delivered the trend to.
    #[inline]
    pub fn reached(&self) -> u64 {
        self.reached
    }
}

// ── Role / Agent ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Person(Person),
    Influencer(Influencer),
}

impl Role {
    /// Display name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Person(_)     => "RegularPerson",
            Role::Influencer(_) => "Influencer",
        }
    }

    /// The role's own counter: encounters for a person, followers reached
    /// for an influencer.
    pub fn counter(&self) -> u64 {
        match self {
            Role::Person(p)     => p.encounters(),
            Role::Influencer(i) => i.reached(),
        }
    }
}

/// One member of the population.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub id:   AgentId,
    pub role: Role,
}

impl Agent {
    pub fn as_person(&self) -> Option<&Person> {
        match &self.role {
            Role::Person(p) => Some(p),
            Role::Influencer(_) => None,
        }
    }

    pub fn is_informed(&self) -> bool {
        self.as_person().is_some_and(Person::is_informed)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.role.name(), self.id.0)
    }
}
