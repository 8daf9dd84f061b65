//! The trend model: gossip between co-located people plus influencer
//! broadcasts to sport enthusiasts.
//!
//! # Tick phases
//!
//! ```text
//! ① move      : every person steps to a random neighbor (p = moving_prob)
//! ② gossip    : every informed person tells the uninformed people on its
//!               cell; enthusiasts always listen, others with gossip_prob
//! ③ broadcast : uninformed persons are split by `sport_enthusiast`:
//!                 enthusiasts  → every influencer delivers to them
//!                 the rest     → take one extra `move`
//! ```
//!
//! Being told (directly or indirectly) is not enough: the listener adopts the
//! trend only if a draw beats its skepticism, which is lower on sport
//! facility cells when the grid has any.

use abm_agent::{Person, Population, PopulationBuilder, Traits};
use abm_core::{AgentId, SimRng, Tick, check_probability};
use abm_grid::Grid;

use crate::actions::{move_person, place_randomly};
use crate::error::check_agent_count;
use crate::{
    BehaviorError, BehaviorResult, Channel, InteractionCounters, ReportRow, SpreadModel,
};

// ── Parameters ────────────────────────────────────────────────────────────────

/// How influencers pick whom to reach.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndirectChannel {
    /// Each follower is reached independently with `follower_reach_prob`.
    #[default]
    RandomFollowers,
    /// Every follower standing on a sport facility cell is reached.
    FacilityEvent,
}

/// Construction parameters for [`TrendModel`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrendParams {
    /// Uninformed persons to create.  One extra, already informed, sport
    /// enthusiast is always added on top as the seed of the trend.
    pub population_size: usize,

    /// How many of the uninformed persons are sport enthusiasts.  `None`
    /// draws the count uniformly from `1..=population_size`.
    pub sport_enthusiasts: Option<usize>,

    pub influencer_count: usize,

    pub grid_width:  u32,
    pub grid_height: u32,
    pub torus:       bool,

    pub gossip_prob:              f64,
    pub skepticism_prob:          f64,
    /// Skepticism of a listener standing on a sport facility.
    pub facility_skepticism_prob: f64,
    pub follower_reach_prob:      f64,
    pub moving_prob:              f64,

    /// Number of cells flagged as sport facilities.
    pub sport_facilities: usize,

    pub channel: IndirectChannel,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            population_size:          5,
            sport_enthusiasts:        None,
            influencer_count:         1,
            grid_width:               10,
            grid_height:              10,
            torus:                    true,
            gossip_prob:              0.5,
            skepticism_prob:          0.2,
            facility_skepticism_prob: 0.2,
            follower_reach_prob:      0.5,
            moving_prob:              1.0,
            sport_facilities:         0,
            channel:                  IndirectChannel::RandomFollowers,
        }
    }
}

impl TrendParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        if self.population_size == 0 {
            return Err(BehaviorError::Config("population_size must be at least 1".into()));
        }
        check_agent_count(
            self.population_size
                .checked_add(1)
                .and_then(|n| n.checked_add(self.influencer_count)),
        )?;
        if let Some(n) = self.sport_enthusiasts.filter(|&n| n > self.population_size) {
            return Err(BehaviorError::Config(format!(
                "sport_enthusiasts ({n}) exceeds population_size ({})",
                self.population_size
            )));
        }
        let cells = self.grid_width as usize * self.grid_height as usize;
        if self.sport_facilities > cells {
            return Err(BehaviorError::Config(format!(
                "sport_facilities ({}) exceeds the {cells} grid cells",
                self.sport_facilities
            )));
        }
        check_probability("gossip_prob", self.gossip_prob)?;
        check_probability("skepticism_prob", self.skepticism_prob)?;
        check_probability("facility_skepticism_prob", self.facility_skepticism_prob)?;
        check_probability("follower_reach_prob", self.follower_reach_prob)?;
        check_probability("moving_prob", self.moving_prob)?;
        Ok(())
    }

    fn person(&self, traits: Traits) -> Person {
        Person::new(traits)
            .with_gossip_prob(self.gossip_prob)
            .with_skepticism_prob(self.skepticism_prob)
            .with_moving_prob(self.moving_prob)
    }
}

impl IndirectChannel {
    pub fn name(self) -> &'static str {
        match self {
            IndirectChannel::RandomFollowers => "random_followers",
            IndirectChannel::FacilityEvent   => "facility_event",
        }
    }
}

impl ReportRow for TrendParams {
    fn headers() -> &'static [&'static str] {
        &[
            "population_size",
            "sport_enthusiasts",
            "influencer_count",
            "grid_width",
            "grid_height",
            "torus",
            "gossip_prob",
            "skepticism_prob",
            "facility_skepticism_prob",
            "follower_reach_prob",
            "moving_prob",
            "sport_facilities",
            "channel",
        ]
    }

    /// A drawn enthusiast count is left empty.
    fn fields(&self) -> Vec<String> {
        vec![
            self.population_size.to_string(),
            self.sport_enthusiasts.map(|n| n.to_string()).unwrap_or_default(),
            self.influencer_count.to_string(),
            self.grid_width.to_string(),
            self.grid_height.to_string(),
            self.torus.to_string(),
            self.gossip_prob.to_string(),
            self.skepticism_prob.to_string(),
            self.facility_skepticism_prob.to_string(),
            self.follower_reach_prob.to_string(),
            self.moving_prob.to_string(),
            self.sport_facilities.to_string(),
            self.channel.name().to_string(),
        ]
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// Model reporters for one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendReport {
    pub tick:                   u64,
    pub informed:               usize,
    pub uninformed:             usize,
    pub direct_interactions:    u64,
    pub indirect_interactions:  u64,
    pub successful_direct:      u64,
    pub successful_indirect:    u64,
    pub total_interactions:     u64,
    pub direct_success_ratio:   f64,
    pub indirect_success_ratio: f64,
}

impl ReportRow for TrendReport {
    fn headers() -> &'static [&'static str] {
        &[
            "tick",
            "informed",
            "uninformed",
            "direct_interactions",
            "indirect_interactions",
            "successful_direct",
            "successful_indirect",
            "total_interactions",
            "direct_success_ratio",
            "indirect_success_ratio",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.tick.to_string(),
            self.informed.to_string(),
            self.uninformed.to_string(),
            self.direct_interactions.to_string(),
            self.indirect_interactions.to_string(),
            self.successful_direct.to_string(),
            self.successful_indirect.to_string(),
            self.total_interactions.to_string(),
            self.direct_success_ratio.to_string(),
            self.indirect_success_ratio.to_string(),
        ]
    }
}

// ── Model ─────────────────────────────────────────────────────────────────────

pub struct TrendModel {
    params:     TrendParams,
    population: Population,
    grid:       Grid,
    counters:   InteractionCounters,
}

impl TrendModel {
    pub fn counters(&self) -> &InteractionCounters {
        &self.counters
    }

    /// Construct directly from parts, bypassing random composition and
    /// placement.  Persons must already be placed on `grid`.
    pub fn from_parts(params: TrendParams, population: Population, grid: Grid) -> Self {
        Self { params, population, grid, counters: InteractionCounters::default() }
    }

    // ── Behaviors ─────────────────────────────────────────────────────────

    /// Gossip: an informed person tells every uninformed co-located person.
    ///
    /// Enthusiast listeners are always told; others only when a draw beats
    /// the teller's `gossip_prob`.
    fn spread_news(&mut self, teller: AgentId, rng: &mut SimRng) -> BehaviorResult<()> {
        let cell = self.grid.position(teller, "spread the news")?;
        let person = self.population.person(teller).ok_or(BehaviorError::NotAPerson(teller))?;
        if !person.is_informed() {
            tracing::trace!(
                agent = %self.population.introduce(teller),
                "I don't know anything that I could share"
            );
            return Ok(());
        }
        let gossip_prob = person.gossip_prob;

        let encountered: Vec<AgentId> = self
            .grid
            .residents(cell)
            .iter()
            .copied()
            .filter(|&other| other != teller)
            .collect();

        for listener in encountered {
            let Some(target) = self.population.person(listener) else { continue };
            if target.is_informed() {
                continue;
            }
            if target.traits.sport_enthusiast || rng.chance(gossip_prob) {
                self.counters.record_attempt(Channel::Direct);
                self.receive(listener, teller, Channel::Direct, rng)?;
            }
        }
        Ok(())
    }

    /// A person hears about the trend from `source` and decides whether to
    /// follow it.
    fn receive(
        &mut self,
        listener: AgentId,
        source:   AgentId,
        channel:  Channel,
        rng:      &mut SimRng,
    ) -> BehaviorResult<()> {
        let cell = self.grid.position(listener, "learn about the trend")?;
        let on_facility = self.grid.cell(cell).sport_facility;
        let facility_skepticism = self.params.facility_skepticism_prob;

        let person = self
            .population
            .person_mut(listener)
            .ok_or(BehaviorError::NotAPerson(listener))?;
        person.record_encounter();

        let skepticism = if on_facility { facility_skepticism } else { person.skepticism_prob };
        if rng.random::<f64>() > skepticism {
            if person.acquire() {
                self.counters.record_success(channel);
            }
            tracing::trace!(
                agent = %self.population.introduce(listener),
                from = %self.population.introduce(source),
                ?channel,
                "learned about the trend"
            );
        } else {
            tracing::trace!(
                agent = %self.population.introduce(listener),
                from = %self.population.introduce(source),
                ?channel,
                "not going to follow the trend"
            );
        }
        Ok(())
    }

    /// One influencer's broadcast to `followers`.
    fn deliver(
        &mut self,
        influencer: AgentId,
        followers:  &[AgentId],
        rng:        &mut SimRng,
    ) -> BehaviorResult<()> {
        for &follower in followers {
            // An earlier influencer may already have convinced this follower.
            if self.population.person(follower).is_some_and(Person::is_informed) {
                continue;
            }
            let reached = match self.params.channel {
                IndirectChannel::RandomFollowers => rng.chance(self.params.follower_reach_prob),
                IndirectChannel::FacilityEvent => {
                    let cell = self.grid.position(follower, "attend a facility event")?;
                    self.grid.cell(cell).sport_facility
                }
            };
            if !reached {
                continue;
            }
            if let Some(inf) = self.population.influencer_mut(influencer) {
                inf.record_reach();
            }
            self.counters.record_attempt(Channel::Indirect);
            tracing::trace!(
                agent = %self.population.introduce(influencer),
                to = %self.population.introduce(follower),
                "passed the trend to a follower"
            );
            self.receive(follower, influencer, Channel::Indirect, rng)?;
        }
        Ok(())
    }

    /// Broadcast phase: enthusiasts hear from influencers, the rest wander.
    fn influencer_phase(&mut self, rng: &mut SimRng) -> BehaviorResult<()> {
        let (followers, wanderers): (Vec<AgentId>, Vec<AgentId>) = self
            .population
            .uninformed_persons()
            .into_iter()
            .partition(|&id| {
                self.population
                    .person(id)
                    .is_some_and(|p| p.traits.sport_enthusiast)
            });

        if !followers.is_empty() {
            let influencers = self.population.influencers().to_vec();
            for influencer in influencers {
                self.deliver(influencer, &followers, rng)?;
            }
        }
        for agent in wanderers {
            move_person(&mut self.grid, &self.population, agent, rng)?;
        }
        Ok(())
    }
}

impl SpreadModel for TrendModel {
    type Params = TrendParams;
    type Report = TrendReport;

    fn build(params: &TrendParams, rng: &mut SimRng) -> BehaviorResult<Self> {
        params.validate()?;

        let enthusiasts = params
            .sport_enthusiasts
            .unwrap_or_else(|| rng.gen_range(1..=params.population_size));
        let others = params.population_size - enthusiasts;

        let population = PopulationBuilder::new()
            .persons(enthusiasts, params.person(Traits::sport_enthusiast()))
            .persons(others, params.person(Traits::default()))
            .person(params.person(Traits::sport_enthusiast()).informed())
            .influencers(params.influencer_count)
            .build();

        let mut grid = Grid::new(params.grid_width, params.grid_height, params.torus)?;
        place_randomly(&mut grid, population.persons(), rng)?;
        grid.mark_facilities(params.sport_facilities, rng)?;

        tracing::debug!(
            persons = population.persons().len(),
            enthusiasts = enthusiasts + 1,
            influencers = params.influencer_count,
            facilities = params.sport_facilities,
            "trend model built"
        );

        Ok(Self::from_parts(params.clone(), population, grid))
    }

    fn step(&mut self, now: Tick, rng: &mut SimRng) -> BehaviorResult<()> {
        let persons = self.population.persons().to_vec();

        for &agent in &persons {
            move_person(&mut self.grid, &self.population, agent, rng)?;
        }
        for &agent in &persons {
            self.spread_news(agent, rng)?;
        }
        self.influencer_phase(rng)?;

        tracing::debug!(
            tick = now.0,
            informed = self.population.informed_count(),
            direct = self.counters.attempts(Channel::Direct),
            indirect = self.counters.attempts(Channel::Indirect),
            "trend tick done"
        );
        Ok(())
    }

    fn population(&self) -> &Population {
        &self.population
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn report(&self, tick: Tick) -> TrendReport {
        let c = &self.counters;
        let informed = self.population.informed_count();
        TrendReport {
            tick:                   tick.0,
            informed,
            uninformed:             self.population.persons().len() - informed,
            direct_interactions:    c.attempts(Channel::Direct),
            indirect_interactions:  c.attempts(Channel::Indirect),
            successful_direct:      c.successes(Channel::Direct),
            successful_indirect:    c.successes(Channel::Indirect),
            total_interactions:     c.total_attempts(),
            direct_success_ratio:   c.ratio(Channel::Direct),
            indirect_success_ratio: c.ratio(Channel::Indirect),
        }
    }
}
