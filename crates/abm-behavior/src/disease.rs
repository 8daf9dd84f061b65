//! The disease model: direct person-to-person infection plus infection from
//! contaminated cells.
//!
//! Per tick, in order: every person moves; every person spreads the virus to
//! its cell and co-located people; every person may catch it from its own or
//! an adjacent contaminated cell; finally every contaminated cell ages and
//! clears after [`PERSISTENCE_TICKS`](abm_grid::PERSISTENCE_TICKS) ticks
//! without an infected occupant.

use abm_agent::{Person, Population, PopulationBuilder, Traits};
use abm_core::{AgentId, CellId, SimRng, Tick, check_probability};
use abm_grid::Grid;

use crate::actions::{move_person, place_randomly};
use crate::error::check_agent_count;
use crate::{
    BehaviorError, BehaviorResult, InfectionCounters, InfectionRoute, ReportRow, SpreadModel,
};

/// Construction parameters for [`DiseaseModel`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiseaseParams {
    /// Total persons, infected and comorbid included.
    pub population_size: usize,
    /// Persons infected at tick 0.  They never have comorbidities.
    pub infected:        usize,
    /// Susceptible persons with comorbidities.
    pub comorbid:        usize,
    pub moving_prob:     f64,

    pub grid_width:  u32,
    pub grid_height: u32,
    pub torus:       bool,

    /// Direct infection probability for a healthy target.
    pub direct_prob:          f64,
    /// Direct infection probability for a comorbid target.
    pub direct_prob_comorbid: f64,

    /// Added to the location probability for comorbid persons.
    pub comorbid_location_bonus: f64,
    /// Location probability when the person's own cell is contaminated.
    pub contaminated_cell_prob:  f64,
    /// Location probability when only a neighboring cell is contaminated.
    pub adjacent_cell_prob:      f64,
}

impl Default for DiseaseParams {
    fn default() -> Self {
        Self {
            population_size:         10,
            infected:                1,
            comorbid:                4,
            moving_prob:             0.5,
            grid_width:              10,
            grid_height:             10,
            torus:                   true,
            direct_prob:             0.5,
            direct_prob_comorbid:    0.75,
            comorbid_location_bonus: 0.25,
            contaminated_cell_prob:  0.5,
            adjacent_cell_prob:      0.25,
        }
    }
}

impl DiseaseParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        if self.population_size == 0 {
            return Err(BehaviorError::Config("population_size must be at least 1".into()));
        }
        check_agent_count(Some(self.population_size))?;
        if self.infected.saturating_add(self.comorbid) > self.population_size {
            return Err(BehaviorError::Config(format!(
                "infected ({}) + comorbid ({}) exceeds population_size ({})",
                self.infected, self.comorbid, self.population_size
            )));
        }
        check_probability("moving_prob", self.moving_prob)?;
        check_probability("direct_prob", self.direct_prob)?;
        check_probability("direct_prob_comorbid", self.direct_prob_comorbid)?;
        check_probability("comorbid_location_bonus", self.comorbid_location_bonus)?;
        check_probability("contaminated_cell_prob", self.contaminated_cell_prob)?;
        check_probability("adjacent_cell_prob", self.adjacent_cell_prob)?;

        let worst = self.comorbid_location_bonus
            + self.contaminated_cell_prob.max(self.adjacent_cell_prob);
        if worst > 1.0 {
            tracing::warn!(
                probability = worst,
                "comorbid location probability exceeds 1 and will be clamped"
            );
        }
        Ok(())
    }

    fn person(&self, traits: Traits) -> Person {
        Person::new(traits).with_moving_prob(self.moving_prob)
    }
}

impl ReportRow for DiseaseParams {
    /// `initially_infected` keeps clear of the report's `infected` column.
    fn headers() -> &'static [&'static str] {
        &[
            "population_size",
            "initially_infected",
            "comorbid",
            "moving_prob",
            "grid_width",
            "grid_height",
            "torus",
            "direct_prob",
            "direct_prob_comorbid",
            "comorbid_location_bonus",
            "contaminated_cell_prob",
            "adjacent_cell_prob",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.population_size.to_string(),
            self.infected.to_string(),
            self.comorbid.to_string(),
            self.moving_prob.to_string(),
            self.grid_width.to_string(),
            self.grid_height.to_string(),
            self.torus.to_string(),
            self.direct_prob.to_string(),
            self.direct_prob_comorbid.to_string(),
            self.comorbid_location_bonus.to_string(),
            self.contaminated_cell_prob.to_string(),
            self.adjacent_cell_prob.to_string(),
        ]
    }
}

/// Model reporters for one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseReport {
    pub tick:                 u64,
    pub infected:             usize,
    pub susceptible:          usize,
    pub direct_infections:    u64,
    pub location_infections:  u64,
    pub contaminated_cells:   usize,
}

impl ReportRow for DiseaseReport {
    fn headers() -> &'static [&'static str] {
        &[
            "tick",
            "infected",
            "susceptible",
            "direct_infections",
            "location_infections",
            "contaminated_cells",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.tick.to_string(),
            self.infected.to_string(),
            self.susceptible.to_string(),
            self.direct_infections.to_string(),
            self.location_infections.to_string(),
            self.contaminated_cells.to_string(),
        ]
    }
}

pub struct DiseaseModel {
    params:     DiseaseParams,
    population: Population,
    grid:       Grid,
    counters:   InfectionCounters,
}

impl DiseaseModel {
    pub fn counters(&self) -> &InfectionCounters {
        &self.counters
    }

    /// Construct directly from parts.  Persons must already be placed.
    pub fn from_parts(params: DiseaseParams, population: Population, grid: Grid) -> Self {
        Self { params, population, grid, counters: InfectionCounters::default() }
    }

    /// Mutable grid access, for seeding contamination by hand.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn spread_virus(&mut self, agent: AgentId, rng: &mut SimRng) -> BehaviorResult<()> {
        let cell = self.grid.position(agent, "spread the virus")?;
        let person = self.population.person(agent).ok_or(BehaviorError::NotAPerson(agent))?;
        if !person.is_informed() {
            return Ok(());
        }
        if self.grid.cell_mut(cell).contaminate() {
            tracing::trace!(
                agent = %self.population.introduce(agent),
                cell = ?self.grid.lattice().coord(cell),
                "contaminated cell"
            );
        }

        let others: Vec<AgentId> = self
            .grid
            .residents(cell)
            .iter()
            .copied()
            .filter(|&other| other != agent)
            .collect();

        for other in others {
            let Some(target) = self.population.person_mut(other) else { continue };
            if target.is_informed() {
                continue;
            }
            let p = if target.traits.has_comorbidities {
                self.params.direct_prob_comorbid
            } else {
                self.params.direct_prob
            };
            if rng.chance(p) && target.acquire() {
                self.counters.record(InfectionRoute::Direct);
                tracing::trace!(
                    agent = %self.population.introduce(other),
                    from = %self.population.introduce(agent),
                    "infected directly"
                );
            }
        }
        Ok(())
    }

    /// Probability that `person` on `cell` catches the virus from the
    /// environment this tick.
    fn location_prob(&self, person: &Person, cell: CellId) -> f64 {
        let base = if self.grid.cell(cell).contaminated {
            self.params.contaminated_cell_prob
        } else if self.grid.neighborhood_contaminated(cell) {
            self.params.adjacent_cell_prob
        } else {
            return 0.0;
        };
        let bonus = if person.traits.has_comorbidities {
            self.params.comorbid_location_bonus
        } else {
            0.0
        };
        (base + bonus).clamp(0.0, 1.0)
    }

    fn acquire_from_location(&mut self, agent: AgentId, rng: &mut SimRng) -> BehaviorResult<()> {
        let cell = self.grid.position(agent, "get infected from the cell")?;
        let person = self.population.person(agent).ok_or(BehaviorError::NotAPerson(agent))?;
        if person.is_informed() {
            return Ok(());
        }
        let p = self.location_prob(person, cell);
        if !rng.chance(p) {
            return Ok(());
        }
        let person = self.population.person_mut(agent).ok_or(BehaviorError::NotAPerson(agent))?;
        if person.acquire() {
            self.counters.record(InfectionRoute::Location);
            tracing::trace!(agent = %self.population.introduce(agent), "infected from the environment");
        }
        Ok(())
    }

    /// Age every contaminated cell by one tick.
    fn decay_cells(&mut self) {
        let contaminated: Vec<CellId> = self
            .grid
            .lattice()
            .cell_ids()
            .filter(|&c| self.grid.cell(c).contaminated)
            .collect();

        let mut cleared = 0usize;
        for cell in contaminated {
            let infected_present = self
                .grid
                .residents(cell)
                .iter()
                .any(|&a| self.population.person(a).is_some_and(Person::is_informed));
            if self.grid.cell_mut(cell).decay(infected_present) {
                cleared += 1;
            }
        }
        if cleared > 0 {
            tracing::trace!(cleared, "contamination cleared");
        }
    }
}

impl SpreadModel for DiseaseModel {
    type Params = DiseaseParams;
    type Report = DiseaseReport;

    fn build(params: &DiseaseParams, rng: &mut SimRng) -> BehaviorResult<Self> {
        params.validate()?;

        let healthy = params.population_size - params.infected - params.comorbid;
        let population = PopulationBuilder::new()
            .persons(params.infected, params.person(Traits::default()).informed())
            .persons(params.comorbid, params.person(Traits::comorbid()))
            .persons(healthy, params.person(Traits::default()))
            .build();

        let mut grid = Grid::new(params.grid_width, params.grid_height, params.torus)?;
        place_randomly(&mut grid, population.persons(), rng)?;

        tracing::debug!(
            persons = population.persons().len(),
            infected = params.infected,
            comorbid = params.comorbid,
            "disease model built"
        );

        Ok(Self::from_parts(params.clone(), population, grid))
    }

    fn step(&mut self, now: Tick, rng: &mut SimRng) -> BehaviorResult<()> {
        let persons = self.population.persons().to_vec();

        for &agent in &persons {
            move_person(&mut self.grid, &self.population, agent, rng)?;
        }
        for &agent in &persons {
            self.spread_virus(agent, rng)?;
        }
        for &agent in &persons {
            self.acquire_from_location(agent, rng)?;
        }
        self.decay_cells();

        tracing::debug!(
            tick = now.0,
            infected = self.population.informed_count(),
            contaminated = self.grid.contaminated_count(),
            "disease tick done"
        );
        Ok(())
    }

    fn population(&self) -> &Population {
        &self.population
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn report(&self, tick: Tick) -> DiseaseReport {
        DiseaseReport {
            tick:                tick.0,
            infected:            self.population.informed_count(),
            susceptible:         self.population.uninformed_count(),
            direct_infections:   self.counters.get(InfectionRoute::Direct),
            location_infections: self.counters.get(InfectionRoute::Location),
            contaminated_cells:  self.grid.contaminated_count(),
        }
    }
}
