//! Fluent builder for constructing a [`Simulation`].

use abm_behavior::SpreadModel;
use abm_core::{SimConfig, SimRng};

use crate::{SimResult, Simulation};

/// Builder for [`Simulation<M>`].
///
/// The model is built from `params` with the same RNG stream the run will
/// use afterwards, so construction draws (trait buckets, placement,
/// facilities) are part of the seeded sequence.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::<TrendModel>::new(config, TrendParams::default()).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: SpreadModel> {
    config: SimConfig,
    params: M::Params,
}

impl<M: SpreadModel> SimBuilder<M> {
    pub fn new(config: SimConfig, params: M::Params) -> Self {
        Self { config, params }
    }

    /// Override the seed from `config`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Validate the configuration and build the model.
    pub fn build(self) -> SimResult<Simulation<M>> {
        self.config.validate()?;
        let mut rng = SimRng::new(self.config.seed);
        let model = M::build(&self.params, &mut rng)?;
        Ok(Simulation::new(self.config, model, rng))
    }

    /// Wrap an already built model.  The RNG is seeded from `config.seed`.
    pub fn from_model(config: SimConfig, model: M) -> SimResult<Simulation<M>> {
        config.validate()?;
        let rng = SimRng::new(config.seed);
        Ok(Simulation::new(config, model, rng))
    }
}
