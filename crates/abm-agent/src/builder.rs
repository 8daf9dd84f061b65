//! Fluent builder for constructing a `Population` bucket by bucket.
//!
//! # Usage
//!
//! ```rust
//! use abm_agent::{Person, PopulationBuilder, Traits};
//!
//! let population = PopulationBuilder::new()
//!     .persons(3, Person::new(Traits::sport_enthusiast()))
//!     .persons(2, Person::default())
//!     .person(Person::new(Traits::sport_enthusiast()).informed())
//!     .influencers(1)
//!     .build();
//!
//! assert_eq!(population.len(), 7);
//! assert_eq!(population.persons().len(), 6);
//! assert_eq!(population.informed_count(), 1);
//! ```

use crate::{Influencer, Person, Population, Role};

/// Fluent builder for [`Population`].
///
/// Agents receive ids in the order the builder calls are made, so the call
/// order *is* the iteration order of every phase.
#[derive(Default)]
pub struct PopulationBuilder {
    roles: Vec<Role>,
}

impl PopulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` clones of `template`.
    pub fn persons(mut self, count: usize, template: Person) -> Self {
        self.roles
            .extend(std::iter::repeat_n(Role::Person(template), count));
        self
    }

    /// Append a single person.
    pub fn person(mut self, person: Person) -> Self {
        self.roles.push(Role::Person(person));
        self
    }

    /// Append `count` influencers.
    pub fn influencers(mut self, count: usize) -> Self {
        self.roles
            .extend(std::iter::repeat_n(Role::Influencer(Influencer::default()), count));
        self
    }

    pub fn build(self) -> Population {
        Population::from_roles(self.roles)
    }
}
