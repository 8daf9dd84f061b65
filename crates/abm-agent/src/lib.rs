//! `abm-agent`: agents and the population that owns them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`agent`]      | `Role` (`Person` / `Influencer`), `Traits`, `Agent`      |
//! | [`population`] | `Population`: creation-ordered agent storage            |
//! | [`builder`]    | `PopulationBuilder` (fluent construction by trait bucket) |
//!
//! # Roles
//!
//! Agents are a tagged enum rather than a class hierarchy.  A
//! [`Role::Person`] lives on the grid and carries the one-way
//! informed/infected flag; a [`Role::Influencer`] is non-spatial and only
//! counts the followers it reached.  Phases select agents by role through
//! [`Population::persons`] and [`Population::influencers`].

pub mod agent;
pub mod builder;
pub mod population;


pub use agent::{Agent, Influencer, Person, Role, Traits};
pub use builder::PopulationBuilder;
pub use population::Population;
