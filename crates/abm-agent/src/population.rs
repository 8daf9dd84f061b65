//! Creation-ordered agent storage.
//!
//! `AgentId`s are dense indices assigned in creation order, so
//! `agents[id.index()]` is an O(1) lookup and iterating `persons()` visits
//! agents in the order they were created.  Every phase of the tick loop uses
//! that order, which is what makes a seeded run reproducible.

use abm_core::AgentId;

use crate::{Agent, Influencer, Person, Role};

/// The full population.  Agents are never removed.
pub struct Population {
    agents:      Vec<Agent>,
    persons:     Vec<AgentId>,
    influencers: Vec<AgentId>,
}

impl Population {
    /// `roles` must number at most `u32::MAX`; model parameters check this
    /// before any population is built.
    pub(crate) fn from_roles(roles: Vec<Role>) -> Self {
        let mut persons = Vec::new();
        let mut influencers = Vec::new();
        let agents = roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| {
                let id = AgentId(i as u32);
                match role {
                    Role::Person(_)     => persons.push(id),
                    Role::Influencer(_) => influencers.push(id),
                }
                Agent { id, role }
            })
            .collect();
        Self { agents, persons, influencers }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Every agent in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// `"<Role> <id>"` for log lines, or the bare id if `id` is unknown.
    pub fn introduce(&self, id: AgentId) -> String {
        self.get(id).map_or_else(|| id.to_string(), Agent::to_string)
    }

    // ── Role selections ───────────────────────────────────────────────────

    /// Ids of all persons in creation order.
    #[inline]
    pub fn persons(&self) -> &[AgentId] {
        &self.persons
    }

    /// Ids of all influencers in creation order.
    #[inline]
    pub fn influencers(&self) -> &[AgentId] {
        &self.influencers
    }

    pub fn person(&self, id: AgentId) -> Option<&Person> {
        match self.agents.get(id.index()).map(|a| &a.role) {
            Some(Role::Person(p)) => Some(p),
            _ => None,
        }
    }

    pub fn person_mut(&mut self, id: AgentId) -> Option<&mut Person> {
        match self.agents.get_mut(id.index()).map(|a| &mut a.role) {
            Some(Role::Person(p)) => Some(p),
            _ => None,
        }
    }

    pub fn influencer_mut(&mut self, id: AgentId) -> Option<&mut Influencer> {
        match self.agents.get_mut(id.index()).map(|a| &mut a.role) {
            Some(Role::Influencer(i)) => Some(i),
            _ => None,
        }
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    /// Persons that are informed/infected.
    pub fn informed_count(&self) -> usize {
        self.persons
            .iter()
            .filter(|&&id| self.agents[id.index()].is_informed())
            .count()
    }

    /// Persons still waiting to be informed/infected.
    pub fn uninformed_count(&self) -> usize {
        self.persons.len() - self.informed_count()
    }

    /// Ids of uninformed persons, creation order.
    pub fn uninformed_persons(&self) -> Vec<AgentId> {
        self.persons
            .iter()
            .copied()
            .filter(|&id| !self.agents[id.index()].is_informed())
            .collect()
    }
}
