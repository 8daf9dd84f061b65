//! Agent operations shared by both models.

use abm_agent::Population;
use abm_core::{AgentId, SimRng};
use abm_grid::{Coord, Grid};

use crate::{BehaviorError, BehaviorResult};

/// Drop `agents` onto uniformly random cells.
///
/// All x coordinates are drawn first, then all y coordinates, one per agent
/// in the given order.
pub fn place_randomly(grid: &mut Grid, agents: &[AgentId], rng: &mut SimRng) -> BehaviorResult<()> {
    let (width, height) = (grid.width(), grid.height());
    let xs: Vec<u32> = agents.iter().map(|_| rng.gen_range(0..width)).collect();
    let ys: Vec<u32> = agents.iter().map(|_| rng.gen_range(0..height)).collect();
    for ((&agent, x), y) in agents.iter().zip(xs).zip(ys) {
        grid.place(agent, Coord::new(x, y))?;
    }
    Ok(())
}

/// `move`: with the person's `moving_prob`, step to a random 4-neighbor.
///
/// The placement precondition is checked before any draw, so an unplaced
/// agent fails without consuming randomness.
pub fn move_person(
    grid:       &mut Grid,
    population: &Population,
    agent:      AgentId,
    rng:        &mut SimRng,
) -> BehaviorResult<()> {
    let person = population.person(agent).ok_or(BehaviorError::NotAPerson(agent))?;
    grid.position(agent, "move around the grid")?;
    if rng.chance(person.moving_prob) {
        grid.move_to_random_neighbor(agent, rng)?;
    }
    Ok(())
}
