//! Builder for `AgentStore` + `AgentRngs`.
//!
//! # Usage
//!
//! ```rust
//! use dm_agent::{AgentStoreBuilder, RoleKind};
//! use dm_core::{GridBounds, Population};
//!
//! let bounds = GridBounds::new(10, 10).unwrap();
//! let (store, rngs) = AgentStoreBuilder::new(Population::new(50, 5, 5, 2), /*seed=*/ 42)
//!     .build(bounds)
//!     .unwrap();
//!
//! assert_eq!(store.count, 62);
//! assert_eq!(rngs.len(), 62);
//! assert_eq!(store.role(dm_core::AgentId(50)).kind(), RoleKind::Dealer);
//! ```

use dm_core::{AgentId, DmError, DmResult, GridBounds, GridPos, Population, SimRng};

use crate::{AgentRngs, AgentStore, Role};

/// Stream offset for the placement RNG, so placement never shares a stream
/// with any agent.
const PLACEMENT_STREAM: u64 = 0x706c_6163_656d_656e;

enum Roster {
    /// Role blocks in id order (citizens, dealers, police, data collectors)
    /// at uniformly random positions.
    Random(Population),
    /// Caller-chosen roles and positions, in id order.
    Explicit(Vec<(Role, GridPos)>),
}

/// Builds a population, either from head-counts or from an explicit roster.
pub struct AgentStoreBuilder {
    roster: Roster,
    seed:   u64,
}

impl AgentStoreBuilder {
    /// Random placement of `population` using `seed`.
    ///
    /// Ids are assigned sequentially in role blocks: citizens first, then
    /// dealers, police and data collectors.  Citizens draw a trust level
    /// uniformly from `[0, 100]`.
    pub fn new(population: Population, seed: u64) -> Self {
        Self { roster: Roster::Random(population), seed }
    }

    /// Exact roles and positions, agent `i` taking `agents[i]`.
    ///
    /// `Role::Arrested` is rejected at build time: every agent starts active.
    pub fn from_roster(agents: Vec<(Role, GridPos)>, seed: u64) -> Self {
        Self { roster: Roster::Explicit(agents), seed }
    }

    /// Construct the store and per-agent RNGs.
    pub fn build(self, bounds: GridBounds) -> DmResult<(AgentStore, AgentRngs)> {
        let (roles, positions): (Vec<Role>, Vec<GridPos>) = match self.roster {
            Roster::Random(population) => place_randomly(population, bounds, self.seed),
            Roster::Explicit(agents) => {
                for (i, (role, pos)) in agents.iter().enumerate() {
                    if *role == Role::Arrested {
                        return Err(DmError::Config(format!(
                            "agent {i} cannot start as arrested"
                        )));
                    }
                    if !bounds.contains(*pos) {
                        return Err(DmError::Config(format!(
                            "agent {i} placed at {pos}, outside {}x{} grid",
                            bounds.width(),
                            bounds.height()
                        )));
                    }
                    if let Role::Citizen { trust_level } = role {
                        if *trust_level > 100 {
                            return Err(DmError::Config(format!(
                                "agent {i} trust level {trust_level} exceeds 100"
                            )));
                        }
                    }
                }
                agents.into_iter().unzip()
            }
        };

        if u32::try_from(roles.len()).map_or(true, |n| n == AgentId::INVALID.0) {
            return Err(DmError::Config(format!(
                "population of {} agents exceeds the id space",
                roles.len()
            )));
        }

        let rngs = AgentRngs::new(roles.len(), self.seed);
        Ok((AgentStore::new(roles, positions), rngs))
    }
}

fn place_randomly(population: Population, bounds: GridBounds, seed: u64) -> (Vec<Role>, Vec<GridPos>) {
    let mut rng = SimRng::new(seed).child(PLACEMENT_STREAM);
    let total = population.total();
    let mut roles = Vec::with_capacity(total);
    let mut positions = Vec::with_capacity(total);

    let blocks = [
        (population.citizens,        None),
        (population.dealers,         Some(Role::Dealer)),
        (population.police,          Some(Role::Police)),
        (population.data_collectors, Some(Role::DataCollector)),
    ];
    for (count, fixed_role) in blocks {
        for _ in 0..count {
            let x = rng.gen_range(0..bounds.width() as i32);
            let y = rng.gen_range(0..bounds.height() as i32);
            let role = fixed_role.unwrap_or_else(|| Role::Citizen {
                trust_level: rng.gen_range(0..=100),
            });
            roles.push(role);
            positions.push(GridPos::new(x, y));
        }
    }
    (roles, positions)
}
