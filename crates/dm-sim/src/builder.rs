//! Builder for constructing a [`Sim`].

use dm_agent::{AgentStoreBuilder, Role};
use dm_behavior::BehaviorModel;
use dm_core::{GridPos, SimConfig};
use dm_spatial::World;
use tracing::info;

use crate::{Counters, Sim, SimError, SimResult};

/// Builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — grid, population, seed, …
/// - `B: BehaviorModel` — the rules (usually [`dm_behavior::DrugMarketRules`])
///
/// # Optional inputs
///
/// | Method        | Default                                               |
/// |---------------|-------------------------------------------------------|
/// | `.roster(v)`  | Random placement of `config.population`               |
///
/// # Example
///
/// ```rust,ignore
/// let rules = DrugMarketRules::new(config.rules.clone())?;
/// let mut sim = SimBuilder::new(config, rules)
///     .roster(vec![(Role::Dealer, GridPos::new(0, 0)), (Role::Police, GridPos::new(0, 0))])
///     .build()?;
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    config:   SimConfig,
    behavior: B,
    roster:   Option<Vec<(Role, GridPos)>>,
}

impl<B: BehaviorModel> SimBuilder<B> {
    pub fn new(config: SimConfig, behavior: B) -> Self {
        Self { config, behavior, roster: None }
    }

    /// Place exactly these agents (agent `i` gets `roster[i]`) instead of a
    /// random `config.population`.
    pub fn roster(mut self, roster: Vec<(Role, GridPos)>) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Validate inputs, place the population, and return a ready [`Sim`].
    ///
    /// Counters start from the placed population: active dealers equal the
    /// number of dealers, everything else is zero unless the roster contains
    /// drug users.
    pub fn build(self) -> SimResult<Sim<B>> {
        let bounds = self.config.bounds()?;
        if self.config.max_ticks == Some(0) {
            return Err(SimError::Config("max_ticks must be positive when set".into()));
        }

        // An explicit roster replaces the configured head-counts.
        let builder = match self.roster {
            Some(roster) => AgentStoreBuilder::from_roster(roster, self.config.seed),
            None => AgentStoreBuilder::new(self.config.population, self.config.seed),
        };
        let (agents, rngs) = builder.build(bounds)?;

        let world = World::new(bounds, agents.positions());
        let counters = Counters {
            active_dealers:    agents.count_where(|r, s| r == Role::Dealer && s.is_active()) as u64,
            active_drug_users: agents.count_where(|r, s| r == Role::DrugUser && s.is_active()) as u64,
            ..Counters::default()
        };

        info!(
            width   = bounds.width(),
            height  = bounds.height(),
            agents  = agents.count,
            dealers = counters.active_dealers,
            seed    = self.config.seed,
            "simulation constructed"
        );

        Ok(Sim {
            config: self.config,
            agents,
            rngs,
            world,
            behavior: self.behavior,
            counters,
            messages: Vec::new(),
        })
    }
}
