//! The drug-market role rules.
//!
//! | Role            | Rule (after the random step)                                   |
//! |-----------------|----------------------------------------------------------------|
//! | citizen         | dealer in scope → two coins → becomes a drug user              |
//! | dealer          | coin → relocate to the best presence cell of its 3×3 block     |
//! | police          | offender in scope → coin → arrest one chosen uniformly         |
//! | data collector  | users in scope → presence += count; message co-located agents  |
//! | drug user       | nothing                                                        |
//!
//! "Scope" is [`RuleSet::interaction`]: the agent's own cell by default, or
//! its Moore neighborhood.  Messages always go to agents in exactly the same
//! cell, whatever the scope.

use dm_agent::{MessageContent, Role};
use dm_core::{AgentId, AgentRng, GridPos, MovementPolicy, RuleSet, MOORE_BLOCK};

use crate::{BehaviorError, BehaviorModel, BehaviorResult, Intent, SimContext};

/// [`BehaviorModel`] implementing the drug-market rules for a given
/// [`RuleSet`].
#[derive(Clone, Debug)]
pub struct DrugMarketRules {
    rules: RuleSet,
}

impl DrugMarketRules {
    /// Validate `rules` and wrap them.  Every probability must be a finite
    /// value in `[0, 1]`.
    pub fn new(rules: RuleSet) -> BehaviorResult<Self> {
        for (name, value) in rules.probabilities() {
            if !(0.0..=1.0).contains(&value) {
                return Err(BehaviorError::InvalidProbability { name, value });
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    // ── Per-role rules ────────────────────────────────────────────────────

    pub fn citizen(&self, agent: AgentId, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let here = ctx.agents.position(agent);
        let dealers = ctx.visible_active(agent, here, self.rules.interaction, |r| *r == Role::Dealer);
        if dealers.is_empty() {
            return vec![];
        }
        if rng.gen_bool(self.rules.encounter_probability)
            && rng.gen_bool(self.rules.conversion_probability)
        {
            return vec![Intent::BecomeDrugUser];
        }
        vec![]
    }

    pub fn dealer(&self, agent: AgentId, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let here = ctx.agents.position(agent);

        if self.rules.dealer_evasion {
            let watchers = ctx.visible_active(agent, here, dm_core::InteractionScope::SameCell, |r| {
                matches!(r, Role::Police | Role::DataCollector)
            });
            if !watchers.is_empty() {
                let away = ctx.world.clamp_to_bounds(
                    here.x + rng.diagonal_step(),
                    here.y + rng.diagonal_step(),
                );
                return move_unless_here(here, away);
            }
        }

        if !rng.gen_bool(self.rules.hotspot_seek_probability) {
            return vec![];
        }
        move_unless_here(here, best_presence_cell(here, ctx))
    }

    pub fn police(&self, agent: AgentId, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let here = ctx.agents.position(agent);
        let offenders = ctx.visible_active(agent, here, self.rules.interaction, Role::is_offender);
        if offenders.is_empty() || !rng.gen_bool(self.rules.arrest_probability) {
            return vec![];
        }
        match rng.choose(&offenders) {
            Some(&target) => vec![Intent::Arrest(target)],
            None => vec![],
        }
    }

    pub fn data_collector(&self, agent: AgentId, ctx: &SimContext<'_>) -> Vec<Intent> {
        let here = ctx.agents.position(agent);
        let mut intents = Vec::new();

        let users = ctx.visible_active(agent, here, self.rules.interaction, |r| *r == Role::DrugUser);
        if !users.is_empty() {
            intents.push(Intent::RecordPresence { cell: here, amount: users.len() as u64 });
        }

        for other in ctx.world.agents_at(here) {
            if other == agent {
                continue;
            }
            let content = match ctx.agents.role(other) {
                Role::Police         => MessageContent::DrugActivityDetected,
                Role::Citizen { .. } => MessageContent::StaySafe,
                _ => continue,
            };
            intents.push(Intent::SendMessage { to: other, content });
        }
        intents
    }
}

impl BehaviorModel for DrugMarketRules {
    fn movement(
        &self,
        agent: AgentId,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Option<GridPos> {
        let here = ctx.agents.position(agent);
        let candidate = here.offset(rng.step(), rng.step());
        match self.rules.movement {
            MovementPolicy::Clamp   => Some(ctx.world.bounds().clamp(candidate)),
            MovementPolicy::Discard => ctx.world.contains(candidate).then_some(candidate),
        }
    }

    fn act(
        &self,
        agent: AgentId,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Vec<Intent> {
        match ctx.agents.role(agent) {
            Role::Citizen { .. } => self.citizen(agent, ctx, rng),
            Role::Dealer         => self.dealer(agent, ctx, rng),
            Role::Police         => self.police(agent, ctx, rng),
            Role::DataCollector  => self.data_collector(agent, ctx),
            Role::DrugUser | Role::Arrested => vec![],
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The in-bounds cell of the 3×3 block around `here` with the highest
/// presence.  Ties go to the first maximal cell in [`MOORE_BLOCK`] order.
fn best_presence_cell(here: GridPos, ctx: &SimContext<'_>) -> GridPos {
    let mut best = here;
    let mut best_score = None;
    for (dx, dy) in MOORE_BLOCK {
        let cell = here.offset(dx, dy);
        if !ctx.world.contains(cell) {
            continue;
        }
        let score = ctx.world.presence_at(cell);
        if best_score.is_none_or(|b| score > b) {
            best = cell;
            best_score = Some(score);
        }
    }
    best
}

fn move_unless_here(here: GridPos, to: GridPos) -> Vec<Intent> {
    if to == here { vec![] } else { vec![Intent::MoveTo(to)] }
}
