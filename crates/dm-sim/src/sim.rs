//! The `Sim` controller and its tick loop.

use dm_agent::{AgentRngs, AgentStore, AgentView, Message, Role};
use dm_behavior::{BehaviorModel, DrugMarketRules, Intent, SimContext};
use dm_core::{AgentId, GridPos, MessageId, SimConfig, Tick};
use dm_spatial::{Hotspot, World};
use tracing::{debug, info, trace, warn};

use crate::{Counters, SimBuilder, SimObserver, SimResult};

/// Outcome of one call to [`Sim::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// The given tick was processed.
    Advanced(Tick),
    /// No active dealers remain; nothing was done.
    Complete,
}

/// End-of-run digest, as returned by [`Sim::run`] and ensembles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub seed:      u64,
    pub counters:  Counters,
    pub completed: bool,
    /// Top presence cells at the end of the run.
    pub hotspots:  Vec<Hotspot>,
}

/// Number of hotspots kept in a [`RunSummary`].
const SUMMARY_HOTSPOTS: usize = 5;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation controller.
///
/// Owns the population, the world and the message log, and is the only
/// writer of any of them.  Create via [`Sim::new`] or
/// [`SimBuilder`][crate::SimBuilder].  A new run means a new `Sim`; there is
/// no reset.
pub struct Sim<B: BehaviorModel = DrugMarketRules> {
    pub(crate) config:   SimConfig,
    pub(crate) agents:   AgentStore,
    pub(crate) rngs:     AgentRngs,
    pub(crate) world:    World,
    pub(crate) behavior: B,
    pub(crate) counters: Counters,
    pub(crate) messages: Vec<Message>,
}

impl Sim<DrugMarketRules> {
    /// Build a run with the drug-market rules from `config.rules` and a
    /// randomly placed population.
    ///
    /// Fails on a zero-area grid or an out-of-range rule probability.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let rules = DrugMarketRules::new(config.rules.clone())?;
        SimBuilder::new(config, rules).build()
    }
}

impl<B: BehaviorModel> Sim<B> {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one tick.
    ///
    /// Once no active dealer remains this is a no-op returning
    /// [`TickStatus::Complete`]; callers may keep calling it harmlessly.
    pub fn tick(&mut self) -> TickStatus {
        if self.counters.is_complete() {
            return TickStatus::Complete;
        }

        let now = self.current_tick();
        for i in 0..self.agents.count {
            self.activate(AgentId(i as u32), now);
        }
        self.counters.elapsed_ticks += 1;

        trace!(
            tick    = now.0,
            users   = self.counters.active_drug_users,
            dealers = self.counters.active_dealers,
            arrests = self.counters.arrests,
            "tick processed"
        );
        if self.counters.is_complete() {
            info!(tick = now.0, arrests = self.counters.arrests, "all dealers arrested");
        }
        TickStatus::Advanced(now)
    }

    /// Run until every dealer is arrested or `config.max_ticks` ticks have
    /// elapsed, calling observer hooks along the way.
    ///
    /// With `max_ticks == None` this only returns on completion.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunSummary {
        loop {
            if let Some(max) = self.config.max_ticks {
                if self.counters.elapsed_ticks >= max {
                    break;
                }
            }
            if self.step_observed(observer) == TickStatus::Complete {
                break;
            }
        }
        observer.on_sim_end(self.current_tick(), &self.world);
        self.summary()
    }

    /// Run at most `n` ticks from the current position, ignoring
    /// `max_ticks`.  Stops early on completion.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            if self.step_observed(observer) == TickStatus::Complete {
                break;
            }
        }
    }

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> TickStatus {
        if self.counters.is_complete() {
            return TickStatus::Complete;
        }
        let now = self.current_tick();
        let logged_before = self.messages.len();

        observer.on_tick_start(now);
        let status = self.tick();
        observer.on_tick_end(now, &self.counters, &self.messages[logged_before..]);
        if now.is_multiple_of(self.config.snapshot_interval_ticks) {
            observer.on_snapshot(now, &self.agents);
        }
        if self.counters.is_complete() {
            observer.on_complete(now, &self.counters);
        }
        status
    }

    // ── Per-agent activation ──────────────────────────────────────────────

    fn activate(&mut self, agent: AgentId, now: Tick) {
        if !self.agents.is_active(agent) {
            return;
        }

        // ① Movement.
        let step = {
            let ctx = SimContext::new(now, &self.agents, &self.world);
            self.behavior.movement(agent, &ctx, self.rngs.get_mut(agent))
        };
        if let Some(to) = step {
            self.move_agent(agent, to);
        }

        // ② Role behavior, observing the move just made.
        let intents = {
            let ctx = SimContext::new(now, &self.agents, &self.world);
            self.behavior.act(agent, &ctx, self.rngs.get_mut(agent))
        };
        for intent in intents {
            self.apply(agent, intent, now);
        }
    }

    fn move_agent(&mut self, agent: AgentId, to: GridPos) {
        if !self.world.contains(to) {
            warn!(agent = agent.0, x = to.x, y = to.y, "ignoring off-grid move");
            return;
        }
        if let Some(from) = self.agents.set_position(agent, to) {
            self.world.relocate(agent, from, to);
        }
    }

    /// Fold one intent into state and counters.  Intents that no longer make
    /// sense (stale target, off-grid cell) are dropped.
    fn apply(&mut self, agent: AgentId, intent: Intent, now: Tick) {
        match intent {
            Intent::MoveTo(to) => {
                debug!(tick = now.0, dealer = agent.0, x = to.x, y = to.y, "dealer relocated");
                self.move_agent(agent, to);
            }

            Intent::BecomeDrugUser => {
                if self.agents.convert_to_drug_user(agent) {
                    self.counters.active_drug_users += 1;
                    self.counters.converted += 1;
                    debug!(tick = now.0, citizen = agent.0, "citizen became a drug user");
                }
            }

            Intent::Arrest(target) => {
                if !self.agents.contains(target) {
                    warn!(agent = agent.0, target = target.0, "arrest target out of range");
                    return;
                }
                let Some(former) = self.agents.arrest(target) else {
                    return;
                };
                match former {
                    Role::Dealer => {
                        self.counters.active_dealers = self.counters.active_dealers.saturating_sub(1);
                    }
                    Role::DrugUser => {
                        self.counters.active_drug_users =
                            self.counters.active_drug_users.saturating_sub(1);
                    }
                    _ => {}
                }
                self.counters.arrests += 1;
                debug!(tick = now.0, police = agent.0, target = target.0, role = %former, "arrest");
            }

            Intent::RecordPresence { cell, amount } => {
                if self.world.contains(cell) {
                    self.world.record_presence(cell, amount);
                }
            }

            Intent::SendMessage { to, content } => {
                if !self.agents.contains(to) || !self.agents.role(to).is_message_recipient() {
                    return;
                }
                let message = Message {
                    id:       MessageId(self.messages.len() as u64),
                    tick:     now,
                    sender:   agent,
                    receiver: to,
                    content,
                };
                self.agents.deliver(message);
                self.messages.push(message);
                self.counters.messages += 1;
            }
        }
    }

    // ── Read accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The tick the next call to [`tick`][Self::tick] would process.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        Tick(self.counters.elapsed_ticks)
    }

    #[inline]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    #[inline]
    pub fn active_drug_user_count(&self) -> u64 {
        self.counters.active_drug_users
    }

    #[inline]
    pub fn active_dealer_count(&self) -> u64 {
        self.counters.active_dealers
    }

    #[inline]
    pub fn arrest_count(&self) -> u64 {
        self.counters.arrests
    }

    #[inline]
    pub fn elapsed_ticks(&self) -> u64 {
        self.counters.elapsed_ticks
    }

    /// `true` once no active dealer remains.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.counters.is_complete()
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// One agent's `(id, role, status, position)`, `None` if out of range.
    pub fn agent(&self, agent: AgentId) -> Option<AgentView> {
        self.agents.contains(agent).then(|| self.agents.view(agent))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn presence_at(&self, cell: GridPos) -> u64 {
        self.world.presence_at(cell)
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    /// The full message log, oldest first.
    pub fn message_log(&self) -> &[Message] {
        &self.messages
    }

    /// The last `n` logged messages, oldest first.
    pub fn recent_messages(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Messages received by `agent`, `None` if out of range.
    pub fn inbox(&self, agent: AgentId) -> Option<&[Message]> {
        self.agents.contains(agent).then(|| self.agents.inbox(agent))
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed:      self.config.seed,
            counters:  self.counters,
            completed: self.is_complete(),
            hotspots:  self.world.hotspots(SUMMARY_HOTSPOTS),
        }
    }
}
