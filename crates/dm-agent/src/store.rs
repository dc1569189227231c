//! Core population storage: `AgentStore` (SoA data) and `AgentRngs`.
//!
//! # Why two structs?
//!
//! The controller hands rules a shared `&AgentStore` (through the behavior
//! context) and, at the same time, the acting agent's `&mut AgentRng`.  The
//! borrow checker forbids that if both live in one struct, so the RNGs sit in
//! a separate [`AgentRngs`].
//!
//! # Invariants
//!
//! The store is the only writer of role and status, and it only exposes the
//! legal transitions:
//!
//! - [`convert_to_drug_user`][AgentStore::convert_to_drug_user]: active citizen → drug user.
//! - [`arrest`][AgentStore::arrest]: active dealer or drug user → arrested + inactive.
//!
//! Consequently `status == Inactive` holds exactly when `role == Arrested`.

use dm_core::{AgentId, AgentRng, GridPos};

use crate::{Message, Role, Status};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentView ─────────────────────────────────────────────────────────────────

/// A read-only copy of one agent's public state, for presentation layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:       AgentId,
    pub role:     Role,
    pub status:   Status,
    pub position: GridPos,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for the whole population.
///
/// Every `Vec` has exactly `count` elements; the `AgentId` value is the index
/// into all of them.  Membership is fixed at construction: arrest changes a
/// role, it never removes an agent.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    roles:     Vec<Role>,
    statuses:  Vec<Status>,
    positions: Vec<GridPos>,
    inboxes:   Vec<Vec<Message>>,
}

impl AgentStore {
    pub(crate) fn new(roles: Vec<Role>, positions: Vec<GridPos>) -> Self {
        debug_assert_eq!(roles.len(), positions.len());
        let count = roles.len();
        Self {
            count,
            roles,
            statuses:  vec![Status::Active; count],
            positions,
            inboxes:   vec![Vec::new(); count],
        }
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` if `agent` indexes into this store.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Iterator over all `AgentId`s in ascending (activation) order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn role(&self, agent: AgentId) -> Role {
        self.roles[agent.index()]
    }

    #[inline]
    pub fn status(&self, agent: AgentId) -> Status {
        self.statuses[agent.index()]
    }

    #[inline]
    pub fn is_active(&self, agent: AgentId) -> bool {
        self.statuses[agent.index()].is_active()
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> GridPos {
        self.positions[agent.index()]
    }

    /// Messages received by `agent`, oldest first.
    #[inline]
    pub fn inbox(&self, agent: AgentId) -> &[Message] {
        &self.inboxes[agent.index()]
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    pub fn view(&self, agent: AgentId) -> AgentView {
        AgentView {
            id:       agent,
            role:     self.role(agent),
            status:   self.status(agent),
            position: self.position(agent),
        }
    }

    /// Views of every agent in ascending id order.
    pub fn views(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.agent_ids().map(move |a| self.view(a))
    }

    // ── Writes (controller only) ──────────────────────────────────────────

    /// Move an active agent.  Returns the previous position, or `None` (and
    /// changes nothing) if the agent is inactive.
    pub fn set_position(&mut self, agent: AgentId, to: GridPos) -> Option<GridPos> {
        if !self.is_active(agent) {
            return None;
        }
        let from = std::mem::replace(&mut self.positions[agent.index()], to);
        Some(from)
    }

    /// Citizen → drug user.  Returns `false` (and changes nothing) for any
    /// other role or an inactive agent.
    pub fn convert_to_drug_user(&mut self, agent: AgentId) -> bool {
        let i = agent.index();
        if !self.statuses[i].is_active() || !matches!(self.roles[i], Role::Citizen { .. }) {
            return false;
        }
        self.roles[i] = Role::DrugUser;
        true
    }

    /// Arrest an active dealer or drug user.
    ///
    /// Returns the role the agent held before the arrest, or `None` (and
    /// changes nothing) if the agent is not an active offender.
    pub fn arrest(&mut self, agent: AgentId) -> Option<Role> {
        let i = agent.index();
        if !self.statuses[i].is_active() || !self.roles[i].is_offender() {
            return None;
        }
        let former = std::mem::replace(&mut self.roles[i], Role::Arrested);
        self.statuses[i] = Status::Inactive;
        Some(former)
    }

    /// Append `message` to its receiver's inbox.
    pub fn deliver(&mut self, message: Message) {
        self.inboxes[message.receiver.index()].push(message);
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    /// Count agents matching `pred` by a full scan.  Used to seed the
    /// controller's counters and to cross-check them in tests.
    pub fn count_where(&self, mut pred: impl FnMut(Role, Status) -> bool) -> usize {
        self.roles
            .iter()
            .zip(&self.statuses)
            .filter(|&(&r, &s)| pred(r, s))
            .count()
    }
}
