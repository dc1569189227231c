//! Plain data row types written by output backends.

use dm_agent::{AgentView, Message};
use dm_sim::Counters;
use dm_spatial::Hotspot;

/// Aggregate counters after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub active_drug_users: u64,
    pub active_dealers:    u64,
    pub arrests:           u64,
    pub converted:         u64,
    /// Messages logged so far, all ticks included.
    pub messages:          u64,
}

impl TickSummaryRow {
    pub fn new(tick: u64, counters: &Counters) -> Self {
        Self {
            tick,
            active_drug_users: counters.active_drug_users,
            active_dealers:    counters.active_dealers,
            arrests:           counters.arrests,
            converted:         counters.converted,
            messages:          counters.messages,
        }
    }
}

/// One agent's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub agent_id:    u32,
    pub tick:        u64,
    pub role:        &'static str,
    pub status:      &'static str,
    pub x:           i32,
    pub y:           i32,
    /// Citizens only.
    pub trust_level: Option<u8>,
}

impl AgentSnapshotRow {
    pub fn new(tick: u64, view: &AgentView) -> Self {
        Self {
            agent_id:    view.id.0,
            tick,
            role:        view.role.kind().as_str(),
            status:      view.status.as_str(),
            x:           view.position.x,
            y:           view.position.y,
            trust_level: view.role.trust_level(),
        }
    }
}

/// One logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRow {
    pub message_id: u64,
    pub tick:       u64,
    pub sender:     u32,
    pub receiver:   u32,
    pub content:    &'static str,
}

impl From<&Message> for MessageRow {
    fn from(m: &Message) -> Self {
        Self {
            message_id: m.id.0,
            tick:       m.tick.0,
            sender:     m.sender.0,
            receiver:   m.receiver.0,
            content:    m.content.as_str(),
        }
    }
}

/// One ranked presence cell.  Rank 1 is the strongest hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotspotRow {
    pub rank:  u32,
    pub x:     i32,
    pub y:     i32,
    pub score: u64,
}

impl HotspotRow {
    pub fn new(rank: u32, hotspot: &Hotspot) -> Self {
        Self { rank, x: hotspot.cell.x, y: hotspot.cell.y, score: hotspot.score }
    }
}
