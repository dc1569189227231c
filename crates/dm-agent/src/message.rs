//! Messages sent by data collectors.

use std::fmt;

use dm_core::{AgentId, MessageId, Tick};

/// What a data collector tells the agents sharing its cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MessageContent {
    /// Sent to police.
    DrugActivityDetected,
    /// Sent to citizens.
    StaySafe,
}

impl MessageContent {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageContent::DrugActivityDetected => "Drug activity detected",
            MessageContent::StaySafe             => "Stay safe, drug activity nearby",
        }
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivered message.  The same value is appended to the receiver's inbox
/// and to the global log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Position in the global log.
    pub id:       MessageId,
    /// Tick during which the message was sent.
    pub tick:     Tick,
    pub sender:   AgentId,
    pub receiver: AgentId,
    pub content:  MessageContent,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] agent {} -> agent {}: {}",
            self.tick, self.sender.0, self.receiver.0, self.content
        )
    }
}
