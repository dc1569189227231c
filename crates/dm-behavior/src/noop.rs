//! A no-op behavior model — agents never move or act.

use dm_core::{AgentId, AgentRng, GridPos};

use crate::{BehaviorModel, Intent, SimContext};

/// A [`BehaviorModel`] whose agents stand still and do nothing.
///
/// Useful in tests that exercise the controller's bookkeeping without any
/// stochastic rules in play.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn movement(
        &self,
        _agent: AgentId,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Option<GridPos> {
        None
    }

    fn act(
        &self,
        _agent: AgentId,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Vec<Intent> {
        vec![]
    }
}
