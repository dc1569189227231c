//! Many independent runs of one configuration, one per seed.
//!
//! With the `parallel` feature the seeds are spread over Rayon's global pool;
//! each run remains strictly sequential internally, so a given seed produces
//! the same [`RunSummary`] either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use dm_core::SimConfig;

use crate::{NoopObserver, RunSummary, Sim, SimError, SimResult};

/// Run `config` once per seed and return the summaries in seed order.
///
/// `config.max_ticks` must be set: a run that never arrests its last dealer
/// would otherwise never return.  The `seed` in `config` is ignored.
pub fn run_ensemble(config: &SimConfig, seeds: &[u64]) -> SimResult<Vec<RunSummary>> {
    if config.max_ticks.is_none() {
        return Err(SimError::Config("ensemble runs require max_ticks".into()));
    }
    info!(runs = seeds.len(), "starting ensemble");

    let run_one = |seed: u64| -> SimResult<RunSummary> {
        let mut sim = Sim::new(config.clone().with_seed(seed))?;
        Ok(sim.run(&mut NoopObserver))
    };

    #[cfg(feature = "parallel")]
    let summaries: SimResult<Vec<RunSummary>> = seeds.par_iter().map(|&s| run_one(s)).collect();
    #[cfg(not(feature = "parallel"))]
    let summaries: SimResult<Vec<RunSummary>> = seeds.iter().map(|&s| run_one(s)).collect();

    let summaries = summaries?;
    let completed = summaries.iter().filter(|s| s.completed).count();
    info!(runs = summaries.len(), completed, "ensemble finished");
    Ok(summaries)
}
