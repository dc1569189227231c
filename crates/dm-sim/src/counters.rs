//! Population-level aggregates maintained by the controller.

/// Aggregate counters, adjusted on each transition rather than recomputed.
///
/// `active_dealers` never increases, `arrests` and `converted` never
/// decrease, and `arrests <= initial dealers + converted` always holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// Drug users not yet arrested.
    pub active_drug_users: u64,
    /// Dealers not yet arrested.  Zero means the run is complete.
    pub active_dealers:    u64,
    /// Arrests made so far (dealers and drug users).
    pub arrests:           u64,
    /// Citizens converted into drug users so far, arrested or not.
    pub converted:         u64,
    /// Messages in the global log.
    pub messages:          u64,
    /// Completed ticks.
    pub elapsed_ticks:     u64,
}

impl Counters {
    /// `true` once no active dealer remains.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.active_dealers == 0
    }
}
