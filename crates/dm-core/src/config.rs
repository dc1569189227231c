//! Run configuration and the tunable rule set.
//!
//! `SimConfig` is plain data.  Applications build it in code or load it from
//! JSON (with the `serde` feature) and hand it to `dm_sim::SimBuilder`.
//! Every field has a default that mirrors the reference scenario: a 40×35
//! grid with 200 citizens, 10 dealers, 10 police and 5 data collectors.

use crate::{DmResult, GridBounds};

// ── Population ────────────────────────────────────────────────────────────────

/// Initial head-count per role.  Zero is legal for any role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Population {
    pub citizens:        usize,
    pub dealers:         usize,
    pub police:          usize,
    pub data_collectors: usize,
}

impl Population {
    pub const fn new(citizens: usize, dealers: usize, police: usize, data_collectors: usize) -> Self {
        Self { citizens, dealers, police, data_collectors }
    }

    /// Total number of agents.
    #[inline]
    pub fn total(&self) -> usize {
        self.citizens + self.dealers + self.police + self.data_collectors
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new(200, 10, 10, 5)
    }
}

// ── Rule variants ─────────────────────────────────────────────────────────────

/// Which agents a role rule "sees" when it looks for partners or targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InteractionScope {
    /// Only agents in exactly the same cell.
    #[default]
    SameCell,
    /// Agents within Chebyshev distance 1, own cell included.
    ///
    /// Unlike a classic 8-cell Moore ring, co-located agents stay visible,
    /// so switching from `SameCell` only ever widens what a rule sees.
    Moore,
}

impl InteractionScope {
    /// `(radius, include_center)` arguments for a neighbor query.
    #[inline]
    pub fn query(self) -> (u32, bool) {
        match self {
            InteractionScope::SameCell => (0, true),
            InteractionScope::Moore    => (1, true),
        }
    }
}

/// What happens when a random step would leave the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementPolicy {
    /// Clip the candidate into the grid; a move always happens.
    #[default]
    Clamp,
    /// Drop the whole move and stay put.
    Discard,
}

// ── RuleSet ───────────────────────────────────────────────────────────────────

/// Probabilities and variant switches for the role rules.
///
/// The defaults are the canonical rules: same-cell interaction, clamped
/// movement, two-stage citizen conversion (0.3 then 0.5), no dealer evasion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleSet {
    pub interaction: InteractionScope,
    pub movement:    MovementPolicy,

    /// Citizen: chance that meeting a dealer turns into a deal at all.
    pub encounter_probability:    f64,
    /// Citizen: chance that a deal converts the citizen into a drug user.
    /// Set to 1.0 for the single-stage rule.
    pub conversion_probability:   f64,
    /// Dealer: chance per tick of relocating to the best nearby hotspot.
    pub hotspot_seek_probability: f64,
    /// Police: chance per tick of arresting one visible offender.
    pub arrest_probability:       f64,

    /// Dealer: step diagonally away when police or a data collector shares
    /// the dealer's cell.
    pub dealer_evasion: bool,
}

impl RuleSet {
    /// Every probability with its field name, for validation and reporting.
    pub fn probabilities(&self) -> [(&'static str, f64); 4] {
        [
            ("encounter_probability",    self.encounter_probability),
            ("conversion_probability",   self.conversion_probability),
            ("hotspot_seek_probability", self.hotspot_seek_probability),
            ("arrest_probability",       self.arrest_probability),
        ]
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            interaction:              InteractionScope::SameCell,
            movement:                 MovementPolicy::Clamp,
            encounter_probability:    0.3,
            conversion_probability:   0.5,
            hotspot_seek_probability: 0.3,
            arrest_probability:       0.4,
            dealer_evasion:           false,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub width:  u32,
    pub height: u32,

    pub population: Population,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Upper bound on ticks for `Sim::run`.  `None` runs until every dealer
    /// has been arrested, which may never happen.
    pub max_ticks: Option<u64>,

    /// Emit an agent snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    pub rules: RuleSet,
}

impl SimConfig {
    /// A config with default rules for the given grid and population.
    pub fn new(width: u32, height: u32, population: Population) -> Self {
        Self { width, height, population, ..Self::default() }
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder-style rule override.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Validated grid bounds for this config.
    pub fn bounds(&self) -> DmResult<GridBounds> {
        GridBounds::new(self.width, self.height)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width:                   40,
            height:                  35,
            population:              Population::default(),
            seed:                    42,
            max_ticks:               None,
            snapshot_interval_ticks: 0,
            rules:                   RuleSet::default(),
        }
    }
}
