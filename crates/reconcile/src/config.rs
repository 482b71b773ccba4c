//! Numeric knobs of the engine.

use serde::{Deserialize, Serialize};

/// Floating-point tolerance for the zero-sum check, in base-currency units.
///
/// Distinct from the settlement epsilon, which is derived from the ledger's
/// display precision (see [`crate::settlement_epsilon`]).
pub const DEFAULT_CONSERVATION_TOLERANCE: f64 = 1e-6;

/// Corrections larger than this fraction of the ledger's volume are reported
/// as significant.
pub const DEFAULT_DRIFT_WARNING_RATIO: f64 = 1e-9;

/// Engine configuration.
///
/// Deserializable with every field optional, so a partial config file or an
/// empty object yields the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Residual above which the anchor person absorbs the drift.
    pub conservation_tolerance: f64,
    pub drift_warning_ratio: f64,
    /// Settlement round cap is `base_round_budget + rounds_per_participant * n`.
    pub rounds_per_participant: usize,
    pub base_round_budget: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            conservation_tolerance: DEFAULT_CONSERVATION_TOLERANCE,
            drift_warning_ratio: DEFAULT_DRIFT_WARNING_RATIO,
            rounds_per_participant: 4,
            base_round_budget: 16,
        }
    }
}

impl ReconcileConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.conservation_tolerance = tolerance;
        self
    }

    /// Maximum settlement rounds for `participants` people.
    pub fn round_budget(&self, participants: usize) -> usize {
        self.rounds_per_participant
            .saturating_mul(participants)
            .saturating_add(self.base_round_budget)
    }
}
