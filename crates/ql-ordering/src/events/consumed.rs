//! Consumed events (incoming from consensus).

use crate::domain::value_objects::RoundOutcome;
use serde::{Deserialize, Serialize};

/// Consensus's verdict on the proposal of the round currently at `height`.
///
/// The gate advances its own round sequence from these; `height` is carried
/// for cross-checking against the gate's `block_round`, not as an
/// independent source of round truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcomeEvent {
    /// Ledger height the verdict applies to.
    pub height: u64,
    /// Commit or reject.
    pub outcome: RoundOutcome,
}

impl RoundOutcomeEvent {
    /// Commit verdict at `height`.
    pub fn commit(height: u64) -> Self {
        Self {
            height,
            outcome: RoundOutcome::Commit,
        }
    }

    /// Reject verdict at `height`.
    pub fn reject(height: u64) -> Self {
        Self {
            height,
            outcome: RoundOutcome::Reject,
        }
    }
}
