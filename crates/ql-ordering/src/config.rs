//! Configuration for the on-demand ordering subsystem.

use crate::domain::errors::OrderingError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do with the batches of a locally packed proposal whose round was
/// rejected by consensus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectedBatchPolicy {
    /// Drop them; upstream resubmission is responsible for retries.
    Discard,
    /// Push them back into the queue (duplicates ignored).
    Requeue,
}

/// Ordering configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Maximum transactions packed into one proposal.
    pub max_transactions_per_proposal: usize,
    /// Maximum summed payload bytes packed into one proposal.
    pub max_proposal_bytes: usize,
    /// Per-peer proposal request timeout (milliseconds).
    pub proposal_request_timeout_ms: u64,
    /// Maximum batches held in the pending queue.
    pub queue_capacity: usize,
    /// How many produced rounds stay cached and re-servable.
    pub rounds_cache_window: usize,
    /// Peers assigned to each round, typically 2f+1 of 3f+1.
    pub number_of_ordering_peers: usize,
    /// Policy for batches consumed into a rejected local proposal.
    pub rejected_batch_policy: RejectedBatchPolicy,
    /// Consecutive all-peers-exhausted rounds before the liveness alert.
    pub liveness_alert_after_rounds: u32,
}

impl OrderingConfig {
    /// Per-peer request timeout as a `Duration`.
    pub fn proposal_request_timeout(&self) -> Duration {
        Duration::from_millis(self.proposal_request_timeout_ms)
    }

    /// Check the limits a running service cannot tolerate being zero.
    ///
    /// # Errors
    /// - `InvalidConfig` naming the offending field
    pub fn validate(&self) -> Result<(), OrderingError> {
        if self.queue_capacity == 0 {
            return Err(OrderingError::InvalidConfig("queue_capacity must be > 0"));
        }
        if self.rounds_cache_window == 0 {
            return Err(OrderingError::InvalidConfig(
                "rounds_cache_window must be > 0",
            ));
        }
        if self.max_transactions_per_proposal == 0 {
            return Err(OrderingError::InvalidConfig(
                "max_transactions_per_proposal must be > 0",
            ));
        }
        if self.max_proposal_bytes == 0 {
            return Err(OrderingError::InvalidConfig(
                "max_proposal_bytes must be > 0",
            ));
        }
        Ok(())
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            max_transactions_per_proposal: 1_000,
            max_proposal_bytes: 2 * 1024 * 1024,
            proposal_request_timeout_ms: 1_000,
            queue_capacity: 10_000,
            rounds_cache_window: 3,
            number_of_ordering_peers: 3,
            rejected_batch_policy: RejectedBatchPolicy::Discard,
            liveness_alert_after_rounds: 5,
        }
    }
}
