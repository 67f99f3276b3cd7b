//! Error types for the on-demand ordering subsystem.
//!
//! Nothing here is fatal to the process: ingestion errors leave the queue
//! unchanged, transport errors are absorbed by peer fallback, and a round
//! with no reachable peer degrades to an empty proposal.

use super::value_objects::{Hash, RoundId};
use thiserror::Error;

/// Errors surfaced by the queue, packing, and gate paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// Batch hash already present in the queue; ingestion is a no-op.
    #[error("Duplicate batch {0}")]
    DuplicateBatch(Hash),

    /// Queue at capacity; the caller must back off or drop.
    #[error("Queue full: capacity {capacity} reached")]
    QueueFull { capacity: usize },

    /// A single batch larger than any proposal could carry.
    #[error("Batch of {bytes} bytes exceeds proposal limit of {max_bytes}")]
    BatchTooLarge { bytes: usize, max_bytes: usize },

    /// Batches must carry at least one transaction.
    #[error("Empty transaction batch")]
    EmptyBatch,

    /// Request for a round already at or behind the last packed round.
    #[error("Stale request for round {0}")]
    StaleRoundRequest(RoundId),

    /// A configured limit the service cannot run with.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Single-peer transport failures, absorbed by trying the next peer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer did not answer within the per-attempt timeout.
    #[error("Request to peer timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The peer could not be reached at all.
    #[error("Peer unreachable: {0}")]
    Unreachable(String),

    /// Payload could not be encoded or decoded.
    #[error("Codec failure: {0}")]
    Codec(String),

    /// The peer answered for a different round than was asked.
    #[error("Response round {got} does not match requested round {want}")]
    RoundMismatch { want: RoundId, got: RoundId },
}
