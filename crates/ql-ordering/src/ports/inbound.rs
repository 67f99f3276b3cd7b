//! Inbound ports (driving API).

use crate::domain::entities::{Batch, Proposal};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::RoundId;
use async_trait::async_trait;
use std::sync::Arc;

/// Primary on-demand ordering API.
///
/// The transport server and the gate drive the core through this trait.
#[async_trait]
pub trait OnDemandOrderingApi: Send + Sync {
    /// Return the proposal for `round`, packing it on first request.
    ///
    /// Idempotent while the round stays inside the cache window; a request
    /// for a round at or behind the last packed round is answered with an
    /// empty proposal and never repacked.
    async fn request_proposal(&self, round: RoundId) -> Arc<Proposal>;

    /// Enqueue a pending batch in arrival order.
    async fn push_batch(&self, batch: Batch) -> Result<(), OrderingError>;

    /// Number of batches currently pending.
    fn queue_len(&self) -> usize;
}
