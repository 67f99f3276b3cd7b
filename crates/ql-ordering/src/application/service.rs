//! On-demand ordering core: queue ownership, lazy per-round packing, and
//! the bounded proposal cache.

use crate::config::{OrderingConfig, RejectedBatchPolicy};
use crate::domain::cache::ProposalCache;
use crate::domain::entities::{Batch, Proposal};
use crate::domain::errors::OrderingError;
use crate::domain::queue::TransactionQueue;
use crate::domain::value_objects::RoundId;
use crate::ports::inbound::OnDemandOrderingApi;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pack-time state: the cache window plus the highest round packing has
/// been invoked for. Guarded by one lock so packing happens at most once
/// per round, with every concurrent caller converging on the one result.
#[derive(Debug)]
struct PackState {
    cache: ProposalCache,
    last_packed: Option<RoundId>,
}

/// The on-demand ordering service core.
///
/// Producers push batches concurrently; packing drains a FIFO prefix under
/// the queue lock and caches the resulting proposal under the pack lock.
/// Neither lock is held across an await point, and batch ingestion only
/// contends with packing during the brief drain.
pub struct OnDemandOrderingService {
    config: OrderingConfig,
    queue: Mutex<TransactionQueue>,
    pack: Mutex<PackState>,
}

impl OnDemandOrderingService {
    /// Create a service with default configuration.
    pub fn new() -> Self {
        Self::from_parts(OrderingConfig::default())
    }

    /// Create a service with custom configuration.
    ///
    /// # Errors
    /// - `InvalidConfig` if a zero limit would make the service inert
    pub fn with_config(config: OrderingConfig) -> Result<Self, OrderingError> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: OrderingConfig) -> Self {
        Self {
            queue: Mutex::new(TransactionQueue::new(config.queue_capacity)),
            pack: Mutex::new(PackState {
                cache: ProposalCache::new(config.rounds_cache_window),
                last_packed: None,
            }),
            config,
        }
    }

    /// The configuration this service runs with.
    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Enqueue a pending batch.
    ///
    /// # Errors
    /// - `BatchTooLarge` if the batch alone exceeds the proposal byte limit
    /// - `DuplicateBatch` if the hash is already queued
    /// - `QueueFull` if the queue is at capacity
    pub fn push_batch(&self, batch: Batch) -> Result<(), OrderingError> {
        if batch.payload_bytes() > self.config.max_proposal_bytes {
            return Err(OrderingError::BatchTooLarge {
                bytes: batch.payload_bytes(),
                max_bytes: self.config.max_proposal_bytes,
            });
        }

        let hash = batch.hash();
        self.queue.lock().push(batch)?;
        debug!(batch = %hash, "batch queued");
        Ok(())
    }

    /// Return the proposal for `round`, packing it on first request.
    ///
    /// Cached rounds are served as-is. A round newer than anything packed so
    /// far drains the queue and produces a new proposal (possibly empty). A
    /// round at or behind the last packed one whose entry is gone is served
    /// empty and never repacked: repacking would break idempotency and could
    /// consume queued batches into a round consensus has moved past.
    pub fn request_proposal(&self, round: RoundId) -> Arc<Proposal> {
        let mut pack = self.pack.lock();

        if let Some(cached) = pack.cache.get(round) {
            debug!(%round, "serving cached proposal");
            return cached;
        }

        if pack.last_packed.is_some_and(|last| round <= last) {
            warn!(
                %round,
                error = %OrderingError::StaleRoundRequest(round),
                "serving empty proposal for stale round"
            );
            return Arc::new(Proposal::empty(round));
        }

        let batches = self.queue.lock().drain(
            self.config.max_transactions_per_proposal,
            self.config.max_proposal_bytes,
        );
        let proposal = Proposal::new(round, batches);

        info!(
            %round,
            batches = proposal.batches().len(),
            transactions = proposal.transaction_count(),
            bytes = proposal.payload_bytes(),
            "packed proposal"
        );

        pack.last_packed = Some(round);
        pack.cache.insert(proposal)
    }

    /// Apply the rejected-batch policy after consensus rejects `round`.
    ///
    /// Under `Requeue`, the batches of a locally cached proposal for that
    /// round go back into the queue; duplicates are ignored and a full
    /// queue is logged, not propagated. Under `Discard` this is a no-op.
    pub fn handle_rejection(&self, round: RoundId) {
        if self.config.rejected_batch_policy == RejectedBatchPolicy::Discard {
            return;
        }

        let Some(rejected) = self.pack.lock().cache.get(round) else {
            debug!(%round, "rejected round not locally cached; nothing to requeue");
            return;
        };

        let mut requeued = 0usize;
        let mut queue = self.queue.lock();
        for batch in rejected.batches() {
            match queue.push(batch.clone()) {
                Ok(()) => requeued += 1,
                Err(OrderingError::DuplicateBatch(_)) => {}
                Err(err) => {
                    warn!(%round, error = %err, "could not requeue rejected batch");
                    break;
                }
            }
        }
        drop(queue);

        if requeued > 0 {
            info!(%round, requeued, "requeued batches from rejected proposal");
        }
    }

    /// Number of batches currently pending.
    pub fn queue_len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl Default for OnDemandOrderingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OnDemandOrderingApi for OnDemandOrderingService {
    async fn request_proposal(&self, round: RoundId) -> Arc<Proposal> {
        OnDemandOrderingService::request_proposal(self, round)
    }

    async fn push_batch(&self, batch: Batch) -> Result<(), OrderingError> {
        OnDemandOrderingService::push_batch(self, batch)
    }

    fn queue_len(&self) -> usize {
        OnDemandOrderingService::queue_len(self)
    }
}
