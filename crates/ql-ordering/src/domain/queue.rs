//! Pending-batch queue: deduplicated, bounded, strictly FIFO.
//!
//! Packing order is strict arrival order, so unlike a fee-market mempool
//! there is no priority index here. Two structures cover every operation:
//!
//! - `order`: arrival-ordered batches (`VecDeque`)
//! - `hashes`: O(1) duplicate detection (`HashSet`)
//!
//! INVARIANTS:
//! - No batch hash appears twice in the queue
//! - `order.len() == hashes.len()` at all times
//! - A failed push leaves both structures untouched

use super::entities::Batch;
use super::errors::OrderingError;
use super::value_objects::Hash;
use std::collections::{HashSet, VecDeque};

/// Bounded FIFO store of pending batches.
#[derive(Debug)]
pub struct TransactionQueue {
    capacity: usize,
    order: VecDeque<Batch>,
    hashes: HashSet<Hash>,
}

impl TransactionQueue {
    /// Create an empty queue holding at most `capacity` batches.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            hashes: HashSet::new(),
        }
    }

    /// Number of queued batches.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no batches are queued.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a batch with this hash is currently queued.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.hashes.contains(hash)
    }

    /// Append a batch, preserving arrival order.
    ///
    /// # Errors
    /// - `DuplicateBatch` if the hash is already queued (queue unchanged)
    /// - `QueueFull` if at capacity (queue unchanged)
    pub fn push(&mut self, batch: Batch) -> Result<(), OrderingError> {
        if self.hashes.contains(&batch.hash()) {
            return Err(OrderingError::DuplicateBatch(batch.hash()));
        }

        if self.order.len() >= self.capacity {
            return Err(OrderingError::QueueFull {
                capacity: self.capacity,
            });
        }

        self.hashes.insert(batch.hash());
        self.order.push_back(batch);
        Ok(())
    }

    /// Atomically remove and return a FIFO prefix respecting both limits.
    ///
    /// Stops before the batch that would push the total past `max_count`
    /// transactions or `max_bytes` payload bytes. May return an empty vec
    /// when the queue is empty or the head batch alone exceeds a limit.
    pub fn drain(&mut self, max_count: usize, max_bytes: usize) -> Vec<Batch> {
        let mut drained = Vec::new();
        let mut tx_total = 0usize;
        let mut byte_total = 0usize;

        while let Some(head) = self.order.front() {
            let next_tx = tx_total + head.transaction_count();
            let next_bytes = byte_total + head.payload_bytes();
            if next_tx > max_count || next_bytes > max_bytes {
                break;
            }

            tx_total = next_tx;
            byte_total = next_bytes;

            if let Some(batch) = self.order.pop_front() {
                self.hashes.remove(&batch.hash());
                drained.push(batch);
            }
        }

        drained
    }
}
