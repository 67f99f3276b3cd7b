//! Core entities: batches of transactions and per-round proposals.

use super::errors::OrderingError;
use super::value_objects::{Hash, RoundId, Transaction};
use primitive_types::H256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Ordered group of transactions that commits atomically.
///
/// Identity is the SHA-256 over the member transaction hashes, so two batches
/// carrying the same transactions in the same order are the same batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    hash: Hash,
    transactions: Vec<Transaction>,
}

impl Batch {
    /// Build a batch from an ordered, non-empty transaction sequence.
    ///
    /// # Errors
    /// - `EmptyBatch` if `transactions` is empty
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, OrderingError> {
        if transactions.is_empty() {
            return Err(OrderingError::EmptyBatch);
        }

        let mut hasher = Sha256::new();
        for tx in &transactions {
            hasher.update(tx.hash().as_bytes());
        }
        let hash = H256::from_slice(&hasher.finalize());

        Ok(Self { hash, transactions })
    }

    /// Batch identity.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Member transactions in commit order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of member transactions.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Summed payload size of the member transactions.
    pub fn payload_bytes(&self) -> usize {
        self.transactions.iter().map(Transaction::payload_len).sum()
    }
}

/// The batches nominated for one round, immutable once produced.
///
/// An empty proposal is a valid result meaning "no transactions this round";
/// consensus votes on it like any other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    round: RoundId,
    batches: Vec<Batch>,
}

impl Proposal {
    /// Bind an ordered batch sequence to a round.
    pub fn new(round: RoundId, batches: Vec<Batch>) -> Self {
        Self { round, batches }
    }

    /// The empty proposal for a round.
    pub fn empty(round: RoundId) -> Self {
        Self {
            round,
            batches: Vec::new(),
        }
    }

    /// Round this proposal is bound to.
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Batches in packing order.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// True when the proposal carries no batches.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total transactions across all batches.
    pub fn transaction_count(&self) -> usize {
        self.batches.iter().map(Batch::transaction_count).sum()
    }

    /// Total payload bytes across all batches.
    pub fn payload_bytes(&self) -> usize {
        self.batches.iter().map(Batch::payload_bytes).sum()
    }
}
