//! Wire payloads for the proposal request/response protocol.
//!
//! Payloads travel bincode-encoded. Responses echo the request's
//! correlation id so callers can pair them over any transport.

use crate::domain::entities::{Batch, Proposal};
use crate::domain::errors::TransportError;
use crate::domain::value_objects::RoundId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// "Give me the proposal for this round."
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
    /// Pairs the response with this request.
    pub correlation_id: Uuid,
    /// Requested ledger height.
    pub block_round: u64,
    /// Requested reject attempt at that height.
    pub reject_round: u32,
}

impl ProposalRequest {
    /// Build a request for `round` with a fresh correlation id.
    pub fn new(round: RoundId) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            block_round: round.block_round,
            reject_round: round.reject_round,
        }
    }

    /// The requested round.
    pub fn round(&self) -> RoundId {
        RoundId::new(self.block_round, self.reject_round)
    }
}

/// The proposal for one round; an empty batch list is a well-formed,
/// successful response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    /// Correlation id copied from the request.
    pub correlation_id: Uuid,
    /// Round the proposal is bound to.
    pub round: RoundId,
    /// Batches in packing order.
    pub batches: Vec<Batch>,
}

impl ProposalResponse {
    /// Build a response to `correlation_id` carrying `proposal`.
    pub fn new(correlation_id: Uuid, proposal: &Proposal) -> Self {
        Self {
            correlation_id,
            round: proposal.round(),
            batches: proposal.batches().to_vec(),
        }
    }

    /// Reassemble the carried proposal.
    pub fn into_proposal(self) -> Proposal {
        Proposal::new(self.round, self.batches)
    }
}

/// Encode a payload for the wire.
///
/// # Errors
/// - `Codec` when bincode cannot serialize the value
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, TransportError> {
    bincode::serialize(value).map_err(|err| TransportError::Codec(err.to_string()))
}

/// Decode a payload off the wire.
///
/// # Errors
/// - `Codec` when the bytes do not parse as `T`
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, TransportError> {
    bincode::deserialize(bytes).map_err(|err| TransportError::Codec(err.to_string()))
}
