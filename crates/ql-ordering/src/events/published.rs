//! Published events (outgoing to consensus).

use crate::domain::entities::Proposal;
use crate::domain::value_objects::{PeerId, RoundId};
use serde::{Deserialize, Serialize};

/// The proposal fetched for one round, handed to the consensus consumer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDelivery {
    /// Round the proposal is bound to.
    pub round: RoundId,
    /// The proposal to vote on; possibly empty.
    pub proposal: Proposal,
    /// Peer that served the proposal, `None` when every assigned peer was
    /// exhausted and the empty fallback was substituted.
    pub served_by: Option<PeerId>,
}

impl ProposalDelivery {
    /// True when this delivery is the all-peers-exhausted fallback.
    pub fn is_fallback(&self) -> bool {
        self.served_by.is_none()
    }
}
