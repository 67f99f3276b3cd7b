//! Outbound ports (driven collaborators).

use crate::domain::entities::Proposal;
use crate::domain::errors::TransportError;
use crate::domain::value_objects::{PeerId, PeerList, RoundId};
use async_trait::async_trait;

/// Network access to a remote peer's proposal server.
///
/// One call is one request to one peer; retry, fallback, and timeouts are
/// the client's concern, not the implementation's.
#[async_trait]
pub trait ProposalNetwork: Send + Sync {
    /// Ask `peer` for the proposal of `round`.
    async fn request_proposal(
        &self,
        peer: PeerId,
        round: RoundId,
    ) -> Result<Proposal, TransportError>;
}

/// Source of the authoritative, versioned peer list.
///
/// The gate snapshots this once per round so a mid-round membership change
/// never splits the assignment between validators.
pub trait PeerListProvider: Send + Sync {
    /// Current membership snapshot.
    fn current_peers(&self) -> PeerList;
}
