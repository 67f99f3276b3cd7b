//! Client side of the proposal protocol: rotation-ordered fallback fetch.

use crate::algorithms::rotation::ordering_peers;
use crate::config::OrderingConfig;
use crate::domain::entities::Proposal;
use crate::domain::errors::TransportError;
use crate::domain::value_objects::{PeerId, PeerList, RoundId};
use crate::ports::outbound::ProposalNetwork;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of one round's fetch. `served_by` is `None` exactly when every
/// assigned peer was exhausted and the empty fallback was substituted.
#[derive(Clone, Debug)]
pub struct FetchedProposal {
    /// The proposal to hand to consensus; possibly empty.
    pub proposal: Proposal,
    /// Peer that answered, if any did.
    pub served_by: Option<PeerId>,
}

impl FetchedProposal {
    /// True when no assigned peer produced a response in time.
    pub fn timed_out(&self) -> bool {
        self.served_by.is_none()
    }
}

/// Fetches the proposal for a round from the peers responsible for it.
///
/// Attempts are bounded by the assignment size; each runs under its own
/// timeout; the first successful response wins. A round with no reachable
/// peer degrades to an empty proposal, never an error.
pub struct ProposalClient<N> {
    network: Arc<N>,
    request_timeout: Duration,
    ordering_peer_count: usize,
}

impl<N: ProposalNetwork> ProposalClient<N> {
    /// Create a client over the given network stack.
    pub fn new(network: Arc<N>, config: &OrderingConfig) -> Self {
        Self {
            network,
            request_timeout: config.proposal_request_timeout(),
            ordering_peer_count: config.number_of_ordering_peers,
        }
    }

    /// Fetch the proposal for `round` using the assignment derived from
    /// the `peers` snapshot.
    pub async fn fetch_proposal(&self, round: RoundId, peers: &PeerList) -> FetchedProposal {
        let assignment = ordering_peers(round, peers, self.ordering_peer_count);
        debug!(
            %round,
            peer_list_version = peers.version(),
            assigned = assignment.len(),
            "fetching proposal"
        );

        for peer in assignment {
            match tokio::time::timeout(
                self.request_timeout,
                self.network.request_proposal(peer, round),
            )
            .await
            {
                Ok(Ok(proposal)) => {
                    if proposal.round() != round {
                        warn!(
                            peer = ?peer,
                            error = %TransportError::RoundMismatch {
                                want: round,
                                got: proposal.round(),
                            },
                            "discarding mismatched response; trying next peer"
                        );
                        continue;
                    }

                    debug!(peer = ?peer, %round, "proposal fetched");
                    return FetchedProposal {
                        proposal,
                        served_by: Some(peer),
                    };
                }
                Ok(Err(err)) => {
                    warn!(peer = ?peer, %round, error = %err, "proposal request failed; trying next peer");
                }
                Err(_) => {
                    let err = TransportError::Timeout {
                        timeout_ms: self.request_timeout.as_millis() as u64,
                    };
                    warn!(peer = ?peer, %round, error = %err, "proposal request timed out; trying next peer");
                }
            }
        }

        warn!(%round, "all ordering peers exhausted; substituting empty proposal");
        FetchedProposal {
            proposal: Proposal::empty(round),
            served_by: None,
        }
    }
}
