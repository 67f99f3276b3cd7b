//! Server side of the proposal protocol.
//!
//! Delegates to the ordering core and returns the (possibly empty)
//! proposal for the requested round. The network stack hands raw bytes to
//! [`ProposalServer::handle_encoded`]; tests and in-process callers use the
//! typed entry point directly.

use crate::application::service::OnDemandOrderingService;
use crate::domain::errors::TransportError;
use crate::transport::payloads::{decode, encode, ProposalRequest, ProposalResponse};
use std::sync::Arc;
use tracing::debug;

/// Request handler answering `RequestProposal` for this node.
pub struct ProposalServer {
    service: Arc<OnDemandOrderingService>,
}

impl ProposalServer {
    /// Create a server over the shared ordering core.
    pub fn new(service: Arc<OnDemandOrderingService>) -> Self {
        Self { service }
    }

    /// Handle a decoded proposal request.
    pub async fn handle_request_proposal(&self, request: ProposalRequest) -> ProposalResponse {
        let round = request.round();
        let proposal = self.service.request_proposal(round);

        debug!(
            %round,
            batches = proposal.batches().len(),
            "serving proposal request"
        );

        ProposalResponse::new(request.correlation_id, &proposal)
    }

    /// Handle a bincode-encoded request, returning the encoded response.
    ///
    /// # Errors
    /// - `Codec` when the request bytes do not parse or the response does
    ///   not serialize
    pub async fn handle_encoded(&self, bytes: &[u8]) -> Result<Vec<u8>, TransportError> {
        let request: ProposalRequest = decode(bytes)?;
        let response = self.handle_request_proposal(request).await;
        encode(&response)
    }
}
