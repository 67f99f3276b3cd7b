//! # QL-Ordering: On-Demand Ordering Subsystem
//!
//! Decides, round by round, which pending transaction batches are bundled
//! into the next proposal that consensus votes on.
//!
//! ## Architecture
//!
//! - **Domain**: core entities (Batch, Proposal), the bounded FIFO queue,
//!   and the per-round proposal cache
//! - **Algorithms**: deterministic peer rotation
//! - **Ports**: inbound (OnDemandOrderingApi) and outbound (ProposalNetwork,
//!   PeerListProvider)
//! - **Application**: the packing service and the consensus-facing gate
//! - **Transport**: proposal request/response payloads, server, and the
//!   fallback-fetching client
//!
//! ## Round lifecycle
//!
//! Consensus reports each round's outcome to the gate; the gate advances
//! the round, asks the peers responsible for it (a deterministic rotation
//! over the membership snapshot) for the proposal, and hands the first
//! response back to consensus. A round with no reachable peer degrades to
//! an empty proposal: a liveness dip, never a safety violation.

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod transport;

pub use application::gate::{OrderingGate, OrderingGateHandle};
pub use application::service::OnDemandOrderingService;
pub use config::{OrderingConfig, RejectedBatchPolicy};
pub use domain::entities::{Batch, Proposal};
pub use domain::errors::{OrderingError, TransportError};
pub use domain::value_objects::{Hash, PeerId, PeerList, RoundId, RoundOutcome, Transaction};
pub use events::{ProposalDelivery, RoundOutcomeEvent};
pub use ports::inbound::OnDemandOrderingApi;
pub use ports::outbound::{PeerListProvider, ProposalNetwork};
pub use transport::client::{FetchedProposal, ProposalClient};
pub use transport::payloads::{ProposalRequest, ProposalResponse};
pub use transport::server::ProposalServer;
