//! Ports: inbound (driving) and outbound (driven) interfaces.

pub mod inbound;
pub mod outbound;

pub use inbound::OnDemandOrderingApi;
pub use outbound::{PeerListProvider, ProposalNetwork};
