//! Proposal transport: wire payloads, the serving side, and the
//! rotation-ordered fetching side.

pub mod client;
pub mod payloads;
pub mod server;

pub use client::{FetchedProposal, ProposalClient};
pub use payloads::{ProposalRequest, ProposalResponse};
pub use server::ProposalServer;
