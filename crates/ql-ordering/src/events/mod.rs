//! Event types crossing the gate's two channels: round outcomes in,
//! proposal deliveries out.

pub mod consumed;
pub mod published;

pub use consumed::RoundOutcomeEvent;
pub use published::ProposalDelivery;
