//! Domain layer: entities, value objects, queue, cache, and errors.

pub mod cache;
pub mod entities;
pub mod errors;
pub mod queue;
pub mod value_objects;

pub use cache::ProposalCache;
pub use entities::{Batch, Proposal};
pub use errors::{OrderingError, TransportError};
pub use queue::TransactionQueue;
pub use value_objects::{Hash, PeerId, PeerList, RoundId, RoundOutcome, Transaction};
