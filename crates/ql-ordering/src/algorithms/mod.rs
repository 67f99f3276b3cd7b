//! Pure algorithms: no side effects, no shared state.

pub mod rotation;

pub use rotation::ordering_peers;
