//! Deterministic per-round peer rotation.
//!
//! Every validator must compute the same assignment for a round from the
//! same peer-list snapshot, so this is a pure function of its inputs: no
//! clocks, no randomness, no local state.

use crate::domain::value_objects::{PeerId, PeerList, RoundId};

/// Ordered assignment of peers responsible for a round.
///
/// Rotates through `peer_list` starting at
/// `(block_round + reject_round) mod len`, returning `count` peers in
/// fallback order: index 0 is tried first, the rest are fallbacks. `count`
/// is clamped to the list length; an empty list yields an empty assignment.
pub fn ordering_peers(round: RoundId, peer_list: &PeerList, count: usize) -> Vec<PeerId> {
    let peers = peer_list.peers();
    if peers.is_empty() {
        return Vec::new();
    }

    let len = peers.len();
    let offset = ((round.block_round + u64::from(round.reject_round)) % len as u64) as usize;

    (0..count.min(len))
        .map(|i| peers[(offset + i) % len])
        .collect()
}
