//! Value objects for the on-demand ordering subsystem.

use primitive_types::H256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Type alias for content hashes.
pub type Hash = H256;

/// Opaque signed transaction payload.
///
/// Content validation and signature checks happen upstream; by the time a
/// transaction reaches the ordering layer its payload is treated as a black
/// box identified solely by its SHA-256 content hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Content hash, computed once at construction.
    hash: Hash,
    /// Raw signed payload bytes.
    payload: Vec<u8>,
}

impl Transaction {
    /// Wrap a signed payload, binding its identity to the content hash.
    pub fn new(payload: Vec<u8>) -> Self {
        let hash = H256::from_slice(&Sha256::digest(&payload));
        Self { hash, payload }
    }

    /// Content hash identifying this transaction.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload size in bytes, used for proposal byte accounting.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

/// 32-byte validator identity within the peer list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub [u8; 32]);

impl PeerId {
    /// Create a PeerId from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Underlying identity bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short prefix is enough to tell peers apart in logs.
        write!(
            f,
            "PeerId({:02x}{:02x}{:02x}{:02x}..)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Versioned ordered sequence of peer identities.
///
/// The version changes only when the authoritative membership changes; a
/// snapshot taken at round start is what rotation and fetching operate on,
/// so a mid-round membership change never splits the assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerList {
    version: u64,
    peers: Vec<PeerId>,
}

impl PeerList {
    /// Create a peer list snapshot.
    pub fn new(version: u64, peers: Vec<PeerId>) -> Self {
        Self { version, peers }
    }

    /// Membership version this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Ordered peer identities.
    pub fn peers(&self) -> &[PeerId] {
        &self.peers
    }

    /// Number of peers in the list.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// True when the list carries no peers.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Round identifier: ledger height plus the reject attempt at that height.
///
/// Ordered lexicographically, so deriving `Ord` over the field order gives
/// exactly `(h1, r1) < (h2, r2) iff h1 < h2 or (h1 == h2 and r1 < r2)`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoundId {
    /// Monotonically increasing, tied to ledger height.
    pub block_round: u64,
    /// Reset to 0 whenever `block_round` advances; bumped on rejection.
    pub reject_round: u32,
}

impl RoundId {
    /// Create a round identifier.
    pub fn new(block_round: u64, reject_round: u32) -> Self {
        Self {
            block_round,
            reject_round,
        }
    }

    /// Round that follows a committed proposal at this height.
    pub fn next_commit(&self) -> Self {
        Self {
            block_round: self.block_round + 1,
            reject_round: 0,
        }
    }

    /// Round that follows a rejected proposal at this height.
    pub fn next_reject(&self) -> Self {
        Self {
            block_round: self.block_round,
            reject_round: self.reject_round + 1,
        }
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.block_round, self.reject_round)
    }
}

/// Verdict consensus reached on one round's proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The proposal was committed at this height.
    Commit,
    /// The proposal was rejected; the height is retried.
    Reject,
}
