//! Integration tests and the in-memory validator cluster they run on.

pub mod failover;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ql_ordering::transport::payloads::{self, ProposalRequest, ProposalResponse};
use ql_ordering::{
    OnDemandOrderingService, OrderingConfig, PeerId, PeerList, PeerListProvider, Proposal,
    ProposalNetwork, ProposalServer, RoundId, TransportError,
};

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// One simulated validator: its ordering core plus the serving side.
pub struct ValidatorNode {
    pub peer_id: PeerId,
    pub service: Arc<OnDemandOrderingService>,
    pub server: ProposalServer,
}

impl ValidatorNode {
    pub fn new(peer_id: PeerId, config: OrderingConfig) -> Self {
        let service = Arc::new(OnDemandOrderingService::with_config(config).unwrap());
        let server = ProposalServer::new(Arc::clone(&service));
        Self {
            peer_id,
            service,
            server,
        }
    }
}

/// In-memory cluster wiring client requests to validator servers through
/// the real bincode payload path, with per-peer fault injection.
pub struct InMemoryCluster {
    nodes: HashMap<PeerId, ValidatorNode>,
    down: Mutex<HashSet<PeerId>>,
}

impl InMemoryCluster {
    /// Cluster of `count` validators sharing one configuration.
    pub fn new(count: u8, config: OrderingConfig) -> Self {
        let nodes = (0..count)
            .map(|i| {
                let peer_id = PeerId::new([i; 32]);
                (peer_id, ValidatorNode::new(peer_id, config.clone()))
            })
            .collect();
        Self {
            nodes,
            down: Mutex::new(HashSet::new()),
        }
    }

    pub fn peer(&self, index: u8) -> PeerId {
        PeerId::new([index; 32])
    }

    pub fn node(&self, index: u8) -> &ValidatorNode {
        &self.nodes[&self.peer(index)]
    }

    /// Versioned membership snapshot listing every validator in id order.
    pub fn peer_list(&self, version: u64) -> PeerList {
        let mut peers: Vec<PeerId> = self.nodes.keys().copied().collect();
        peers.sort();
        PeerList::new(version, peers)
    }

    /// Take a peer off the network.
    pub fn take_down(&self, index: u8) {
        self.down.lock().insert(self.peer(index));
    }

    /// Bring a downed peer back.
    pub fn bring_up(&self, index: u8) {
        self.down.lock().remove(&self.peer(index));
    }
}

#[async_trait]
impl ProposalNetwork for InMemoryCluster {
    async fn request_proposal(
        &self,
        peer: PeerId,
        round: RoundId,
    ) -> Result<Proposal, TransportError> {
        if self.down.lock().contains(&peer) {
            return Err(TransportError::Unreachable(format!("{peer:?} is down")));
        }

        let node = self
            .nodes
            .get(&peer)
            .ok_or_else(|| TransportError::Unreachable(format!("{peer:?} not in cluster")))?;

        // Full wire path: encode the request, let the server decode and
        // answer, decode the response.
        let request = ProposalRequest::new(round);
        let request_bytes = payloads::encode(&request)?;
        let response_bytes = node.server.handle_encoded(&request_bytes).await?;
        let response: ProposalResponse = payloads::decode(&response_bytes)?;

        if response.correlation_id != request.correlation_id {
            return Err(TransportError::Codec(
                "response correlation id does not match request".into(),
            ));
        }

        Ok(response.into_proposal())
    }
}

/// Peer-list provider serving a fixed snapshot.
pub struct StaticPeerProvider(pub PeerList);

impl PeerListProvider for StaticPeerProvider {
    fn current_peers(&self) -> PeerList {
        self.0.clone()
    }
}
