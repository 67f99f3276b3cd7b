//! # Failover Integration Tests
//!
//! Peer failure absorption: unreachable primaries fall back down the
//! rotation order, exhausted rounds degrade to empty proposals, and
//! batch submission never stalls behind a failing fetch.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use crate::integration::{init_tracing, InMemoryCluster, StaticPeerProvider};
    use ql_ordering::{
        Batch, OnDemandOrderingService, OrderingConfig, OrderingGate, OrderingGateHandle,
        ProposalDelivery, RoundId, RoundOutcomeEvent, Transaction,
    };

    fn test_config() -> OrderingConfig {
        OrderingConfig {
            proposal_request_timeout_ms: 200,
            number_of_ordering_peers: 3,
            ..Default::default()
        }
    }

    fn make_batch(seed: u8) -> Batch {
        Batch::new(vec![Transaction::new(vec![seed, 0xC4])]).unwrap()
    }

    fn start_gate(
        cluster: Arc<InMemoryCluster>,
        initial_round: RoundId,
    ) -> (OrderingGateHandle, mpsc::Receiver<ProposalDelivery>) {
        let service = Arc::new(OnDemandOrderingService::with_config(test_config()).unwrap());
        let provider = Arc::new(StaticPeerProvider(cluster.peer_list(1)));
        let (gate, handle, deliveries) =
            OrderingGate::new(service, cluster, provider, initial_round);
        tokio::spawn(gate.run());
        (handle, deliveries)
    }

    async fn next_delivery(deliveries: &mut mpsc::Receiver<ProposalDelivery>) -> ProposalDelivery {
        timeout(Duration::from_secs(5), deliveries.recv())
            .await
            .expect("delivery within deadline")
            .expect("gate still running")
    }

    /// Round (2,0) assigns [P2, P3, P0]; with P2 down the proposal comes
    /// from P3, and P3's queue is what gets packed.
    #[tokio::test]
    async fn test_unreachable_primary_falls_back_in_rotation_order() {
        init_tracing();
        let cluster = Arc::new(InMemoryCluster::new(4, test_config()));
        cluster.take_down(2);

        let batch = make_batch(1);
        cluster.node(3).service.push_batch(batch.clone()).unwrap();

        let (handle, mut deliveries) = start_gate(Arc::clone(&cluster), RoundId::new(1, 0));
        handle.on_outcome(RoundOutcomeEvent::commit(1)).await.unwrap();

        let delivery = next_delivery(&mut deliveries).await;
        assert_eq!(delivery.served_by, Some(cluster.peer(3)));
        assert_eq!(delivery.proposal.batches(), &[batch]);
    }

    /// Every assigned peer down: the round degrades to an empty fallback
    /// delivery. The next height, with peers back, recovers normally.
    #[tokio::test]
    async fn test_exhausted_round_degrades_then_recovers() {
        init_tracing();
        let cluster = Arc::new(InMemoryCluster::new(4, test_config()));
        // Round (2,0) assignment is [P2, P3, P0].
        cluster.take_down(2);
        cluster.take_down(3);
        cluster.take_down(0);

        let (handle, mut deliveries) = start_gate(Arc::clone(&cluster), RoundId::new(1, 0));
        handle.on_outcome(RoundOutcomeEvent::commit(1)).await.unwrap();

        let degraded = next_delivery(&mut deliveries).await;
        assert!(degraded.is_fallback());
        assert!(degraded.proposal.is_empty());
        assert_eq!(degraded.round, RoundId::new(2, 0));

        cluster.bring_up(3);
        handle.on_outcome(RoundOutcomeEvent::commit(2)).await.unwrap();

        // Round (3,0) assigns [P3, P0, P1]; P3 answers again.
        let recovered = next_delivery(&mut deliveries).await;
        assert_eq!(recovered.served_by, Some(cluster.peer(3)));
        assert!(!recovered.is_fallback());
    }

    /// Consecutive rejects at one height walk distinct assignments, so a
    /// peer that stonewalled one attempt is not asked first on the next.
    #[tokio::test]
    async fn test_reject_retries_walk_the_rotation() {
        init_tracing();
        let cluster = Arc::new(InMemoryCluster::new(4, test_config()));
        let (handle, mut deliveries) = start_gate(Arc::clone(&cluster), RoundId::new(1, 0));

        handle.on_outcome(RoundOutcomeEvent::reject(1)).await.unwrap();
        let first_retry = next_delivery(&mut deliveries).await;
        handle.on_outcome(RoundOutcomeEvent::reject(1)).await.unwrap();
        let second_retry = next_delivery(&mut deliveries).await;

        assert_eq!(first_retry.round, RoundId::new(1, 1));
        assert_eq!(second_retry.round, RoundId::new(1, 2));
        assert_eq!(first_retry.served_by, Some(cluster.peer(2)));
        assert_eq!(second_retry.served_by, Some(cluster.peer(3)));
    }

    /// Submission keeps working while every fetch is failing: ingestion
    /// is independent of round progression.
    #[tokio::test]
    async fn test_submission_unaffected_by_network_outage() {
        init_tracing();
        let cluster = Arc::new(InMemoryCluster::new(4, test_config()));
        for index in 0..4 {
            cluster.take_down(index);
        }

        let (handle, mut deliveries) = start_gate(Arc::clone(&cluster), RoundId::new(1, 0));
        handle.on_outcome(RoundOutcomeEvent::commit(1)).await.unwrap();

        // While the round is degrading, batches still land immediately.
        let results = handle.on_batches(vec![make_batch(1), make_batch(2)]);
        assert!(results.iter().all(Result::is_ok));

        let degraded = next_delivery(&mut deliveries).await;
        assert!(degraded.is_fallback());
    }
}
