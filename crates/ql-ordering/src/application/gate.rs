//! Ordering gate: the integration point between batch submission, the
//! ordering core, the transport client, and consensus.
//!
//! Consensus talks to the gate over two one-directional channels: round
//! outcomes flow in, proposal deliveries flow out. Batch ingestion bypasses
//! the state machine entirely and goes straight to the queue.

use crate::application::service::OnDemandOrderingService;
use crate::config::OrderingConfig;
use crate::domain::entities::Batch;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{RoundId, RoundOutcome};
use crate::events::consumed::RoundOutcomeEvent;
use crate::events::published::ProposalDelivery;
use crate::ports::outbound::{PeerListProvider, ProposalNetwork};
use crate::transport::client::{FetchedProposal, ProposalClient};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Events buffered on either gate channel before senders feel backpressure.
const GATE_CHANNEL_CAPACITY: usize = 64;

/// Where the gate is within one round's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateState {
    /// Waiting for consensus to finish the current round.
    Idle(RoundId),
    /// Fetch in flight for this round.
    AwaitingProposal(RoundId),
    /// Proposal handed to consensus; immediately returns to idle.
    Delivered(RoundId),
}

/// Submission-side handle: feeds batches in and outcome events forward.
///
/// Cheap to clone; every producer on the transaction-submission path holds
/// one. `on_batches` never blocks on round progression.
#[derive(Clone)]
pub struct OrderingGateHandle {
    service: Arc<OnDemandOrderingService>,
    outcomes: mpsc::Sender<RoundOutcomeEvent>,
}

impl OrderingGateHandle {
    /// Push validated batches into the pending queue, one result per batch.
    ///
    /// Failures are per batch: a duplicate or a full queue rejects that
    /// batch alone and the rest still land.
    pub fn on_batches(&self, batches: Vec<Batch>) -> Vec<Result<(), OrderingError>> {
        batches
            .into_iter()
            .map(|batch| self.service.push_batch(batch))
            .collect()
    }

    /// Forward a consensus round outcome to the gate.
    ///
    /// # Errors
    /// - the gate's run loop has stopped and the event channel is closed
    pub async fn on_outcome(
        &self,
        event: RoundOutcomeEvent,
    ) -> Result<(), mpsc::error::SendError<RoundOutcomeEvent>> {
        self.outcomes.send(event).await
    }
}

/// The gate's run loop: advances rounds on outcome events, drives the
/// transport client, and publishes each fetched proposal to consensus.
pub struct OrderingGate<N, P> {
    service: Arc<OnDemandOrderingService>,
    client: ProposalClient<N>,
    peer_provider: Arc<P>,
    outcomes: mpsc::Receiver<RoundOutcomeEvent>,
    deliveries: mpsc::Sender<ProposalDelivery>,
    current_round: RoundId,
    liveness_alert_after: u32,
}

impl<N, P> OrderingGate<N, P>
where
    N: ProposalNetwork,
    P: PeerListProvider,
{
    /// Wire up a gate starting at `initial_round`.
    ///
    /// Returns the gate itself (to be driven via [`OrderingGate::run`]),
    /// the submission-side handle, and the receiving end of the delivery
    /// channel for the consensus consumer.
    pub fn new(
        service: Arc<OnDemandOrderingService>,
        network: Arc<N>,
        peer_provider: Arc<P>,
        initial_round: RoundId,
    ) -> (
        Self,
        OrderingGateHandle,
        mpsc::Receiver<ProposalDelivery>,
    ) {
        let config: &OrderingConfig = service.config();
        let client = ProposalClient::new(network, config);
        let liveness_alert_after = config.liveness_alert_after_rounds;

        let (outcome_tx, outcome_rx) = mpsc::channel(GATE_CHANNEL_CAPACITY);
        let (delivery_tx, delivery_rx) = mpsc::channel(GATE_CHANNEL_CAPACITY);

        let handle = OrderingGateHandle {
            service: Arc::clone(&service),
            outcomes: outcome_tx,
        };

        let gate = Self {
            service,
            client,
            peer_provider,
            outcomes: outcome_rx,
            deliveries: delivery_tx,
            current_round: initial_round,
            liveness_alert_after,
        };

        (gate, handle, delivery_rx)
    }

    /// Consume outcome events until every handle is dropped or the
    /// consensus consumer goes away.
    ///
    /// Outcomes are processed one at a time in arrival order. An outcome
    /// arriving while a fetch is in flight supersedes that round: the
    /// stale fetch future is dropped, its result never delivered.
    pub async fn run(self) {
        let Self {
            service,
            client,
            peer_provider,
            mut outcomes,
            deliveries,
            mut current_round,
            liveness_alert_after,
        } = self;

        let mut state = GateState::Idle(current_round);
        let mut missed_rounds = 0u32;
        info!(state = ?state, "ordering gate started");

        while let Some(received) = outcomes.recv().await {
            let mut event = received;
            loop {
                current_round = advance_round(&service, current_round, event);
                // Snapshot bound at round start; rotation and every fetch
                // attempt for this round use it unchanged.
                let peers = peer_provider.current_peers();
                state = GateState::AwaitingProposal(current_round);
                debug!(state = ?state, "awaiting proposal");

                let fetch = client.fetch_proposal(current_round, &peers);
                tokio::pin!(fetch);

                tokio::select! {
                    next = outcomes.recv() => {
                        match next {
                            Some(superseding) => {
                                warn!(
                                    stale = %current_round,
                                    "outcome arrived mid-fetch; superseding round"
                                );
                                event = superseding;
                                continue;
                            }
                            None => {
                                info!("outcome channel closed; ordering gate stopping");
                                return;
                            }
                        }
                    }
                    fetched = &mut fetch => {
                        missed_rounds = track_liveness(
                            &fetched,
                            missed_rounds,
                            liveness_alert_after,
                        );

                        state = GateState::Delivered(current_round);
                        debug!(state = ?state, fallback = fetched.served_by.is_none(), "publishing delivery");
                        let delivery = ProposalDelivery {
                            round: current_round,
                            proposal: fetched.proposal,
                            served_by: fetched.served_by,
                        };
                        if deliveries.send(delivery).await.is_err() {
                            info!("delivery channel closed; ordering gate stopping");
                            return;
                        }

                        state = GateState::Idle(current_round);
                        debug!(state = ?state, "round delivered");
                        break;
                    }
                }
            }
        }

        info!("all gate handles dropped; ordering gate stopping");
    }
}

/// Apply one outcome to the round sequence, running the rejected-batch
/// policy before a reject advances the attempt counter.
fn advance_round(
    service: &OnDemandOrderingService,
    current: RoundId,
    event: RoundOutcomeEvent,
) -> RoundId {
    if event.height != current.block_round {
        warn!(
            event_height = event.height,
            gate_height = current.block_round,
            "outcome height does not match gate round; advancing relative to gate round"
        );
    }

    let next = match event.outcome {
        RoundOutcome::Commit => current.next_commit(),
        RoundOutcome::Reject => {
            service.handle_rejection(current);
            current.next_reject()
        }
    };

    debug!(from = %current, to = %next, outcome = ?event.outcome, "round advanced");
    next
}

/// Count consecutive all-peers-exhausted rounds; reset on any served one.
/// Crossing the threshold is an operational liveness signal, not a crash.
fn track_liveness(fetched: &FetchedProposal, missed: u32, alert_after: u32) -> u32 {
    if !fetched.timed_out() {
        return 0;
    }

    let missed = missed + 1;
    if missed >= alert_after {
        error!(
            consecutive_rounds = missed,
            "no ordering peer reachable for consecutive rounds; liveness degraded"
        );
    }
    missed
}
