//! Bounded per-round proposal cache.
//!
//! Holds the most recent `window` produced proposals keyed by round. The
//! `BTreeMap` keeps rounds in their natural order, so eviction is simply
//! dropping the smallest key once the window is exceeded.

use super::entities::Proposal;
use super::value_objects::RoundId;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cache window over the most recently produced proposals.
#[derive(Debug)]
pub struct ProposalCache {
    window: usize,
    entries: BTreeMap<RoundId, Arc<Proposal>>,
}

impl ProposalCache {
    /// Create a cache retaining at most `window` rounds.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            entries: BTreeMap::new(),
        }
    }

    /// Cached proposal for `round`, if still within the window.
    pub fn get(&self, round: RoundId) -> Option<Arc<Proposal>> {
        self.entries.get(&round).cloned()
    }

    /// Insert a produced proposal, evicting the oldest round beyond the
    /// window. Returns the shared handle for the inserted proposal.
    pub fn insert(&mut self, proposal: Proposal) -> Arc<Proposal> {
        let round = proposal.round();
        let shared = Arc::new(proposal);
        self.entries.insert(round, Arc::clone(&shared));

        while self.entries.len() > self.window {
            self.entries.pop_first();
        }

        shared
    }

    /// Number of cached rounds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
