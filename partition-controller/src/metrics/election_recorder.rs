// Copyright 2023 The RocketMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Observability side channel for leader elections.
//!
//! Selectors never talk to a metrics backend directly; they are handed an
//! [`ElectionRecorder`] and report each failure-driven election outcome to it.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::metrics::election_metrics_constant::ElectionOutcome;
use crate::model::topic_partition::TopicPartition;

#[cfg_attr(test, mockall::automock)]
pub trait ElectionRecorder: Send + Sync {
    /// Record the outcome of an election for a partition.
    fn record_election(&self, topic_partition: &TopicPartition, outcome: ElectionOutcome);
}

/// Recorder that drops every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopElectionRecorder;

impl ElectionRecorder for NopElectionRecorder {
    #[inline]
    fn record_election(&self, _topic_partition: &TopicPartition, _outcome: ElectionOutcome) {}
}

/// In-process recorder keeping one counter per outcome.
#[derive(Debug, Default)]
pub struct CountingElectionRecorder {
    clean: AtomicU64,
    unclean: AtomicU64,
    offline: AtomicU64,
}

impl CountingElectionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, outcome: ElectionOutcome) -> u64 {
        self.counter(outcome).load(Ordering::Relaxed)
    }

    pub fn clean_elections(&self) -> u64 {
        self.count(ElectionOutcome::Clean)
    }

    pub fn unclean_elections(&self) -> u64 {
        self.count(ElectionOutcome::Unclean)
    }

    pub fn offline_partitions(&self) -> u64 {
        self.count(ElectionOutcome::Offline)
    }

    fn counter(&self, outcome: ElectionOutcome) -> &AtomicU64 {
        match outcome {
            ElectionOutcome::Clean => &self.clean,
            ElectionOutcome::Unclean => &self.unclean,
            ElectionOutcome::Offline => &self.offline,
        }
    }
}

impl ElectionRecorder for CountingElectionRecorder {
    fn record_election(&self, _topic_partition: &TopicPartition, outcome: ElectionOutcome) {
        self.counter(outcome).fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_recorder() {
        let recorder = CountingElectionRecorder::new();
        let tp = TopicPartition::new("orders", 0);

        recorder.record_election(&tp, ElectionOutcome::Clean);
        recorder.record_election(&tp, ElectionOutcome::Clean);
        recorder.record_election(&tp, ElectionOutcome::Unclean);

        assert_eq!(recorder.clean_elections(), 2);
        assert_eq!(recorder.unclean_elections(), 1);
        assert_eq!(recorder.offline_partitions(), 0);
    }

    #[test]
    fn test_nop_recorder() {
        NopElectionRecorder.record_election(&TopicPartition::new("orders", 0), ElectionOutcome::Offline);
    }
}
