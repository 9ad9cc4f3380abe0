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

//! Failure-driven leader election.
//!
//! Used when the current leader is believed dead. The election:
//! 1. Prefers the first live ISR member, in ISR order (clean election)
//! 2. Falls back to the first live assigned replica, shrinking the ISR to that
//!    single replica, when unclean election is enabled for the topic
//! 3. Fails when no assigned replica is alive

use std::sync::Arc;

use partition_controller_error::SelectionError;
use partition_controller_error::SelectionResult;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::LeaderSelectorConfig;
use crate::context::controller_context::ControllerContext;
use crate::metrics::election_metrics_constant::ElectionOutcome;
use crate::metrics::election_recorder::ElectionRecorder;
use crate::model::leader_and_isr::LeaderAndIsr;
use crate::model::leader_selection::LeaderSelection;
use crate::model::topic_partition::TopicPartition;
use crate::model::BrokerId;
use crate::selector::partition_leader_selector::assigned_replicas;
use crate::selector::partition_leader_selector::sorted_ids;
use crate::selector::partition_leader_selector::PartitionLeaderSelector;

/// Selects a leader for a partition whose leader went offline.
///
/// Replicas to notify are the live assigned replicas, in assignment order.
pub struct OfflinePartitionLeaderSelector {
    context: Arc<dyn ControllerContext>,
    config: Arc<LeaderSelectorConfig>,
    recorder: Arc<dyn ElectionRecorder>,
}

impl OfflinePartitionLeaderSelector {
    pub fn new(
        context: Arc<dyn ControllerContext>,
        config: Arc<LeaderSelectorConfig>,
        recorder: Arc<dyn ElectionRecorder>,
    ) -> Self {
        Self {
            context,
            config,
            recorder,
        }
    }
}

impl PartitionLeaderSelector for OfflinePartitionLeaderSelector {
    fn select_leader(
        &self,
        topic_partition: &TopicPartition,
        current_leader_and_isr: &LeaderAndIsr,
    ) -> SelectionResult<LeaderSelection> {
        let assigned_replicas = assigned_replicas(self.context.as_ref(), topic_partition)?;
        let live_broker_ids = self.context.live_broker_ids();

        let live_assigned_replicas: Vec<BrokerId> = assigned_replicas
            .iter()
            .copied()
            .filter(|replica| live_broker_ids.contains(replica))
            .collect();
        // ISR members missing from the assignment are stale and never carried over
        let live_brokers_in_isr: Vec<BrokerId> = current_leader_and_isr
            .isr()
            .iter()
            .copied()
            .filter(|replica| live_broker_ids.contains(replica) && assigned_replicas.contains(replica))
            .collect();
        debug!(
            "Live assigned replicas {:?} and live ISR members {:?} for offline partition {}",
            live_assigned_replicas, live_brokers_in_isr, topic_partition
        );

        let new_leader_and_isr = match live_brokers_in_isr.first().copied() {
            Some(new_leader) => {
                self.recorder.record_election(topic_partition, ElectionOutcome::Clean);
                current_leader_and_isr.next(new_leader, live_brokers_in_isr)
            }
            None => {
                let Some(new_leader) = live_assigned_replicas.first().copied() else {
                    self.recorder.record_election(topic_partition, ElectionOutcome::Offline);
                    error!(
                        "No replica for partition {} is alive, assigned replicas {:?}",
                        topic_partition, assigned_replicas
                    );
                    return Err(SelectionError::NoReplicaOnline {
                        topic: topic_partition.topic().to_string(),
                        partition: topic_partition.partition(),
                        assigned_replicas,
                        live_brokers: sorted_ids(&live_broker_ids),
                    });
                };
                if !self.config.is_unclean_leader_election_enabled(topic_partition.topic()) {
                    self.recorder.record_election(topic_partition, ElectionOutcome::Offline);
                    error!(
                        "No broker in ISR {:?} for partition {} is alive and unclean leader election is disabled",
                        current_leader_and_isr.isr(),
                        topic_partition
                    );
                    return Err(SelectionError::UncleanElectionDisabled {
                        topic: topic_partition.topic().to_string(),
                        partition: topic_partition.partition(),
                        isr: current_leader_and_isr.isr().to_vec(),
                    });
                }
                self.recorder.record_election(topic_partition, ElectionOutcome::Unclean);
                warn!(
                    "No broker in ISR {:?} for partition {} is alive. Elect leader {} from live replicas {:?}. There's \
                     potential data loss.",
                    current_leader_and_isr.isr(),
                    topic_partition,
                    new_leader,
                    live_assigned_replicas
                );
                current_leader_and_isr.next(new_leader, vec![new_leader])
            }
        };

        info!(
            "Selected new leader and ISR {} for offline partition {}",
            new_leader_and_isr, topic_partition
        );
        Ok(LeaderSelection::new(new_leader_and_isr, live_assigned_replicas))
    }
}
