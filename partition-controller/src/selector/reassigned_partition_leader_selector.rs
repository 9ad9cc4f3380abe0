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

use std::sync::Arc;

use partition_controller_error::SelectionError;
use partition_controller_error::SelectionResult;
use tracing::info;

use crate::context::controller_context::ControllerContext;
use crate::model::leader_and_isr::LeaderAndIsr;
use crate::model::leader_selection::LeaderSelection;
use crate::model::topic_partition::TopicPartition;
use crate::model::BrokerId;
use crate::selector::partition_leader_selector::PartitionLeaderSelector;

/// Moves leadership onto the target replicas of an in-flight reassignment.
///
/// The new leader is the first live target replica. The ISR is carried over
/// unchanged and every target replica is notified, including the ones that are
/// not reachable yet, so they start catching up as soon as they are.
pub struct ReassignedPartitionLeaderSelector {
    context: Arc<dyn ControllerContext>,
}

impl ReassignedPartitionLeaderSelector {
    pub fn new(context: Arc<dyn ControllerContext>) -> Self {
        Self { context }
    }
}

impl PartitionLeaderSelector for ReassignedPartitionLeaderSelector {
    fn select_leader(
        &self,
        topic_partition: &TopicPartition,
        current_leader_and_isr: &LeaderAndIsr,
    ) -> SelectionResult<LeaderSelection> {
        let Some(reassignment) = self.context.partition_being_reassigned(topic_partition) else {
            return Err(SelectionError::ReassignmentNotInProgress {
                topic: topic_partition.topic().to_string(),
                partition: topic_partition.partition(),
            });
        };
        let target_replicas = reassignment.new_replicas();
        if target_replicas.is_empty() {
            return Err(SelectionError::EmptyReassignmentTarget {
                topic: topic_partition.topic().to_string(),
                partition: topic_partition.partition(),
            });
        }

        let live_broker_ids = self.context.live_broker_ids();
        let Some(new_leader) = target_replicas
            .iter()
            .copied()
            .find(|replica| live_broker_ids.contains(replica))
        else {
            return Err(SelectionError::NoLiveReassignmentTarget {
                topic: topic_partition.topic().to_string(),
                partition: topic_partition.partition(),
                target_replicas: target_replicas.to_vec(),
            });
        };

        let new_leader_and_isr = current_leader_and_isr.next(new_leader, current_leader_and_isr.isr().to_vec());
        info!(
            "Selected new leader and ISR {} for reassigned partition {}",
            new_leader_and_isr, topic_partition
        );
        let replicas_to_notify: Vec<BrokerId> = target_replicas.to_vec();
        Ok(LeaderSelection::new(new_leader_and_isr, replicas_to_notify))
    }
}
