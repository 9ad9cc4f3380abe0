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

use partition_controller_error::SelectionError;
use partition_controller_error::SelectionResult;

use crate::context::controller_context::ControllerContext;
use crate::model::leader_and_isr::LeaderAndIsr;
use crate::model::leader_selection::LeaderSelection;
use crate::model::topic_partition::TopicPartition;
use crate::model::BrokerId;

/// Strategy computing the next leader and ISR of a partition.
///
/// Implementations read the controller context they were built with and never
/// mutate it. For the same context state and the same `current_leader_and_isr`
/// they return the same result, so a selection whose commit was rejected on a
/// stale version can simply be recomputed from fresh state.
///
/// A successful result always advances `leader_epoch` and `version` by exactly
/// one, elects a live broker, and keeps the ISR within the assigned replicas.
pub trait PartitionLeaderSelector: Send + Sync {
    /// Select a new leader for a partition.
    ///
    /// # Arguments
    /// * `topic_partition` - partition whose leader is being elected
    /// * `current_leader_and_isr` - last committed leader state of the partition
    ///
    /// # Returns
    /// The candidate leader state and the brokers that must receive it
    fn select_leader(
        &self,
        topic_partition: &TopicPartition,
        current_leader_and_isr: &LeaderAndIsr,
    ) -> SelectionResult<LeaderSelection>;
}

/// Assigned replicas of the partition, or the fatal error when there are none.
pub(crate) fn assigned_replicas(
    context: &dyn ControllerContext,
    topic_partition: &TopicPartition,
) -> SelectionResult<Vec<BrokerId>> {
    match context.partition_replica_assignment(topic_partition) {
        Some(replicas) => Ok(replicas),
        None => Err(SelectionError::NoAssignment {
            topic: topic_partition.topic().to_string(),
            partition: topic_partition.partition(),
        }),
    }
}

pub(crate) fn sorted_ids<'a>(ids: impl IntoIterator<Item = &'a BrokerId>) -> Vec<BrokerId> {
    let mut ids: Vec<BrokerId> = ids.into_iter().copied().collect();
    ids.sort_unstable();
    ids
}
