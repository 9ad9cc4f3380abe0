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

use std::collections::HashMap;
use std::collections::HashSet;

use crate::context::controller_context::ControllerContext;
use crate::context::controller_context::ReassignedPartitionContext;
use crate::model::topic_partition::TopicPartition;
use crate::model::BrokerId;

/// Immutable copy of the controller context.
///
/// Built either directly with the `with_*` methods or frozen from an
/// [`InMemoryControllerContext`](crate::context::in_memory_controller_context::InMemoryControllerContext).
#[derive(Clone, Debug, Default)]
pub struct ControllerContextSnapshot {
    partition_replica_assignment: HashMap<TopicPartition, Vec<BrokerId>>,
    live_broker_ids: HashSet<BrokerId>,
    shutting_down_broker_ids: HashSet<BrokerId>,
    partitions_being_reassigned: HashMap<TopicPartition, ReassignedPartitionContext>,
    partition_leaders: HashMap<TopicPartition, BrokerId>,
}

impl ControllerContextSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replica_assignment(mut self, topic_partition: TopicPartition, replicas: Vec<BrokerId>) -> Self {
        self.partition_replica_assignment.insert(topic_partition, replicas);
        self
    }

    pub fn with_live_brokers(mut self, broker_ids: impl IntoIterator<Item = BrokerId>) -> Self {
        self.live_broker_ids = broker_ids.into_iter().collect();
        self
    }

    pub fn with_shutting_down_brokers(mut self, broker_ids: impl IntoIterator<Item = BrokerId>) -> Self {
        self.shutting_down_broker_ids = broker_ids.into_iter().collect();
        self
    }

    pub fn with_reassignment(mut self, topic_partition: TopicPartition, new_replicas: Vec<BrokerId>) -> Self {
        self.partitions_being_reassigned
            .insert(topic_partition, ReassignedPartitionContext::new(new_replicas));
        self
    }

    pub fn with_partition_leader(mut self, topic_partition: TopicPartition, leader: BrokerId) -> Self {
        self.partition_leaders.insert(topic_partition, leader);
        self
    }

    pub(crate) fn from_parts(
        partition_replica_assignment: HashMap<TopicPartition, Vec<BrokerId>>,
        live_broker_ids: HashSet<BrokerId>,
        shutting_down_broker_ids: HashSet<BrokerId>,
        partitions_being_reassigned: HashMap<TopicPartition, ReassignedPartitionContext>,
        partition_leaders: HashMap<TopicPartition, BrokerId>,
    ) -> Self {
        Self {
            partition_replica_assignment,
            live_broker_ids,
            shutting_down_broker_ids,
            partitions_being_reassigned,
            partition_leaders,
        }
    }
}

impl ControllerContext for ControllerContextSnapshot {
    fn partition_replica_assignment(&self, topic_partition: &TopicPartition) -> Option<Vec<BrokerId>> {
        self.partition_replica_assignment.get(topic_partition).cloned()
    }

    fn live_broker_ids(&self) -> HashSet<BrokerId> {
        self.live_broker_ids.clone()
    }

    fn shutting_down_broker_ids(&self) -> HashSet<BrokerId> {
        self.shutting_down_broker_ids.clone()
    }

    fn partition_being_reassigned(&self, topic_partition: &TopicPartition) -> Option<ReassignedPartitionContext> {
        self.partitions_being_reassigned.get(topic_partition).cloned()
    }

    fn partition_leader(&self, topic_partition: &TopicPartition) -> Option<BrokerId> {
        self.partition_leaders.get(topic_partition).copied()
    }
}
