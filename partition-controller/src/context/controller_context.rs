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

use std::collections::HashSet;

use crate::model::topic_partition::TopicPartition;
use crate::model::BrokerId;

/// Target of an in-flight partition reassignment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReassignedPartitionContext {
    new_replicas: Vec<BrokerId>,
}

impl ReassignedPartitionContext {
    pub fn new(new_replicas: Vec<BrokerId>) -> Self {
        Self { new_replicas }
    }

    /// Replicas the partition is moving to, in preference order.
    #[inline]
    pub fn new_replicas(&self) -> &[BrokerId] {
        &self.new_replicas
    }
}

/// Read-only view of the cluster state kept by the controller.
///
/// Leader selectors only query it. Every call is a point-in-time read; callers
/// that need one consistent view across several reads should hand selectors a
/// [`ControllerContextSnapshot`](crate::context::controller_context_snapshot::ControllerContextSnapshot).
pub trait ControllerContext: Send + Sync {
    /// Replicas assigned to the partition, most preferred first.
    fn partition_replica_assignment(&self, topic_partition: &TopicPartition) -> Option<Vec<BrokerId>>;

    /// Brokers that are reachable and not shutting down.
    fn live_broker_ids(&self) -> HashSet<BrokerId>;

    /// Brokers that are still reachable but in controlled shutdown.
    fn shutting_down_broker_ids(&self) -> HashSet<BrokerId>;

    /// In-flight reassignment of the partition, if any.
    fn partition_being_reassigned(&self, topic_partition: &TopicPartition) -> Option<ReassignedPartitionContext>;

    /// Last known leader of the partition.
    fn partition_leader(&self, topic_partition: &TopicPartition) -> Option<BrokerId>;

    fn live_or_shutting_down_broker_ids(&self) -> HashSet<BrokerId> {
        let mut brokers = self.live_broker_ids();
        brokers.extend(self.shutting_down_broker_ids());
        brokers
    }
}
