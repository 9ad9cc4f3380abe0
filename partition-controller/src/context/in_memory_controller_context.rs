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

//! Concurrent, controller-owned implementation of [`ControllerContext`].

use std::collections::HashSet;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::context::controller_context::ControllerContext;
use crate::context::controller_context::ReassignedPartitionContext;
use crate::context::controller_context_snapshot::ControllerContextSnapshot;
use crate::model::topic_partition::TopicPartition;
use crate::model::BrokerId;

#[derive(Debug, Default)]
struct BrokerSets {
    live: HashSet<BrokerId>,
    shutting_down: HashSet<BrokerId>,
}

/// Cluster state kept by the controller and shared with leader selectors.
///
/// This implementation uses:
/// - `DashMap` for per-partition tables (assignment, reassignment, leader)
/// - A single `RwLock` over the live and shutting-down broker sets, so a broker
///   moving between them is never observed in both or neither
///
/// Selectors only read it. Use [`snapshot`](Self::snapshot) to give a selection
/// one consistent view of every table.
#[derive(Debug, Default)]
pub struct InMemoryControllerContext {
    partition_replica_assignment: DashMap<TopicPartition, Vec<BrokerId>>,
    brokers: RwLock<BrokerSets>,
    partitions_being_reassigned: DashMap<TopicPartition, ReassignedPartitionContext>,
    partition_leaders: DashMap<TopicPartition, BrokerId>,
}

impl InMemoryControllerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_partition_replica_assignment(&self, topic_partition: TopicPartition, replicas: Vec<BrokerId>) {
        debug!("Update replica assignment of partition {} to {:?}", topic_partition, replicas);
        self.partition_replica_assignment.insert(topic_partition, replicas);
    }

    /// Forget everything known about a deleted partition.
    pub fn remove_partition(&self, topic_partition: &TopicPartition) {
        self.partition_replica_assignment.remove(topic_partition);
        self.partitions_being_reassigned.remove(topic_partition);
        self.partition_leaders.remove(topic_partition);
    }

    pub fn on_broker_startup(&self, broker_ids: impl IntoIterator<Item = BrokerId>) {
        let mut brokers = self.brokers.write();
        for broker_id in broker_ids {
            brokers.shutting_down.remove(&broker_id);
            if brokers.live.insert(broker_id) {
                info!("Broker {} is alive", broker_id);
            }
        }
    }

    pub fn on_broker_failure(&self, broker_ids: impl IntoIterator<Item = BrokerId>) {
        let mut brokers = self.brokers.write();
        for broker_id in broker_ids {
            let was_live = brokers.live.remove(&broker_id);
            let was_shutting_down = brokers.shutting_down.remove(&broker_id);
            if was_live || was_shutting_down {
                warn!("Broker {} is no longer reachable", broker_id);
            }
        }
    }

    /// Move a live broker into controlled shutdown.
    ///
    /// Returns `false` when the broker is not live.
    pub fn begin_controlled_shutdown(&self, broker_id: BrokerId) -> bool {
        let mut brokers = self.brokers.write();
        if !brokers.live.remove(&broker_id) {
            warn!("Controlled shutdown requested for broker {} which is not live", broker_id);
            return false;
        }
        brokers.shutting_down.insert(broker_id);
        info!("Broker {} entered controlled shutdown", broker_id);
        true
    }

    pub fn start_reassignment(&self, topic_partition: TopicPartition, new_replicas: Vec<BrokerId>) {
        info!("Start reassigning partition {} to {:?}", topic_partition, new_replicas);
        self.partitions_being_reassigned
            .insert(topic_partition, ReassignedPartitionContext::new(new_replicas));
    }

    pub fn complete_reassignment(&self, topic_partition: &TopicPartition) -> Option<ReassignedPartitionContext> {
        self.partitions_being_reassigned
            .remove(topic_partition)
            .map(|(_, reassignment)| reassignment)
    }

    pub fn update_partition_leader(&self, topic_partition: TopicPartition, leader: BrokerId) {
        self.partition_leaders.insert(topic_partition, leader);
    }

    /// Freeze the current state into an immutable snapshot.
    pub fn snapshot(&self) -> ControllerContextSnapshot {
        let (live_broker_ids, shutting_down_broker_ids) = {
            let brokers = self.brokers.read();
            (brokers.live.clone(), brokers.shutting_down.clone())
        };
        ControllerContextSnapshot::from_parts(
            self.partition_replica_assignment
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
            live_broker_ids,
            shutting_down_broker_ids,
            self.partitions_being_reassigned
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
            self.partition_leaders
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
        )
    }
}

impl ControllerContext for InMemoryControllerContext {
    fn partition_replica_assignment(&self, topic_partition: &TopicPartition) -> Option<Vec<BrokerId>> {
        self.partition_replica_assignment
            .get(topic_partition)
            .map(|replicas| replicas.value().clone())
    }

    fn live_broker_ids(&self) -> HashSet<BrokerId> {
        self.brokers.read().live.clone()
    }

    fn shutting_down_broker_ids(&self) -> HashSet<BrokerId> {
        self.brokers.read().shutting_down.clone()
    }

    fn partition_being_reassigned(&self, topic_partition: &TopicPartition) -> Option<ReassignedPartitionContext> {
        self.partitions_being_reassigned
            .get(topic_partition)
            .map(|reassignment| reassignment.value().clone())
    }

    fn partition_leader(&self, topic_partition: &TopicPartition) -> Option<BrokerId> {
        self.partition_leaders.get(topic_partition).map(|leader| *leader.value())
    }

    fn live_or_shutting_down_broker_ids(&self) -> HashSet<BrokerId> {
        let brokers = self.brokers.read();
        brokers.live.union(&brokers.shutting_down).copied().collect()
    }
}
