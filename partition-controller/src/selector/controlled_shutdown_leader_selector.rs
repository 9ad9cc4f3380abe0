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
use tracing::debug;
use tracing::info;

use crate::context::controller_context::ControllerContext;
use crate::model::leader_and_isr::LeaderAndIsr;
use crate::model::leader_selection::LeaderSelection;
use crate::model::topic_partition::TopicPartition;
use crate::model::BrokerId;
use crate::selector::partition_leader_selector::assigned_replicas;
use crate::selector::partition_leader_selector::sorted_ids;
use crate::selector::partition_leader_selector::PartitionLeaderSelector;

/// Moves leadership off brokers that are in controlled shutdown.
///
/// Shutting-down brokers are removed from the ISR and the new leader is the
/// first assigned replica left in it. Brokers still reachable, shutting down or
/// not, are notified.
pub struct ControlledShutdownLeaderSelector {
    context: Arc<dyn ControllerContext>,
}

impl ControlledShutdownLeaderSelector {
    pub fn new(context: Arc<dyn ControllerContext>) -> Self {
        Self { context }
    }
}

impl PartitionLeaderSelector for ControlledShutdownLeaderSelector {
    fn select_leader(
        &self,
        topic_partition: &TopicPartition,
        current_leader_and_isr: &LeaderAndIsr,
    ) -> SelectionResult<LeaderSelection> {
        let assigned_replicas = assigned_replicas(self.context.as_ref(), topic_partition)?;
        let live_broker_ids = self.context.live_broker_ids();
        let shutting_down_broker_ids = self.context.shutting_down_broker_ids();

        let live_assigned_replicas: Vec<BrokerId> = assigned_replicas
            .iter()
            .copied()
            .filter(|replica| live_broker_ids.contains(replica) || shutting_down_broker_ids.contains(replica))
            .collect();
        let new_isr: Vec<BrokerId> = current_leader_and_isr
            .isr()
            .iter()
            .copied()
            .filter(|replica| !shutting_down_broker_ids.contains(replica) && assigned_replicas.contains(replica))
            .collect();
        debug!(
            "ISR {:?} without shutting down brokers {:?} for partition {}",
            new_isr, shutting_down_broker_ids, topic_partition
        );

        let Some(new_leader) = live_assigned_replicas
            .iter()
            .copied()
            .find(|replica| new_isr.contains(replica) && live_broker_ids.contains(replica))
        else {
            return Err(SelectionError::NoInSyncReplicaOutsideShutdown {
                topic: topic_partition.topic().to_string(),
                partition: topic_partition.partition(),
                isr: current_leader_and_isr.isr().to_vec(),
                shutting_down_brokers: sorted_ids(&shutting_down_broker_ids),
            });
        };

        let new_leader_and_isr = current_leader_and_isr.next(new_leader, new_isr);
        info!(
            "Selected new leader and ISR {} for partition {} during controlled shutdown",
            new_leader_and_isr, topic_partition
        );
        Ok(LeaderSelection::new(new_leader_and_isr, live_assigned_replicas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::controller_context_snapshot::ControllerContextSnapshot;

    fn tp() -> TopicPartition {
        TopicPartition::new("orders", 3)
    }

    fn selector(live: Vec<BrokerId>, shutting_down: Vec<BrokerId>) -> ControlledShutdownLeaderSelector {
        let context = ControllerContextSnapshot::new()
            .with_replica_assignment(tp(), vec![1, 2, 3])
            .with_live_brokers(live)
            .with_shutting_down_brokers(shutting_down);
        ControlledShutdownLeaderSelector::new(Arc::new(context))
    }

    #[test]
    fn test_leadership_moves_off_shutting_down_broker() {
        let selector = selector(vec![2, 3], vec![1]);
        let current = LeaderAndIsr::with_epoch_and_version(1, 2, vec![1, 2, 3], 3);

        let selection = selector.select_leader(&tp(), &current).unwrap();

        assert_eq!(selection.leader_and_isr().leader(), 2);
        assert_eq!(selection.leader_and_isr().isr(), &[2, 3]);
        assert_eq!(selection.leader_and_isr().leader_epoch(), 3);
        assert_eq!(selection.leader_and_isr().version(), 4);
        // the shutting down broker still gets the new state
        assert_eq!(selection.replicas_to_notify(), &[1, 2, 3]);
    }

    #[test]
    fn test_leader_follows_assignment_order() {
        let selector = selector(vec![2, 3], vec![1]);
        let current = LeaderAndIsr::new(1, vec![1, 3, 2]);

        let selection = selector.select_leader(&tp(), &current).unwrap();

        assert_eq!(selection.leader_and_isr().leader(), 2);
        assert_eq!(selection.leader_and_isr().isr(), &[3, 2]);
    }

    #[test]
    fn test_only_shutting_down_brokers_in_isr() {
        let selector = selector(vec![3], vec![1, 2]);

        let err = selector
            .select_leader(&tp(), &LeaderAndIsr::new(1, vec![1, 2]))
            .unwrap_err();

        assert_eq!(
            err,
            SelectionError::NoInSyncReplicaOutsideShutdown {
                topic: "orders".to_string(),
                partition: 3,
                isr: vec![1, 2],
                shutting_down_brokers: vec![1, 2],
            }
        );
        assert!(err.is_retriable());
    }

    #[test]
    fn test_dead_isr_member_is_not_elected() {
        let selector = selector(vec![3], vec![1]);

        let selection = selector
            .select_leader(&tp(), &LeaderAndIsr::new(1, vec![1, 2, 3]))
            .unwrap();

        assert_eq!(selection.leader_and_isr().leader(), 3);
        assert_eq!(selection.replicas_to_notify(), &[1, 3]);
    }
}
