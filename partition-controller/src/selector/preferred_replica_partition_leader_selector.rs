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
use crate::selector::partition_leader_selector::assigned_replicas;
use crate::selector::partition_leader_selector::PartitionLeaderSelector;

/// Moves leadership back to the preferred replica, the first assigned one.
///
/// The preferred replica must be live and in the ISR; the ISR is kept as is and
/// all assigned replicas are notified. When the preferred replica already leads
/// the partition the request is rejected with
/// [`SelectionError::LeaderElectionNotNeeded`], which callers treat as
/// "nothing to do" rather than as a failure.
pub struct PreferredReplicaPartitionLeaderSelector {
    context: Arc<dyn ControllerContext>,
}

impl PreferredReplicaPartitionLeaderSelector {
    pub fn new(context: Arc<dyn ControllerContext>) -> Self {
        Self { context }
    }
}

impl PartitionLeaderSelector for PreferredReplicaPartitionLeaderSelector {
    fn select_leader(
        &self,
        topic_partition: &TopicPartition,
        current_leader_and_isr: &LeaderAndIsr,
    ) -> SelectionResult<LeaderSelection> {
        let assigned_replicas = assigned_replicas(self.context.as_ref(), topic_partition)?;
        let Some(preferred_replica) = assigned_replicas.first().copied() else {
            return Err(SelectionError::NoAssignment {
                topic: topic_partition.topic().to_string(),
                partition: topic_partition.partition(),
            });
        };

        let current_leader = self
            .context
            .partition_leader(topic_partition)
            .unwrap_or(current_leader_and_isr.leader());
        if current_leader == preferred_replica {
            return Err(SelectionError::LeaderElectionNotNeeded {
                topic: topic_partition.topic().to_string(),
                partition: topic_partition.partition(),
                preferred_replica,
            });
        }

        let alive = self.context.live_broker_ids().contains(&preferred_replica);
        let in_isr = current_leader_and_isr.is_in_isr(preferred_replica);
        if !(alive && in_isr) {
            return Err(SelectionError::PreferredReplicaIneligible {
                topic: topic_partition.topic().to_string(),
                partition: topic_partition.partition(),
                preferred_replica,
                alive,
                in_isr,
            });
        }

        info!(
            "Current leader {} for partition {} is not the preferred replica. Triggering preferred replica leader \
             election",
            current_leader, topic_partition
        );
        let new_leader_and_isr =
            current_leader_and_isr.next(preferred_replica, current_leader_and_isr.isr().to_vec());
        Ok(LeaderSelection::new(new_leader_and_isr, assigned_replicas))
    }
}

#[cfg(test)]
mod tests {
    use partition_controller_error::SelectionErrorKind;

    use super::*;
    use crate::context::controller_context_snapshot::ControllerContextSnapshot;
    use crate::model::BrokerId;

    fn tp() -> TopicPartition {
        TopicPartition::new("orders", 2)
    }

    fn selector(leader: BrokerId, live: Vec<BrokerId>) -> PreferredReplicaPartitionLeaderSelector {
        let context = ControllerContextSnapshot::new()
            .with_replica_assignment(tp(), vec![1, 2, 3])
            .with_partition_leader(tp(), leader)
            .with_live_brokers(live);
        PreferredReplicaPartitionLeaderSelector::new(Arc::new(context))
    }

    #[test]
    fn test_move_leadership_to_preferred_replica() {
        let selector = selector(2, vec![1, 2, 3]);
        let current = LeaderAndIsr::with_epoch_and_version(2, 9, vec![2, 3, 1], 20);

        let selection = selector.select_leader(&tp(), &current).unwrap();

        assert_eq!(selection.leader_and_isr().leader(), 1);
        assert_eq!(selection.leader_and_isr().isr(), &[2, 3, 1]);
        assert_eq!(selection.leader_and_isr().leader_epoch(), 10);
        assert_eq!(selection.leader_and_isr().version(), 21);
        assert_eq!(selection.replicas_to_notify(), &[1, 2, 3]);
    }

    #[test]
    fn test_preferred_replica_already_leader() {
        let selector = selector(1, vec![1, 2, 3]);

        let err = selector
            .select_leader(&tp(), &LeaderAndIsr::new(1, vec![1, 2, 3]))
            .unwrap_err();

        assert!(err.is_election_not_needed());
        assert_eq!(err.kind(), SelectionErrorKind::RejectedInvalidState);
    }

    #[test]
    fn test_falls_back_to_current_leader_and_isr() {
        let context = ControllerContextSnapshot::new()
            .with_replica_assignment(tp(), vec![1, 2, 3])
            .with_live_brokers([1, 2, 3]);
        let selector = PreferredReplicaPartitionLeaderSelector::new(Arc::new(context));

        let err = selector
            .select_leader(&tp(), &LeaderAndIsr::new(1, vec![1, 2]))
            .unwrap_err();
        assert!(err.is_election_not_needed());

        let selection = selector.select_leader(&tp(), &LeaderAndIsr::new(3, vec![3, 1])).unwrap();
        assert_eq!(selection.leader_and_isr().leader(), 1);
    }

    #[test]
    fn test_preferred_replica_dead() {
        let selector = selector(2, vec![2, 3]);

        let err = selector
            .select_leader(&tp(), &LeaderAndIsr::new(2, vec![1, 2, 3]))
            .unwrap_err();

        assert_eq!(
            err,
            SelectionError::PreferredReplicaIneligible {
                topic: "orders".to_string(),
                partition: 2,
                preferred_replica: 1,
                alive: false,
                in_isr: true,
            }
        );
        assert!(err.is_retriable());
    }

    #[test]
    fn test_preferred_replica_not_in_isr() {
        let selector = selector(2, vec![1, 2, 3]);

        let err = selector
            .select_leader(&tp(), &LeaderAndIsr::new(2, vec![2, 3]))
            .unwrap_err();

        assert!(matches!(
            err,
            SelectionError::PreferredReplicaIneligible {
                alive: true,
                in_isr: false,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_assignment() {
        let context = ControllerContextSnapshot::new()
            .with_replica_assignment(tp(), vec![])
            .with_live_brokers([1]);
        let selector = PreferredReplicaPartitionLeaderSelector::new(Arc::new(context));

        let err = selector
            .select_leader(&tp(), &LeaderAndIsr::new(1, vec![1]))
            .unwrap_err();

        assert!(matches!(err, SelectionError::NoAssignment { .. }));
    }
}
