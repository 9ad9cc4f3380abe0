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

use std::fmt;
use std::sync::Arc;

use partition_controller_error::SelectionErrorKind;
use partition_controller_error::SelectionResult;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::LeaderSelectorConfig;
use crate::context::controller_context::ControllerContext;
use crate::metrics::election_recorder::ElectionRecorder;
use crate::model::leader_and_isr::LeaderAndIsr;
use crate::model::leader_selection::LeaderSelection;
use crate::model::topic_partition::TopicPartition;
use crate::selector::controlled_shutdown_leader_selector::ControlledShutdownLeaderSelector;
use crate::selector::offline_partition_leader_selector::OfflinePartitionLeaderSelector;
use crate::selector::partition_leader_selector::PartitionLeaderSelector;
use crate::selector::preferred_replica_partition_leader_selector::PreferredReplicaPartitionLeaderSelector;
use crate::selector::reassigned_partition_leader_selector::ReassignedPartitionLeaderSelector;

/// Scenario that made the controller elect a new leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectionTrigger {
    OfflinePartition,
    PartitionReassignment,
    PreferredReplica,
    ControlledShutdown,
}

impl ElectionTrigger {
    /// Get lowercase name
    pub const fn get_lower_case_name(&self) -> &'static str {
        match self {
            Self::OfflinePartition => "offline_partition",
            Self::PartitionReassignment => "partition_reassignment",
            Self::PreferredReplica => "preferred_replica",
            Self::ControlledShutdown => "controlled_shutdown",
        }
    }
}

impl fmt::Display for ElectionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_lower_case_name())
    }
}

/// One selector per [`ElectionTrigger`], all sharing the same context,
/// configuration and recorder.
pub struct LeaderSelectors {
    offline: OfflinePartitionLeaderSelector,
    reassigned: ReassignedPartitionLeaderSelector,
    preferred_replica: PreferredReplicaPartitionLeaderSelector,
    controlled_shutdown: ControlledShutdownLeaderSelector,
}

impl LeaderSelectors {
    pub fn new(
        config: Arc<LeaderSelectorConfig>,
        context: Arc<dyn ControllerContext>,
        recorder: Arc<dyn ElectionRecorder>,
    ) -> Self {
        Self {
            offline: OfflinePartitionLeaderSelector::new(Arc::clone(&context), config, recorder),
            reassigned: ReassignedPartitionLeaderSelector::new(Arc::clone(&context)),
            preferred_replica: PreferredReplicaPartitionLeaderSelector::new(Arc::clone(&context)),
            controlled_shutdown: ControlledShutdownLeaderSelector::new(context),
        }
    }

    pub fn selector(&self, trigger: ElectionTrigger) -> &dyn PartitionLeaderSelector {
        match trigger {
            ElectionTrigger::OfflinePartition => &self.offline,
            ElectionTrigger::PartitionReassignment => &self.reassigned,
            ElectionTrigger::PreferredReplica => &self.preferred_replica,
            ElectionTrigger::ControlledShutdown => &self.controlled_shutdown,
        }
    }

    /// Run the selector matching `trigger` and log its outcome.
    pub fn elect(
        &self,
        trigger: ElectionTrigger,
        topic_partition: &TopicPartition,
        current_leader_and_isr: &LeaderAndIsr,
    ) -> SelectionResult<LeaderSelection> {
        let result = self
            .selector(trigger)
            .select_leader(topic_partition, current_leader_and_isr);
        match &result {
            Ok(selection) => info!(
                "Elected leader {} for partition {} on {}, replicas to notify {:?}",
                selection.leader_and_isr().leader(),
                topic_partition,
                trigger,
                selection.replicas_to_notify()
            ),
            Err(e) if e.is_election_not_needed() => info!("{}", e),
            Err(e) => match e.kind() {
                SelectionErrorKind::FatalUnavailable => {
                    error!("Failed to elect leader for partition {} on {}: {}", topic_partition, trigger, e)
                }
                SelectionErrorKind::RejectedInvalidState | SelectionErrorKind::RejectedTransient => {
                    warn!("Failed to elect leader for partition {} on {}: {}", topic_partition, trigger, e)
                }
            },
        }
        result
    }
}
