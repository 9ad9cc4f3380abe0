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

//! Leader selection error types
//!
//! Every failed selection is reported with one of a closed set of variants.
//! Each variant maps onto a [`SelectionErrorKind`], which is what the controller
//! branches on to decide between giving up, fixing its own control flow, or
//! retrying once the live broker set changes.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a failed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionErrorKind {
    /// No broker can become leader. Needs a broker to come back or an operator.
    FatalUnavailable,

    /// The requested election does not apply to the current partition state.
    RejectedInvalidState,

    /// The election is valid but no candidate is eligible right now.
    RejectedTransient,
}

impl SelectionErrorKind {
    /// Get lowercase name
    pub const fn get_lower_case_name(&self) -> &'static str {
        match self {
            Self::FatalUnavailable => "fatal_unavailable",
            Self::RejectedInvalidState => "rejected_invalid_state",
            Self::RejectedTransient => "rejected_transient",
        }
    }
}

impl fmt::Display for SelectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_lower_case_name())
    }
}

/// Leader selection errors
///
/// All variants carry the topic and partition so the controller can report the
/// failure without threading extra context through its call sites.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The partition has no replica assignment in the controller context
    #[error("Partition [{topic},{partition}] has no replica assignment")]
    NoAssignment { topic: String, partition: i32 },

    /// None of the assigned replicas is alive
    #[error(
        "No replica for partition [{topic},{partition}] is alive. Live brokers are: [{}], assigned replicas are: [{}]",
        join_ids(.live_brokers),
        join_ids(.assigned_replicas)
    )]
    NoReplicaOnline {
        topic: String,
        partition: i32,
        assigned_replicas: Vec<i32>,
        live_brokers: Vec<i32>,
    },

    /// No ISR member is alive and electing outside the ISR is not allowed
    #[error(
        "No broker in ISR [{}] for partition [{topic},{partition}] is alive and unclean leader election is disabled",
        join_ids(.isr)
    )]
    UncleanElectionDisabled {
        topic: String,
        partition: i32,
        isr: Vec<i32>,
    },

    /// Reassignment election requested while no reassignment is in flight
    #[error("Partition [{topic},{partition}] is not being reassigned")]
    ReassignmentNotInProgress { topic: String, partition: i32 },

    /// The in-flight reassignment targets no replicas at all
    #[error("List of reassigned replicas for partition [{topic},{partition}] is empty")]
    EmptyReassignmentTarget { topic: String, partition: i32 },

    /// The current leader already is the preferred replica
    #[error("Preferred replica {preferred_replica} is already the current leader for partition [{topic},{partition}]")]
    LeaderElectionNotNeeded {
        topic: String,
        partition: i32,
        preferred_replica: i32,
    },

    /// None of the reassignment targets is alive
    #[error(
        "None of the reassigned replicas [{}] for partition [{topic},{partition}] is alive",
        join_ids(.target_replicas)
    )]
    NoLiveReassignmentTarget {
        topic: String,
        partition: i32,
        target_replicas: Vec<i32>,
    },

    /// The preferred replica is dead or not caught up
    #[error(
        "Preferred replica {preferred_replica} for partition [{topic},{partition}] is either not alive ({}) or not in the ISR ({})",
        liveness(.alive),
        sync_status(.in_isr)
    )]
    PreferredReplicaIneligible {
        topic: String,
        partition: i32,
        preferred_replica: i32,
        alive: bool,
        in_isr: bool,
    },

    /// Every in-sync replica is on a broker that is shutting down
    #[error(
        "No other replicas in ISR [{}] for partition [{topic},{partition}] besides shutting down brokers [{}]",
        join_ids(.isr),
        join_ids(.shutting_down_brokers)
    )]
    NoInSyncReplicaOutsideShutdown {
        topic: String,
        partition: i32,
        isr: Vec<i32>,
        shutting_down_brokers: Vec<i32>,
    },
}

impl SelectionError {
    pub fn kind(&self) -> SelectionErrorKind {
        match self {
            Self::NoAssignment { .. } | Self::NoReplicaOnline { .. } | Self::UncleanElectionDisabled { .. } => {
                SelectionErrorKind::FatalUnavailable
            }
            Self::ReassignmentNotInProgress { .. }
            | Self::EmptyReassignmentTarget { .. }
            | Self::LeaderElectionNotNeeded { .. } => SelectionErrorKind::RejectedInvalidState,
            Self::NoLiveReassignmentTarget { .. }
            | Self::PreferredReplicaIneligible { .. }
            | Self::NoInSyncReplicaOutsideShutdown { .. } => SelectionErrorKind::RejectedTransient,
        }
    }

    /// Whether the same selection may succeed later without operator action,
    /// once the live broker set changes.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind() == SelectionErrorKind::RejectedTransient
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.kind() == SelectionErrorKind::FatalUnavailable
    }

    /// The partition is already led by its preferred replica; nothing to do.
    #[inline]
    pub fn is_election_not_needed(&self) -> bool {
        matches!(self, Self::LeaderElectionNotNeeded { .. })
    }

    pub fn topic(&self) -> &str {
        match self {
            Self::NoAssignment { topic, .. }
            | Self::NoReplicaOnline { topic, .. }
            | Self::UncleanElectionDisabled { topic, .. }
            | Self::ReassignmentNotInProgress { topic, .. }
            | Self::EmptyReassignmentTarget { topic, .. }
            | Self::LeaderElectionNotNeeded { topic, .. }
            | Self::NoLiveReassignmentTarget { topic, .. }
            | Self::PreferredReplicaIneligible { topic, .. }
            | Self::NoInSyncReplicaOutsideShutdown { topic, .. } => topic,
        }
    }

    pub fn partition(&self) -> i32 {
        match self {
            Self::NoAssignment { partition, .. }
            | Self::NoReplicaOnline { partition, .. }
            | Self::UncleanElectionDisabled { partition, .. }
            | Self::ReassignmentNotInProgress { partition, .. }
            | Self::EmptyReassignmentTarget { partition, .. }
            | Self::LeaderElectionNotNeeded { partition, .. }
            | Self::NoLiveReassignmentTarget { partition, .. }
            | Self::PreferredReplicaIneligible { partition, .. }
            | Self::NoInSyncReplicaOutsideShutdown { partition, .. } => *partition,
        }
    }
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

fn liveness(alive: &bool) -> &'static str {
    if *alive {
        "alive"
    } else {
        "dead"
    }
}

fn sync_status(in_isr: &bool) -> &'static str {
    if *in_isr {
        "in sync"
    } else {
        "not in sync"
    }
}

/// Result type alias for leader selection
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
