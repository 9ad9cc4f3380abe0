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

//! # Partition Controller
//!
//! Leader and ISR selection for the controller of a replicated, partitioned log:
//! - Failure-driven election with clean (ISR) preference and an optional
//!   unclean fallback
//! - Reassignment-driven election onto the target replicas
//! - Preferred replica election for leadership rebalancing
//! - Controlled shutdown election moving leadership off stopping brokers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Controller (external)            │
//! └──────────────┬──────────────────────────┘
//!                │ ElectionTrigger
//!        ┌───────▼────────┐
//!        │ LeaderSelectors│──────► ElectionRecorder
//!        └───────┬────────┘
//!                │ reads
//!        ┌───────▼──────────┐
//!        │ ControllerContext│
//!        └──────────────────┘
//! ```
//!
//! Selectors compute a candidate [`LeaderAndIsr`] and the brokers to notify.
//! Committing the candidate to the metadata store, using its version as the
//! optimistic-concurrency token, is left to the controller.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use partition_controller::ControllerContextSnapshot;
//! use partition_controller::CountingElectionRecorder;
//! use partition_controller::ElectionTrigger;
//! use partition_controller::LeaderAndIsr;
//! use partition_controller::LeaderSelectorConfig;
//! use partition_controller::LeaderSelectors;
//! use partition_controller::TopicPartition;
//!
//! let tp = TopicPartition::new("orders", 0);
//! let context = ControllerContextSnapshot::new()
//!     .with_replica_assignment(tp.clone(), vec![1, 2, 3])
//!     .with_live_brokers([2, 3]);
//! let selectors = LeaderSelectors::new(
//!     Arc::new(LeaderSelectorConfig::default()),
//!     Arc::new(context),
//!     Arc::new(CountingElectionRecorder::new()),
//! );
//!
//! let current = LeaderAndIsr::new(1, vec![1, 2, 3]);
//! let selection = selectors
//!     .elect(ElectionTrigger::OfflinePartition, &tp, &current)
//!     .unwrap();
//! assert_eq!(selection.leader_and_isr().leader(), 2);
//! assert_eq!(selection.leader_and_isr().isr(), &[2, 3]);
//! ```

#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod metrics;
pub mod model;
pub mod selector;

pub use crate::config::LeaderSelectorConfig;
pub use context::controller_context::ControllerContext;
pub use context::controller_context::ReassignedPartitionContext;
pub use context::controller_context_snapshot::ControllerContextSnapshot;
pub use context::in_memory_controller_context::InMemoryControllerContext;
pub use metrics::election_metrics_constant::ElectionOutcome;
pub use metrics::election_recorder::CountingElectionRecorder;
pub use metrics::election_recorder::ElectionRecorder;
pub use metrics::election_recorder::NopElectionRecorder;
pub use metrics::otel_election_recorder::OtelElectionRecorder;
pub use model::leader_and_isr::LeaderAndIsr;
pub use model::leader_selection::LeaderSelection;
pub use model::topic_partition::TopicPartition;
pub use model::BrokerId;
pub use partition_controller_error::SelectionError;
pub use partition_controller_error::SelectionErrorKind;
pub use partition_controller_error::SelectionResult;
pub use selector::controlled_shutdown_leader_selector::ControlledShutdownLeaderSelector;
pub use selector::leader_selectors::ElectionTrigger;
pub use selector::leader_selectors::LeaderSelectors;
pub use selector::offline_partition_leader_selector::OfflinePartitionLeaderSelector;
pub use selector::partition_leader_selector::PartitionLeaderSelector;
pub use selector::preferred_replica_partition_leader_selector::PreferredReplicaPartitionLeaderSelector;
pub use selector::reassigned_partition_leader_selector::ReassignedPartitionLeaderSelector;

/// Partition controller crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
