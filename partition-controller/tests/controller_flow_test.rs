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

//! Controller-style flows driving the selectors from a shared in-memory context.

use std::sync::Arc;
use std::sync::Once;

use partition_controller::ControllerContext;
use partition_controller::CountingElectionRecorder;
use partition_controller::ElectionTrigger;
use partition_controller::InMemoryControllerContext;
use partition_controller::LeaderAndIsr;
use partition_controller::LeaderSelectorConfig;
use partition_controller::LeaderSelectors;
use partition_controller::OfflinePartitionLeaderSelector;
use partition_controller::PartitionLeaderSelector;
use partition_controller::TopicPartition;

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn cluster() -> Arc<InMemoryControllerContext> {
    let context = Arc::new(InMemoryControllerContext::new());
    context.on_broker_startup([1, 2, 3, 4]);
    for partition in 0..4 {
        let tp = TopicPartition::new("orders", partition);
        let replicas: Vec<i32> = (0..3).map(|i| (partition + i) % 4 + 1).collect();
        context.update_partition_replica_assignment(tp.clone(), replicas.clone());
        context.update_partition_leader(tp, replicas[0]);
    }
    context
}

#[test]
fn test_broker_failure_then_recovery() {
    init_logging();
    let context = cluster();
    let recorder = Arc::new(CountingElectionRecorder::new());
    let selectors = LeaderSelectors::new(
        Arc::new(LeaderSelectorConfig::default()),
        context.clone(),
        recorder.clone(),
    );
    let tp = TopicPartition::new("orders", 0);
    let committed = LeaderAndIsr::new(1, vec![1, 2, 3]);

    context.on_broker_failure([1]);
    let selection = selectors
        .elect(ElectionTrigger::OfflinePartition, &tp, &committed)
        .unwrap();
    let (committed, notify) = selection.into_parts();
    assert_eq!(committed.leader(), 2);
    assert_eq!(committed.isr(), &[2, 3]);
    assert_eq!(notify, vec![2, 3]);
    context.update_partition_leader(tp.clone(), committed.leader());

    // broker 1 comes back and catches up; rebalance to the preferred replica
    context.on_broker_startup([1]);
    let caught_up = LeaderAndIsr::with_epoch_and_version(
        committed.leader(),
        committed.leader_epoch(),
        vec![2, 3, 1],
        committed.version() + 1,
    );
    let selection = selectors
        .elect(ElectionTrigger::PreferredReplica, &tp, &caught_up)
        .unwrap();
    assert_eq!(selection.leader_and_isr().leader(), 1);
    assert_eq!(selection.leader_and_isr().leader_epoch(), 2);
    assert_eq!(selection.leader_and_isr().version(), 3);
    assert_eq!(recorder.clean_elections(), 1);
}

#[test]
fn test_controlled_shutdown_of_every_leader_broker() {
    init_logging();
    let context = cluster();
    let selectors = LeaderSelectors::new(
        Arc::new(LeaderSelectorConfig::default()),
        context.clone(),
        Arc::new(CountingElectionRecorder::new()),
    );

    assert!(context.begin_controlled_shutdown(2));
    let tp = TopicPartition::new("orders", 1);
    let replicas = context.partition_replica_assignment(&tp).unwrap();
    assert_eq!(replicas, vec![2, 3, 4]);

    let selection = selectors
        .elect(ElectionTrigger::ControlledShutdown, &tp, &LeaderAndIsr::new(2, replicas))
        .unwrap();

    assert_eq!(selection.leader_and_isr().leader(), 3);
    assert_eq!(selection.leader_and_isr().isr(), &[3, 4]);
    assert_eq!(selection.replicas_to_notify(), &[2, 3, 4]);
}

#[test]
fn test_reassignment_waits_for_target() {
    init_logging();
    let context = cluster();
    let selectors = LeaderSelectors::new(
        Arc::new(LeaderSelectorConfig::default()),
        context.clone(),
        Arc::new(CountingElectionRecorder::new()),
    );
    let tp = TopicPartition::new("orders", 2);
    let current = LeaderAndIsr::new(3, vec![3, 4, 1]);

    context.start_reassignment(tp.clone(), vec![5, 6]);
    let err = selectors
        .elect(ElectionTrigger::PartitionReassignment, &tp, &current)
        .unwrap_err();
    assert!(err.is_retriable());

    context.on_broker_startup([6]);
    let selection = selectors
        .elect(ElectionTrigger::PartitionReassignment, &tp, &current)
        .unwrap();
    assert_eq!(selection.leader_and_isr().leader(), 6);
    assert_eq!(selection.leader_and_isr().isr(), &[3, 4, 1]);
    assert_eq!(selection.replicas_to_notify(), &[5, 6]);

    context.complete_reassignment(&tp);
    let err = selectors
        .elect(ElectionTrigger::PartitionReassignment, &tp, &current)
        .unwrap_err();
    assert!(!err.is_retriable());
}

#[test]
fn test_snapshot_isolates_selection_from_later_updates() {
    init_logging();
    let context = cluster();
    let snapshot = Arc::new(context.snapshot());
    let selector = OfflinePartitionLeaderSelector::new(
        snapshot,
        Arc::new(LeaderSelectorConfig::default()),
        Arc::new(CountingElectionRecorder::new()),
    );
    let tp = TopicPartition::new("orders", 3);
    let current = LeaderAndIsr::new(4, vec![4, 1, 2]);

    let before = selector.select_leader(&tp, &current).unwrap();
    context.on_broker_failure([4, 1, 2]);
    let after = selector.select_leader(&tp, &current).unwrap();

    assert_eq!(before, after);
    assert_eq!(after.leader_and_isr().leader(), 4);
}
