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

use serde::Deserialize;
use serde::Serialize;

use crate::model::BrokerId;

/// Leader, leader epoch, ISR and store version of one partition.
///
/// Values are immutable: a successful election produces a new value through
/// [`LeaderAndIsr::next`], which advances `leader_epoch` and `version` by
/// exactly one. The `version` is the optimistic-concurrency token the
/// committing layer hands back to the metadata store; a write carrying a stale
/// version is rejected there and retried with fresh state.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderAndIsr {
    leader: BrokerId,
    leader_epoch: i32,
    isr: Vec<BrokerId>,
    version: i32,
}

impl LeaderAndIsr {
    pub const INITIAL_LEADER_EPOCH: i32 = 0;
    pub const INITIAL_VERSION: i32 = 0;

    /// State of a partition that has just been created.
    pub fn new(leader: BrokerId, isr: Vec<BrokerId>) -> Self {
        Self::with_epoch_and_version(leader, Self::INITIAL_LEADER_EPOCH, isr, Self::INITIAL_VERSION)
    }

    /// State read back from the metadata store.
    pub fn with_epoch_and_version(leader: BrokerId, leader_epoch: i32, isr: Vec<BrokerId>, version: i32) -> Self {
        Self {
            leader,
            leader_epoch,
            isr,
            version,
        }
    }

    /// Candidate successor with the given leader and ISR.
    pub fn next(&self, leader: BrokerId, isr: Vec<BrokerId>) -> Self {
        Self {
            leader,
            leader_epoch: self.leader_epoch + 1,
            isr,
            version: self.version + 1,
        }
    }

    #[inline]
    pub fn leader(&self) -> BrokerId {
        self.leader
    }

    #[inline]
    pub fn leader_epoch(&self) -> i32 {
        self.leader_epoch
    }

    #[inline]
    pub fn isr(&self) -> &[BrokerId] {
        &self.isr
    }

    #[inline]
    pub fn version(&self) -> i32 {
        self.version
    }

    #[inline]
    pub fn is_in_isr(&self, broker_id: BrokerId) -> bool {
        self.isr.contains(&broker_id)
    }
}

impl fmt::Display for LeaderAndIsr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Leader:{},ISR:{},LeaderEpoch:{},Version:{})",
            self.leader,
            self.isr.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(","),
            self.leader_epoch,
            self.version
        )
    }
}
