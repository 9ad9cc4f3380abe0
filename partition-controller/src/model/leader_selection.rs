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

use crate::model::leader_and_isr::LeaderAndIsr;
use crate::model::BrokerId;

/// Outcome of a successful leader selection.
///
/// Holds the candidate state the controller must commit and the brokers that
/// must receive it once the commit succeeds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderSelection {
    leader_and_isr: LeaderAndIsr,
    replicas_to_notify: Vec<BrokerId>,
}

impl LeaderSelection {
    pub fn new(leader_and_isr: LeaderAndIsr, replicas_to_notify: Vec<BrokerId>) -> Self {
        Self {
            leader_and_isr,
            replicas_to_notify,
        }
    }

    pub fn leader_and_isr(&self) -> &LeaderAndIsr {
        &self.leader_and_isr
    }

    pub fn replicas_to_notify(&self) -> &[BrokerId] {
        &self.replicas_to_notify
    }

    pub fn into_parts(self) -> (LeaderAndIsr, Vec<BrokerId>) {
        (self.leader_and_isr, self.replicas_to_notify)
    }
}
