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

pub mod controlled_shutdown_leader_selector;
pub mod leader_selectors;
pub mod offline_partition_leader_selector;
pub mod partition_leader_selector;
pub mod preferred_replica_partition_leader_selector;
pub mod reassigned_partition_leader_selector;
