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

pub const OPEN_TELEMETRY_METER_NAME: &str = "partition_controller";

// Counter constants
pub const COUNTER_LEADER_ELECTION_TOTAL: &str = "leader_election_total";

// Label constants
pub const LABEL_ELECTION_RESULT: &str = "election_result";
pub const LABEL_TOPIC: &str = "topic";

/// Signals emitted by failure-driven elections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectionOutcome {
    /// Leader picked from the live ISR; no acknowledged write is lost.
    Clean,
    /// Leader picked outside the ISR; acknowledged writes may be lost.
    Unclean,
    /// No replica could take over; the partition is unavailable.
    Offline,
}

impl ElectionOutcome {
    /// Get lowercase name
    pub const fn get_lower_case_name(&self) -> &'static str {
        match self {
            Self::Clean => "clean_election",
            Self::Unclean => "unclean_election",
            Self::Offline => "partition_offline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_election_outcome() {
        assert_eq!(ElectionOutcome::Clean.get_lower_case_name(), "clean_election");
        assert_eq!(ElectionOutcome::Unclean.get_lower_case_name(), "unclean_election");
        assert_eq!(ElectionOutcome::Offline.get_lower_case_name(), "partition_offline");
    }
}
