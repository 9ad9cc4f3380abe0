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

//! OpenTelemetry backed [`ElectionRecorder`].

use opentelemetry::metrics::Counter;
use opentelemetry::metrics::Meter;
use opentelemetry::KeyValue;

use crate::metrics::election_metrics_constant::ElectionOutcome;
use crate::metrics::election_metrics_constant::COUNTER_LEADER_ELECTION_TOTAL;
use crate::metrics::election_metrics_constant::LABEL_ELECTION_RESULT;
use crate::metrics::election_metrics_constant::LABEL_TOPIC;
use crate::metrics::election_metrics_constant::OPEN_TELEMETRY_METER_NAME;
use crate::metrics::election_recorder::ElectionRecorder;
use crate::model::topic_partition::TopicPartition;

/// Counts elections on an OpenTelemetry counter labelled by outcome and topic.
///
/// Export is configured by whoever installs the meter provider; without one
/// the global meter is a no-op.
pub struct OtelElectionRecorder {
    election_total: Counter<u64>,
}

impl OtelElectionRecorder {
    pub fn new(meter: &Meter) -> Self {
        let election_total = meter
            .u64_counter(COUNTER_LEADER_ELECTION_TOTAL)
            .with_description("Total number of partition leader elections by result")
            .build();
        Self { election_total }
    }

    /// Recorder on the globally installed meter provider.
    pub fn from_global() -> Self {
        Self::new(&opentelemetry::global::meter(OPEN_TELEMETRY_METER_NAME))
    }
}

impl ElectionRecorder for OtelElectionRecorder {
    fn record_election(&self, topic_partition: &TopicPartition, outcome: ElectionOutcome) {
        let attrs = [
            KeyValue::new(LABEL_ELECTION_RESULT, outcome.get_lower_case_name()),
            KeyValue::new(LABEL_TOPIC, topic_partition.topic().to_string()),
        ];
        self.election_total.add(1, &attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_provider() {
        let recorder = OtelElectionRecorder::from_global();
        let tp = TopicPartition::new("orders", 0);

        recorder.record_election(&tp, ElectionOutcome::Unclean);
        recorder.record_election(&tp, ElectionOutcome::Offline);
    }
}
