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

use cheetah_string::CheetahString;
use serde::Deserialize;
use serde::Serialize;

/// Identity of a single partition of a topic.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TopicPartition {
    topic: CheetahString,
    partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<CheetahString>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }

    #[inline]
    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    #[inline]
    pub fn partition(&self) -> i32 {
        self.partition
    }
}

impl fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.topic, self.partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_partition_new() {
        let tp = TopicPartition::new("orders", 3);
        assert_eq!(tp.topic(), "orders");
        assert_eq!(tp.partition(), 3);

        let tp = TopicPartition::new(String::from("payments"), 0);
        assert_eq!(tp.topic(), "payments");
    }

    #[test]
    fn topic_partition_display() {
        assert_eq!(TopicPartition::new("orders", 3).to_string(), "[orders,3]");
    }

    #[test]
    fn topic_partition_equality() {
        assert_eq!(TopicPartition::new("orders", 1), TopicPartition::new("orders", 1));
        assert_ne!(TopicPartition::new("orders", 1), TopicPartition::new("orders", 2));
        assert_ne!(TopicPartition::new("orders", 1), TopicPartition::new("payments", 1));
    }
}
