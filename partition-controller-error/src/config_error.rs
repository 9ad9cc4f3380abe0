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

//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating leader selector configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialized
    #[error("Configuration load error: {0}")]
    Load(#[from] config::ConfigError),

    /// A configuration value is present but not acceptable
    #[error("Configuration invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "unclean_leader_election_topic_overrides".to_string(),
            reason: "topic name must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration invalid value for 'unclean_leader_election_topic_overrides': topic name must not be empty"
        );

        let err = ConfigError::from(config::ConfigError::NotFound("unclean_leader_election_enable".to_string()));
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.to_string().starts_with("Configuration load error"));
    }
}
