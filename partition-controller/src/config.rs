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

//! Leader selector configuration.

use std::collections::HashMap;
use std::path::Path;

use config::Config;
use config::Environment;
use partition_controller_error::ConfigError;
use partition_controller_error::ConfigResult;
use serde::Deserialize;
use serde::Serialize;

/// Prefix of environment variables overriding file values,
/// e.g. `PARTITION_CONTROLLER_UNCLEAN_LEADER_ELECTION_ENABLE=false`.
pub const ENV_PREFIX: &str = "PARTITION_CONTROLLER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderSelectorConfig {
    /// Whether a replica outside the ISR may be elected when no ISR member is
    /// alive. Such an election keeps the partition available at the cost of
    /// possibly losing acknowledged writes.
    ///
    /// Default: true
    pub unclean_leader_election_enable: bool,

    /// Per-topic values of `unclean_leader_election_enable`
    ///
    /// Default: empty
    pub unclean_leader_election_topic_overrides: HashMap<String, bool>,
}

impl Default for LeaderSelectorConfig {
    fn default() -> Self {
        Self {
            unclean_leader_election_enable: true,
            unclean_leader_election_topic_overrides: HashMap::new(),
        }
    }
}

impl LeaderSelectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unclean_leader_election_enable(mut self, enable: bool) -> Self {
        self.unclean_leader_election_enable = enable;
        self
    }

    pub fn with_unclean_leader_election_topic_override(mut self, topic: impl Into<String>, enable: bool) -> Self {
        self.unclean_leader_election_topic_overrides.insert(topic.into(), enable);
        self
    }

    pub fn is_unclean_leader_election_enabled(&self, topic: &str) -> bool {
        self.unclean_leader_election_topic_overrides
            .get(topic)
            .copied()
            .unwrap_or(self.unclean_leader_election_enable)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self
            .unclean_leader_election_topic_overrides
            .keys()
            .any(|topic| topic.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                key: "unclean_leader_election_topic_overrides".to_string(),
                reason: "topic name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Load from a configuration file, then apply `PARTITION_CONTROLLER_*`
    /// environment overrides. The file format follows its extension.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let cfg = Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let config = cfg.try_deserialize::<Self>()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = LeaderSelectorConfig::default();

        assert!(config.unclean_leader_election_enable);
        assert!(config.unclean_leader_election_topic_overrides.is_empty());
        assert!(config.is_unclean_leader_election_enabled("orders"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_topic_override() {
        let config = LeaderSelectorConfig::new()
            .with_unclean_leader_election_enable(false)
            .with_unclean_leader_election_topic_override("metrics", true);

        assert!(!config.is_unclean_leader_election_enabled("orders"));
        assert!(config.is_unclean_leader_election_enabled("metrics"));
    }

    #[test]
    fn test_validate_empty_topic() {
        let config = LeaderSelectorConfig::new().with_unclean_leader_election_topic_override("  ", false);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leader_selector.toml");
        fs::write(
            &path,
            "unclean_leader_election_enable = false\n\n[unclean_leader_election_topic_overrides]\nclickstream = true\n",
        )
        .unwrap();

        let config = LeaderSelectorConfig::load(&path).unwrap();

        assert!(!config.unclean_leader_election_enable);
        assert!(config.is_unclean_leader_election_enabled("clickstream"));
        assert!(!config.is_unclean_leader_election_enabled("orders"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LeaderSelectorConfig::load(dir.path().join("missing.toml"));

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
