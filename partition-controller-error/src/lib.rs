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

//! # Partition Controller Error Handling
//!
//! Error types shared by the partition controller crates.
//!
//! - [`SelectionError`]: why a leader selection was refused, classified by
//!   [`SelectionErrorKind`] into fatal, invalid-state and transient rejections.
//! - [`ConfigError`]: configuration loading and validation failures.
//! - [`PartitionControllerError`]: roll-up of both for callers that want a
//!   single error type.
//!
//! ### Usage
//!
//! ```rust
//! use partition_controller_error::SelectionError;
//! use partition_controller_error::SelectionErrorKind;
//!
//! let err = SelectionError::NoLiveReassignmentTarget {
//!     topic: "orders".to_string(),
//!     partition: 0,
//!     target_replicas: vec![4, 5],
//! };
//! assert_eq!(err.kind(), SelectionErrorKind::RejectedTransient);
//! assert!(err.is_retriable());
//! ```

// Selection error module
pub mod selection_error;

// Config error module
pub mod config_error;

pub use config_error::ConfigError;
pub use config_error::ConfigResult;
pub use selection_error::SelectionError;
pub use selection_error::SelectionErrorKind;
pub use selection_error::SelectionResult;
use thiserror::Error;

/// Unified error type for the partition controller
#[derive(Debug, Error)]
pub enum PartitionControllerError {
    /// Leader selection refused
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PartitionControllerError {
    /// Create a configuration invalid value error
    #[inline]
    pub fn config_invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config(ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        })
    }

    /// Selection error kind, if this is a selection error
    pub fn selection_kind(&self) -> Option<SelectionErrorKind> {
        match self {
            Self::Selection(e) => Some(e.kind()),
            Self::Config(_) => None,
        }
    }
}

impl From<config::ConfigError> for PartitionControllerError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(ConfigError::Load(e))
    }
}

/// Result type alias for partition controller operations
pub type PartitionControllerResult<T> = std::result::Result<T, PartitionControllerError>;
