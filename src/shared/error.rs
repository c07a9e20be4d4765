// Copyright 2025 JiangLong.
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
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConnectError>;

/// Error detail returned by a remote control-plane call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message),
            (Some(code), None) => write!(f, "{}", code),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "unknown remote error"),
        }
    }
}

impl std::error::Error for RemoteError {}

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Unable to assume role (arn: {role_arn}). Ensure permissions are setup correctly. Error: {source}")]
    Authorization {
        role_arn: String,
        source: RemoteError,
    },

    #[error("Unable to get EMR cluster (id: {cluster_id}) details using describe-cluster. Error: {source}")]
    ClusterLookup {
        cluster_id: String,
        source: RemoteError,
    },

    #[error("Unable to list instances in EMR cluster (id: {cluster_id}) using list-instances. Error: {source}")]
    InstanceLookup {
        cluster_id: String,
        source: RemoteError,
    },

    #[error("Unable to get security configuration '{name}' of EMR cluster (id: {cluster_id}) using describe-security-configuration. Error: {source}")]
    SecurityConfigLookup {
        name: String,
        cluster_id: String,
        source: RemoteError,
    },

    #[error("Failed to find the primary node needed to communicate with the Livy server. Please ensure cluster id {cluster_id} is correct")]
    PrimaryNodeNotFound { cluster_id: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ConnectError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn validation_error(context: impl Into<String>) -> Self {
        Self::ValidationError(context.into())
    }

    pub fn authorization(role_arn: impl Into<String>, source: RemoteError) -> Self {
        Self::Authorization {
            role_arn: role_arn.into(),
            source,
        }
    }

    pub fn cluster_lookup(cluster_id: impl Into<String>, source: RemoteError) -> Self {
        Self::ClusterLookup {
            cluster_id: cluster_id.into(),
            source,
        }
    }

    pub fn instance_lookup(cluster_id: impl Into<String>, source: RemoteError) -> Self {
        Self::InstanceLookup {
            cluster_id: cluster_id.into(),
            source,
        }
    }

    pub fn security_config_lookup(
        name: impl Into<String>,
        cluster_id: impl Into<String>,
        source: RemoteError,
    ) -> Self {
        Self::SecurityConfigLookup {
            name: name.into(),
            cluster_id: cluster_id.into(),
            source,
        }
    }

    pub fn primary_node_not_found(cluster_id: impl Into<String>) -> Self {
        Self::PrimaryNodeNotFound {
            cluster_id: cluster_id.into(),
        }
    }
}
