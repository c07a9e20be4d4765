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

use crate::domain::cluster::entities::{ClusterRecord, InstanceRecord};
use crate::shared::error::{ConnectError, Result};
use tracing::debug;

/// The cluster's leader node, running the Livy server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryNode {
    instance: InstanceRecord,
    private_dns_name: String,
}

impl PrimaryNode {
    /// Find the instance answering to the cluster's advertised leader DNS name.
    ///
    /// The advertised "public" DNS name is the private one for clusters in a
    /// private subnet, so both instance names are compared.
    pub fn identify(cluster: &ClusterRecord, instances: &[InstanceRecord]) -> Result<Self> {
        let advertised = cluster
            .master_public_dns_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ConnectError::primary_node_not_found(&cluster.id))?;

        let instance = instances
            .iter()
            .find(|instance| instance.answers_to(advertised))
            .ok_or_else(|| ConnectError::primary_node_not_found(&cluster.id))?;

        let private_dns_name = instance
            .private_dns_name
            .clone()
            .ok_or_else(|| ConnectError::primary_node_not_found(&cluster.id))?;

        debug!(
            instance_id = %instance.id,
            private_dns_name = %private_dns_name,
            "Identified primary node"
        );

        Ok(Self {
            instance: instance.clone(),
            private_dns_name,
        })
    }

    pub fn private_dns_name(&self) -> &str {
        &self.private_dns_name
    }

    pub fn public_dns_name(&self) -> Option<&str> {
        self.instance.public_dns_name.as_deref()
    }

    pub fn instance(&self) -> &InstanceRecord {
        &self.instance
    }
}
