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
use crate::domain::cluster::security::SecurityConfiguration;
use crate::infrastructure::aws::{EmrApi, StsApi, TemporaryCredentials};
use crate::infrastructure::constants::ROLE_SESSION_NAME;
use crate::shared::error::{ConnectError, RemoteError, Result};
use futures::stream::{self, TryStreamExt};
use tracing::{debug, info};

/// Raw cluster state fetched from the control plane.
#[derive(Debug, Clone)]
pub struct ClusterTopology {
    pub cluster: ClusterRecord,
    pub instances: Vec<InstanceRecord>,
    pub security_configuration: Option<SecurityConfiguration>,
}

/// Exchange `role_arn` for temporary credentials, allowing cross-account access.
pub async fn assume_role(sts: &dyn StsApi, role_arn: &str) -> Result<TemporaryCredentials> {
    info!(role_arn = %role_arn, "Assuming role");
    sts.assume_role(role_arn, ROLE_SESSION_NAME)
        .await
        .map_err(|e| {
            debug!(role_arn = %role_arn, error = %e, "Failed to assume role");
            ConnectError::authorization(role_arn, e)
        })
}

impl ClusterTopology {
    pub async fn fetch(emr: &dyn EmrApi, cluster_id: &str) -> Result<Self> {
        let cluster = emr.describe_cluster(cluster_id).await.map_err(|e| {
            debug!(cluster_id = %cluster_id, error = %e, "Failed to describe cluster");
            ConnectError::cluster_lookup(cluster_id, e)
        })?;

        let instances = list_all_instances(emr, cluster_id).await.map_err(|e| {
            debug!(cluster_id = %cluster_id, error = %e, "Failed to list instances");
            ConnectError::instance_lookup(cluster_id, e)
        })?;

        let security_configuration = fetch_security_configuration(emr, &cluster).await?;

        info!(
            cluster_id = %cluster_id,
            instances = instances.len(),
            "Successfully read EMR cluster details"
        );

        Ok(Self {
            cluster,
            instances,
            security_configuration,
        })
    }
}

/// Walk every list-instances page, concatenating in the order returned.
async fn list_all_instances(
    emr: &dyn EmrApi,
    cluster_id: &str,
) -> std::result::Result<Vec<InstanceRecord>, RemoteError> {
    // None: done, Some(None): first page, Some(Some(marker)): next page
    let pages = stream::try_unfold(Some(None), move |state: Option<Option<String>>| async move {
        let Some(marker) = state else {
            return Ok(None);
        };
        let page = emr.list_instances(cluster_id, marker).await?;
        let next = page.marker.filter(|m| !m.is_empty()).map(Some);
        Ok(Some((page.instances, next)))
    });

    pages.try_concat().await
}

async fn fetch_security_configuration(
    emr: &dyn EmrApi,
    cluster: &ClusterRecord,
) -> Result<Option<SecurityConfiguration>> {
    let Some(name) = cluster.security_configuration.as_deref() else {
        debug!("Skipping security configuration as none is attached to the cluster");
        return Ok(None);
    };

    let document = emr
        .describe_security_configuration(name)
        .await
        .map_err(|e| ConnectError::security_config_lookup(name, &cluster.id, e))?;
    debug!(name = %name, document = %document, "Describe security configuration response");

    SecurityConfiguration::from_json(name, &document)
        .map(Some)
        .map_err(|e| {
            let detail = RemoteError::message(e.to_string());
            ConnectError::security_config_lookup(name, &cluster.id, detail)
        })
}
