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

use crate::domain::cluster::entities::{
    ClusterRecord, InstancePage, InstanceRecord, KerberosAttributes,
};
use crate::infrastructure::network::emr_endpoint_url;
use crate::shared::error::RemoteError;
use aws_config::BehaviorVersion;
use aws_sdk_emr::error::ProvideErrorMetadata;
use aws_sdk_emr::Client as EmrClient;
use aws_sdk_sts::Client as StsClient;
use std::fmt;
use tracing::{debug, info};

/// Read-only subset of the EMR control-plane API used to resolve a cluster.
#[async_trait::async_trait]
pub trait EmrApi: Send + Sync {
    async fn describe_cluster(&self, cluster_id: &str) -> Result<ClusterRecord, RemoteError>;

    async fn list_instances(
        &self,
        cluster_id: &str,
        marker: Option<String>,
    ) -> Result<InstancePage, RemoteError>;

    /// Returns the raw JSON security configuration document.
    async fn describe_security_configuration(&self, name: &str) -> Result<String, RemoteError>;
}

/// Opens an EMR client for a region, signing with `credentials` when given
/// and with the default credential chain otherwise.
#[async_trait::async_trait]
pub trait EmrConnector: Send + Sync {
    async fn connect(
        &self,
        region: &str,
        credentials: Option<TemporaryCredentials>,
    ) -> Box<dyn EmrApi>;
}

#[async_trait::async_trait]
pub trait StsApi: Send + Sync {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, RemoteError>;
}

/// Credentials returned by role assumption.
#[derive(Clone)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .finish()
    }
}

fn remote_error<E: ProvideErrorMetadata + fmt::Display>(err: &E) -> RemoteError {
    RemoteError {
        code: err.code().map(str::to_string),
        message: err
            .message()
            .map(str::to_string)
            .or_else(|| Some(err.to_string())),
    }
}

pub struct AwsStsClient {
    client: StsClient,
}

impl AwsStsClient {
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: StsClient::new(&sdk_config),
        }
    }
}

#[async_trait::async_trait]
impl StsApi for AwsStsClient {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, RemoteError> {
        let output = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| remote_error(&e))?;

        let credentials = output
            .credentials()
            .ok_or_else(|| RemoteError::message("AssumeRole returned no credentials"))?;

        Ok(TemporaryCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
        })
    }
}

pub struct AwsEmrClient {
    client: EmrClient,
}

impl AwsEmrClient {
    /// Client using the default credential chain.
    pub async fn new(region: &str) -> Self {
        Self::build(region, None).await
    }

    /// Client signing with temporary credentials from role assumption.
    pub async fn with_credentials(region: &str, credentials: TemporaryCredentials) -> Self {
        Self::build(region, Some(credentials)).await
    }

    async fn build(region: &str, credentials: Option<TemporaryCredentials>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()));

        if let Some(creds) = credentials {
            let provider = aws_sdk_emr::config::Credentials::new(
                creds.access_key_id,
                creds.secret_access_key,
                Some(creds.session_token),
                None,
                "sm-sparkmagic-assume-role",
            );
            loader = loader.credentials_provider(provider);
        }

        let sdk_config = loader.load().await;
        let endpoint = emr_endpoint_url(region);
        let emr_config = aws_sdk_emr::config::Builder::from(&sdk_config)
            .endpoint_url(&endpoint)
            .build();

        debug!(region = %region, endpoint = %endpoint, "EMR client initialized");

        Self {
            client: EmrClient::from_conf(emr_config),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AwsEmrConnector;

#[async_trait::async_trait]
impl EmrConnector for AwsEmrConnector {
    async fn connect(
        &self,
        region: &str,
        credentials: Option<TemporaryCredentials>,
    ) -> Box<dyn EmrApi> {
        match credentials {
            Some(credentials) => {
                Box::new(AwsEmrClient::with_credentials(region, credentials).await)
            }
            None => Box::new(AwsEmrClient::new(region).await),
        }
    }
}

#[async_trait::async_trait]
impl EmrApi for AwsEmrClient {
    async fn describe_cluster(&self, cluster_id: &str) -> Result<ClusterRecord, RemoteError> {
        let output = self
            .client
            .describe_cluster()
            .cluster_id(cluster_id)
            .send()
            .await
            .map_err(|e| remote_error(&e))?;

        let cluster = output
            .cluster()
            .ok_or_else(|| RemoteError::message("DescribeCluster returned no cluster"))?;

        let record = ClusterRecord {
            id: cluster.id().unwrap_or(cluster_id).to_string(),
            name: cluster.name().unwrap_or_default().to_string(),
            security_configuration: cluster.security_configuration().map(str::to_string),
            kerberos_attributes: cluster.kerberos_attributes().map(|attrs| KerberosAttributes {
                realm: attrs.realm().unwrap_or_default().to_string(),
            }),
            master_public_dns_name: cluster.master_public_dns_name().map(str::to_string),
        };
        // Kerberos attributes also carry KDC and AD join passwords, only the realm is logged
        debug!(
            cluster_id = %record.id,
            name = %record.name,
            security_configuration = ?record.security_configuration,
            realm = ?record.kerberos_realm(),
            master_public_dns_name = ?record.master_public_dns_name,
            "Describe cluster response"
        );
        Ok(record)
    }

    async fn list_instances(
        &self,
        cluster_id: &str,
        marker: Option<String>,
    ) -> Result<InstancePage, RemoteError> {
        let output = self
            .client
            .list_instances()
            .cluster_id(cluster_id)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| remote_error(&e))?;

        let instances = output
            .instances()
            .iter()
            .map(|instance| InstanceRecord {
                id: instance.id().unwrap_or_default().to_string(),
                ec2_instance_id: instance.ec2_instance_id().map(str::to_string),
                public_dns_name: instance.public_dns_name().map(str::to_string),
                private_dns_name: instance.private_dns_name().map(str::to_string),
                public_ip_address: instance.public_ip_address().map(str::to_string),
                private_ip_address: instance.private_ip_address().map(str::to_string),
            })
            .collect();

        let page = InstancePage {
            instances,
            marker: output.marker().map(str::to_string),
        };
        debug!(
            cluster_id = %cluster_id,
            instances = page.instances.len(),
            marker = ?page.marker,
            "List instances response"
        );
        Ok(page)
    }

    async fn describe_security_configuration(&self, name: &str) -> Result<String, RemoteError> {
        let output = self
            .client
            .describe_security_configuration()
            .name(name)
            .send()
            .await
            .map_err(|e| remote_error(&e))?;
        info!(name = %name, "Fetched security configuration");

        output
            .security_configuration()
            .map(str::to_string)
            .ok_or_else(|| {
                RemoteError::message("DescribeSecurityConfiguration returned no document")
            })
    }
}
