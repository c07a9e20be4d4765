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

//! In-memory EMR and STS doubles shared by the integration tests

#![allow(dead_code)]

use sm_sparkmagic::domain::cluster::{
    ClusterRecord, InstancePage, InstanceRecord, KerberosAttributes,
};
use sm_sparkmagic::infrastructure::aws::{EmrApi, EmrConnector, StsApi, TemporaryCredentials};
use sm_sparkmagic::RemoteError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const CLUSTER_ID: &str = "j-3DD9ZR01DAU14";
pub const LEADER_PUBLIC: &str = "ec2-34-222-47-14.us-west-2.compute.amazonaws.com";
pub const LEADER_PRIVATE: &str = "ip-172-31-1-113.us-west-2.compute.internal";
pub const SECURITY_CONFIG: &str = "kerb-security-config";

pub const CLUSTER_DEDICATED_KDC: &str = r#"{"EncryptionConfiguration": {"EnableInTransitEncryption": false,
  "EnableAtRestEncryption": false},
  "AuthenticationConfiguration": {"KerberosConfiguration": {"Provider": "ClusterDedicatedKdc",
  "ClusterDedicatedKdcConfiguration": {"TicketLifetimeInHours": 24}}}}"#;

pub const CROSS_REALM_TRUST: &str = r#"{"AuthenticationConfiguration": {"KerberosConfiguration": {
  "Provider": "ClusterDedicatedKdc",
  "ClusterDedicatedKdcConfiguration": {"TicketLifetimeInHours": 24,
  "CrossRealmTrustConfiguration": {"Realm": "KOLLOJUN.NET", "Domain": "kollojun.net",
  "AdminServer": "kollojun.net", "KdcServer": "kollojun.net"}}}}}"#;

pub const EXTERNAL_KDC: &str = r#"{"AuthenticationConfiguration":{"KerberosConfiguration":
  {"ExternalKdcConfiguration":{"KdcServerType":"Single","AdIntegrationConfiguration":
  {"AdRealm":"MYADDOMAIN.COM","AdDomain":"myaddomain.com","AdServer":"myaddomain.com"},
  "AdminServer":"ip-10-0-0-164.us-west-2.compute.internal",
  "KdcServer":"ip-10-0-0-164.us-west-2.compute.internal"},"Provider":"ExternalKdc"}}}"#;

pub fn cluster(realm: Option<&str>, security_configuration: Option<&str>) -> ClusterRecord {
    ClusterRecord {
        id: CLUSTER_ID.to_string(),
        name: "Mycluster".to_string(),
        security_configuration: security_configuration.map(str::to_string),
        kerberos_attributes: realm.map(|r| KerberosAttributes {
            realm: r.to_string(),
        }),
        master_public_dns_name: Some(LEADER_PUBLIC.to_string()),
    }
}

pub fn leader_instance() -> InstanceRecord {
    InstanceRecord {
        id: "ci-leader".to_string(),
        ec2_instance_id: Some("i-0736242069217a485".to_string()),
        public_dns_name: Some(LEADER_PUBLIC.to_string()),
        private_dns_name: Some(LEADER_PRIVATE.to_string()),
        public_ip_address: Some("34.222.47.14".to_string()),
        private_ip_address: Some("172.31.1.113".to_string()),
    }
}

pub fn worker_instance(n: u8) -> InstanceRecord {
    InstanceRecord {
        id: format!("ci-worker-{}", n),
        ec2_instance_id: Some(format!("i-00000000000000{:02}", n)),
        public_dns_name: None,
        private_dns_name: Some(format!("ip-172-31-2-{}.us-west-2.compute.internal", n)),
        public_ip_address: None,
        private_ip_address: Some(format!("172.31.2.{}", n)),
    }
}

/// Records every call so tests can assert on the request sequence.
#[derive(Clone, Default)]
pub struct MockEmrApi {
    pub cluster: Option<ClusterRecord>,
    /// Pages served in order; the marker of page `i` is `page-{i+1}`.
    pub pages: Vec<Vec<InstanceRecord>>,
    pub fail_on_page: Option<usize>,
    pub security_configurations: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    /// Access key id used for each connection, `None` for the default chain.
    pub connections: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockEmrApi {
    pub fn new(cluster: ClusterRecord, instances: Vec<InstanceRecord>) -> Self {
        Self {
            cluster: Some(cluster),
            pages: vec![instances],
            ..Default::default()
        }
    }

    pub fn with_pages(mut self, pages: Vec<Vec<InstanceRecord>>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_security_configuration(mut self, name: &str, document: &str) -> Self {
        self.security_configurations
            .insert(name.to_string(), document.to_string());
        self
    }

    pub fn failing_on_page(mut self, page: usize) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn connections(&self) -> Vec<Option<String>> {
        self.connections.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl EmrApi for MockEmrApi {
    async fn describe_cluster(&self, cluster_id: &str) -> Result<ClusterRecord, RemoteError> {
        self.record(format!("describe_cluster:{}", cluster_id));
        self.cluster
            .clone()
            .ok_or_else(|| RemoteError::new("InvalidRequestException", "Cluster id is not valid"))
    }

    async fn list_instances(
        &self,
        cluster_id: &str,
        marker: Option<String>,
    ) -> Result<InstancePage, RemoteError> {
        self.record(format!(
            "list_instances:{}:{}",
            cluster_id,
            marker.as_deref().unwrap_or("-")
        ));
        let index = match marker.as_deref() {
            None => 0,
            Some(m) => m
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| RemoteError::new("InvalidRequestException", "Bad marker"))?,
        };
        if self.fail_on_page == Some(index) {
            return Err(RemoteError::new("ThrottlingException", "Rate exceeded"));
        }
        let instances = self.pages.get(index).cloned().unwrap_or_default();
        let marker = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(InstancePage { instances, marker })
    }

    async fn describe_security_configuration(&self, name: &str) -> Result<String, RemoteError> {
        self.record(format!("describe_security_configuration:{}", name));
        self.security_configurations
            .get(name)
            .cloned()
            .ok_or_else(|| {
                RemoteError::new(
                    "InvalidRequestException",
                    "Security configuration does not exist",
                )
            })
    }
}

#[async_trait::async_trait]
impl EmrConnector for MockEmrApi {
    async fn connect(
        &self,
        _region: &str,
        credentials: Option<TemporaryCredentials>,
    ) -> Box<dyn EmrApi> {
        self.connections
            .lock()
            .unwrap()
            .push(credentials.map(|c| c.access_key_id));
        Box::new(self.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockStsApi {
    pub deny: bool,
    pub sessions: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockStsApi {
    pub fn sessions(&self) -> Vec<(String, String)> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StsApi for MockStsApi {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, RemoteError> {
        self.sessions
            .lock()
            .unwrap()
            .push((role_arn.to_string(), session_name.to_string()));
        if self.deny {
            return Err(RemoteError::new(
                "AccessDenied",
                "User is not authorized to perform: sts:AssumeRole",
            ));
        }
        Ok(TemporaryCredentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "super-secret-key".to_string(),
            session_token: "super-secret-token".to_string(),
        })
    }
}
