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

use serde::{Deserialize, Serialize};

/// Kerberos attributes advertised on a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KerberosAttributes {
    pub realm: String,
}

impl KerberosAttributes {
    pub fn is_empty(&self) -> bool {
        self.realm.trim().is_empty()
    }
}

/// Cluster as returned by describe-cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub id: String,
    pub name: String,
    pub security_configuration: Option<String>,
    pub kerberos_attributes: Option<KerberosAttributes>,
    /// Public DNS name of the leader node. For clusters launched in a
    /// private subnet this is actually the private DNS name.
    pub master_public_dns_name: Option<String>,
}

impl ClusterRecord {
    pub fn is_kerberos_cluster(&self) -> bool {
        self.kerberos_attributes
            .as_ref()
            .is_some_and(|attrs| !attrs.is_empty())
    }

    pub fn kerberos_realm(&self) -> Option<&str> {
        self.kerberos_attributes
            .as_ref()
            .filter(|attrs| !attrs.is_empty())
            .map(|attrs| attrs.realm.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: String,
    pub ec2_instance_id: Option<String>,
    pub public_dns_name: Option<String>,
    pub private_dns_name: Option<String>,
    pub public_ip_address: Option<String>,
    pub private_ip_address: Option<String>,
}

impl InstanceRecord {
    /// True if either DNS name of this instance equals `dns_name`.
    pub fn answers_to(&self, dns_name: &str) -> bool {
        self.public_dns_name.as_deref() == Some(dns_name)
            || self.private_dns_name.as_deref() == Some(dns_name)
    }
}

/// One page of list-instances output.
#[derive(Debug, Clone, Default)]
pub struct InstancePage {
    pub instances: Vec<InstanceRecord>,
    pub marker: Option<String>,
}
