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

use crate::domain::cluster::security::KerberosProvider;
use crate::domain::config::KerberosClientConf;
use crate::infrastructure::constants::LIVY_PORT;
use crate::infrastructure::network::DnsSearch;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    None,
    Kerberos,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::None => "None",
            AuthMode::Kerberos => "Kerberos",
        }
    }
}

/// Credential record of a SparkMagic kernel (`kernel_*_credentials`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorCredentials {
    pub username: String,
    pub password: String,
    pub url: String,
    pub auth: AuthMode,
}

/// requests-kerberos options SparkMagic passes through for Kerberos auth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KerberosAuthConfiguration {
    pub mutual_authentication: u8,
    pub service: String,
    pub delegate: bool,
    pub force_preemptive: bool,
    pub principal: String,
    pub hostname_override: String,
    pub sanitize_mutual_error_response: bool,
    pub send_cbt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSettings {
    pub credentials: ConnectorCredentials,
    pub kerberos_auth: Option<KerberosAuthConfiguration>,
}

/// Kerberos inputs for credential assembly. Only present when Kerberos
/// authentication is in effect.
#[derive(Debug, Clone, Copy)]
pub struct KerberosContext<'a> {
    pub provider: Option<&'a KerberosProvider>,
    pub dns_search: &'a DnsSearch,
    pub client: &'a KerberosClientConf,
}

pub fn livy_url(leader_private_dns: &str) -> String {
    format!("http://{}:{}", leader_private_dns, LIVY_PORT)
}

/// Hostname to use for the Kerberos GSS exchange.
///
/// The notebook host is not registered in the cluster's DNS, so when the
/// local DHCP options set a non-default search domain the leader's domain
/// is replaced with it to match the service principal.
pub fn kerberos_hostname_override(leader_private_dns: &str, dns_search: &DnsSearch) -> String {
    if !dns_search.overridden {
        return leader_private_dns.to_string();
    }
    match leader_private_dns.split_once('.') {
        Some((host, _)) => format!("{}.{}", host, dns_search.domain),
        None => leader_private_dns.to_string(),
    }
}

/// Principal name for kinit. Users of an external directory authenticate
/// in the directory realm.
pub fn kinit_user_name(user_name: &str, provider: Option<&KerberosProvider>) -> String {
    match provider.and_then(KerberosProvider::directory_realm) {
        Some(realm) => format!("{}@{}", user_name, realm),
        None => user_name.to_string(),
    }
}

pub fn assemble_credentials(
    leader_private_dns: &str,
    user_name: &str,
    kerberos: Option<KerberosContext<'_>>,
) -> ConnectorSettings {
    let url = livy_url(leader_private_dns);

    let Some(krb) = kerberos else {
        return ConnectorSettings {
            credentials: ConnectorCredentials {
                username: user_name.to_string(),
                password: String::new(),
                url,
                auth: AuthMode::None,
            },
            kerberos_auth: None,
        };
    };

    let hostname_override = kerberos_hostname_override(leader_private_dns, krb.dns_search);
    ConnectorSettings {
        credentials: ConnectorCredentials {
            username: kinit_user_name(user_name, krb.provider),
            password: String::new(),
            url,
            auth: AuthMode::Kerberos,
        },
        kerberos_auth: Some(krb.client.to_auth_configuration(hostname_override)),
    }
}
