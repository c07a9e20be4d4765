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

//! Typed view of an EMR security configuration document
//!
//! Only the Kerberos part of the authentication section is modelled. The
//! provider is decoded into a closed enum so realm resolution never has to
//! probe the raw document for optional keys.

use crate::infrastructure::constants::DEFAULT_TICKET_LIFETIME_HOURS;
use crate::shared::error::ConnectError;
use serde::{Deserialize, Serialize};

pub const PROVIDER_CLUSTER_DEDICATED_KDC: &str = "ClusterDedicatedKdc";
pub const PROVIDER_EXTERNAL_KDC: &str = "ExternalKdc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfiguration {
    pub name: String,
    pub kerberos: Option<KerberosProvider>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KerberosProvider {
    ClusterDedicatedKdc(ClusterDedicatedKdcConfig),
    ExternalKdc(ExternalKdcConfig),
    Unrecognized(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterDedicatedKdcConfig {
    pub ticket_lifetime_in_hours: Option<u32>,
    pub cross_realm_trust_configuration: Option<CrossRealmTrustConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CrossRealmTrustConfig {
    pub realm: String,
    pub domain: String,
    pub admin_server: String,
    pub kdc_server: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalKdcConfig {
    pub kdc_server_type: Option<String>,
    pub kdc_server: String,
    pub admin_server: Option<String>,
    pub ticket_lifetime_in_hours: Option<u32>,
    pub ad_integration_configuration: Option<AdIntegrationConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdIntegrationConfig {
    pub ad_realm: String,
    pub ad_domain: String,
    /// Not part of the documented EMR contract but present in practice.
    pub ad_server: Option<String>,
}

impl AdIntegrationConfig {
    /// Directory server address, falling back to the directory domain.
    pub fn server_or_domain(&self) -> &str {
        self.ad_server.as_deref().unwrap_or(&self.ad_domain)
    }
}

impl KerberosProvider {
    pub fn name(&self) -> &str {
        match self {
            KerberosProvider::ClusterDedicatedKdc(_) => PROVIDER_CLUSTER_DEDICATED_KDC,
            KerberosProvider::ExternalKdc(_) => PROVIDER_EXTERNAL_KDC,
            KerberosProvider::Unrecognized(name) => name,
        }
    }

    /// Ticket lifetime formatted for krb5.conf, e.g. `24h`.
    /// `None` for unrecognized providers.
    pub fn ticket_lifetime(&self) -> Option<String> {
        let hours = match self {
            KerberosProvider::ClusterDedicatedKdc(conf) => conf.ticket_lifetime_in_hours,
            KerberosProvider::ExternalKdc(conf) => conf.ticket_lifetime_in_hours,
            KerberosProvider::Unrecognized(_) => return None,
        };
        Some(format_ticket_lifetime(hours))
    }

    /// Realm of the external directory when the KDC is integrated with one.
    pub fn directory_realm(&self) -> Option<&str> {
        match self {
            KerberosProvider::ExternalKdc(conf) => conf
                .ad_integration_configuration
                .as_ref()
                .map(|ad| ad.ad_realm.as_str()),
            _ => None,
        }
    }
}

pub fn format_ticket_lifetime(hours: Option<u32>) -> String {
    format!("{}h", hours.unwrap_or(DEFAULT_TICKET_LIFETIME_HOURS))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSecurityConfiguration {
    authentication_configuration: Option<RawAuthenticationConfiguration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawAuthenticationConfiguration {
    kerberos_configuration: Option<RawKerberosConfiguration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawKerberosConfiguration {
    provider: String,
    cluster_dedicated_kdc_configuration: Option<ClusterDedicatedKdcConfig>,
    external_kdc_configuration: Option<ExternalKdcConfig>,
}

impl TryFrom<RawKerberosConfiguration> for KerberosProvider {
    type Error = ConnectError;

    fn try_from(raw: RawKerberosConfiguration) -> Result<Self, Self::Error> {
        match raw.provider.as_str() {
            PROVIDER_CLUSTER_DEDICATED_KDC => Ok(KerberosProvider::ClusterDedicatedKdc(
                raw.cluster_dedicated_kdc_configuration.unwrap_or_default(),
            )),
            PROVIDER_EXTERNAL_KDC => raw
                .external_kdc_configuration
                .map(KerberosProvider::ExternalKdc)
                .ok_or_else(|| {
                    ConnectError::config_error(
                        "ExternalKdc provider without ExternalKdcConfiguration",
                    )
                }),
            other => Ok(KerberosProvider::Unrecognized(other.to_string())),
        }
    }
}

impl SecurityConfiguration {
    /// Parse the JSON document returned by describe-security-configuration.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, ConnectError> {
        let raw: RawSecurityConfiguration = serde_json::from_str(json)?;
        let kerberos = raw
            .authentication_configuration
            .and_then(|auth| auth.kerberos_configuration)
            .map(KerberosProvider::try_from)
            .transpose()?;

        Ok(Self {
            name: name.into(),
            kerberos,
        })
    }
}
