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

//! Kerberos realm derivation
//!
//! Produces the `libdefaults`, `realms` and `domain_realm` sections of a
//! krb5.conf for the cluster. See
//! https://web.mit.edu/kerberos/krb5-1.12/doc/admin/conf_files/krb5_conf.html#sections
//! and the EMR security configuration reference for the provider fields.

use crate::domain::cluster::security::KerberosProvider;
use crate::infrastructure::constants::{KADMIN_PORT, KDC_PORT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmEntry {
    pub kdc: String,
    pub admin_server: String,
    pub default_domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibDefaults {
    pub default_realm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_lifetime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KerberosRealmConfig {
    pub libdefaults: LibDefaults,
    pub realms: BTreeMap<String, RealmEntry>,
    pub domain_realm: BTreeMap<String, String>,
}

impl KerberosRealmConfig {
    /// Map `domain` and its `.domain` wildcard to `realm`.
    pub fn map_domain(&mut self, domain: &str, realm: &str) {
        self.domain_realm.insert(domain.to_string(), realm.to_string());
        self.domain_realm.insert(format!(".{}", domain), realm.to_string());
    }
}

/// Derive the realm configuration for a Kerberized cluster.
///
/// `domain_search` is the effective DNS search domain of the local host; it
/// is used as the default domain of the cluster realm and mapped to it.
pub fn resolve_realm_config(
    cluster_realm: &str,
    leader_private_dns: &str,
    domain_search: &str,
    provider: Option<&KerberosProvider>,
) -> KerberosRealmConfig {
    let mut conf = KerberosRealmConfig {
        libdefaults: LibDefaults {
            default_realm: cluster_realm.to_string(),
            ticket_lifetime: None,
        },
        ..Default::default()
    };

    conf.realms.insert(
        cluster_realm.to_string(),
        RealmEntry {
            kdc: format!("{}:{}", leader_private_dns, KDC_PORT),
            admin_server: format!("{}:{}", leader_private_dns, KADMIN_PORT),
            default_domain: domain_search.to_string(),
        },
    );
    conf.map_domain(domain_search, cluster_realm);

    let Some(provider) = provider else {
        return conf;
    };
    conf.libdefaults.ticket_lifetime = provider.ticket_lifetime();

    match provider {
        KerberosProvider::ClusterDedicatedKdc(kdc) => {
            if let Some(trust) = &kdc.cross_realm_trust_configuration {
                conf.realms.insert(
                    trust.realm.clone(),
                    RealmEntry {
                        kdc: trust.kdc_server.clone(),
                        admin_server: trust.admin_server.clone(),
                        default_domain: trust.domain.clone(),
                    },
                );
                conf.map_domain(&trust.domain, &trust.realm);
            }
        }
        KerberosProvider::ExternalKdc(ext) => {
            // The external KDC replaces the cluster-local one
            conf.realms.insert(
                cluster_realm.to_string(),
                RealmEntry {
                    kdc: ext.kdc_server.clone(),
                    admin_server: ext
                        .admin_server
                        .clone()
                        .unwrap_or_else(|| ext.kdc_server.clone()),
                    default_domain: domain_search.to_string(),
                },
            );

            if let Some(ad) = &ext.ad_integration_configuration {
                conf.realms.insert(
                    ad.ad_realm.clone(),
                    RealmEntry {
                        kdc: ad.server_or_domain().to_string(),
                        admin_server: ad.server_or_domain().to_string(),
                        default_domain: ad.ad_domain.clone(),
                    },
                );
                conf.map_domain(&ad.ad_domain, &ad.ad_realm);
            }
        }
        KerberosProvider::Unrecognized(_) => {}
    }

    conf
}
