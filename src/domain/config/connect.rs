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

//! Tool configuration loaded from an optional TOML file

use crate::domain::sparkmagic::KerberosAuthConfiguration;
use crate::infrastructure::constants::{
    DEFAULT_USER_NAME, KRB5_CONF_FILE, RESOLV_CONF_FILE, SPARKMAGIC_CONF_FILE,
};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectConf {
    pub region: Option<String>,
    pub user_name: String,
    pub paths: PathsConf,
    pub kerberos: KerberosClientConf,
}

impl Default for ConnectConf {
    fn default() -> Self {
        Self {
            region: None,
            user_name: DEFAULT_USER_NAME.to_string(),
            paths: PathsConf::default(),
            kerberos: KerberosClientConf::default(),
        }
    }
}

impl ConnectConf {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> anyhow::Result<Self> {
        let content = read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.as_ref(), e))?;

        let conf: Self =
            toml::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;

        Ok(conf)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConf {
    pub sparkmagic_conf: String,
    pub krb5_conf: String,
    pub resolv_conf: String,
    /// Optional SparkMagic config.json used as the starting document
    pub base_template: Option<String>,
}

impl Default for PathsConf {
    fn default() -> Self {
        Self {
            sparkmagic_conf: SPARKMAGIC_CONF_FILE.to_string(),
            krb5_conf: KRB5_CONF_FILE.to_string(),
            resolv_conf: RESOLV_CONF_FILE.to_string(),
            base_template: None,
        }
    }
}

/// requests-kerberos defaults, copied from the SparkMagic example config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KerberosClientConf {
    pub mutual_authentication: u8,
    pub service: String,
    pub delegate: bool,
    pub force_preemptive: bool,
    pub principal: String,
    pub sanitize_mutual_error_response: bool,
    pub send_cbt: bool,
}

impl Default for KerberosClientConf {
    fn default() -> Self {
        Self {
            mutual_authentication: 1,
            service: "HTTP".to_string(),
            delegate: false,
            force_preemptive: true,
            principal: String::new(),
            sanitize_mutual_error_response: true,
            send_cbt: false,
        }
    }
}

impl KerberosClientConf {
    pub fn to_auth_configuration(&self, hostname_override: String) -> KerberosAuthConfiguration {
        KerberosAuthConfiguration {
            mutual_authentication: self.mutual_authentication,
            service: self.service.clone(),
            delegate: self.delegate,
            force_preemptive: self.force_preemptive,
            principal: self.principal.clone(),
            hostname_override,
            sanitize_mutual_error_response: self.sanitize_mutual_error_response,
            send_cbt: self.send_cbt,
        }
    }
}
