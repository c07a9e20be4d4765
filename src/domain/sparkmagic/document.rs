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

//! SparkMagic `config.json` document
//!
//! Example config: https://github.com/jupyter-incubator/sparkmagic/blob/master/sparkmagic/example_config.json

use crate::domain::sparkmagic::credentials::ConnectorSettings;
use crate::shared::error::{ConnectError, Result};
use serde_json::{Map, Value};

pub const KERNEL_CREDENTIAL_KEYS: [&str; 3] = [
    "kernel_python_credentials",
    "kernel_scala_credentials",
    "kernel_r_credentials",
];
pub const KERBEROS_AUTH_KEY: &str = "kerberos_auth_configuration";
pub const IGNORE_SSL_ERRORS_KEY: &str = "ignore_ssl_errors";

/// SparkMagic configuration. Keys from the base template that this tool
/// does not manage are kept as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparkMagicConfig {
    document: Map<String, Value>,
}

impl SparkMagicConfig {
    pub fn from_template(template: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(template)? {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(ConnectError::config_error(
                "SparkMagic base template must be a JSON object",
            )),
        }
    }

    pub fn apply(&mut self, settings: &ConnectorSettings) -> Result<()> {
        let credentials = serde_json::to_value(&settings.credentials)?;
        for key in KERNEL_CREDENTIAL_KEYS {
            self.document.insert(key.to_string(), credentials.clone());
        }
        self.document
            .insert(IGNORE_SSL_ERRORS_KEY.to_string(), Value::Bool(true));

        match &settings.kerberos_auth {
            Some(auth) => {
                self.document
                    .insert(KERBEROS_AUTH_KEY.to_string(), serde_json::to_value(auth)?);
            }
            None => {
                self.document.remove(KERBEROS_AUTH_KEY);
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sparkmagic::credentials::{
        AuthMode, ConnectorCredentials, KerberosAuthConfiguration,
    };

    fn settings(kerberos: bool) -> ConnectorSettings {
        ConnectorSettings {
            credentials: ConnectorCredentials {
                username: "livy".to_string(),
                password: String::new(),
                url: "http://ip-172-31-1-113.us-west-2.compute.internal:8998".to_string(),
                auth: if kerberos { AuthMode::Kerberos } else { AuthMode::None },
            },
            kerberos_auth: kerberos.then(|| KerberosAuthConfiguration {
                mutual_authentication: 1,
                service: "HTTP".to_string(),
                delegate: false,
                force_preemptive: true,
                principal: String::new(),
                hostname_override: "ip-172-31-1-113.test.me".to_string(),
                sanitize_mutual_error_response: true,
                send_cbt: false,
            }),
        }
    }

    #[test]
    fn test_apply_keeps_template_keys() {
        let mut config =
            SparkMagicConfig::from_template(r#"{"heartbeat_refresh_seconds": 30}"#).unwrap();
        config.apply(&settings(false)).unwrap();

        assert_eq!(config.get("heartbeat_refresh_seconds"), Some(&Value::from(30)));
        assert_eq!(config.get(IGNORE_SSL_ERRORS_KEY), Some(&Value::Bool(true)));
        let creds = config.get("kernel_python_credentials").unwrap();
        assert_eq!(creds["auth"], "None");
        assert_eq!(creds["password"], "");
        assert!(config.get(KERBEROS_AUTH_KEY).is_none());
    }

    #[test]
    fn test_apply_kerberos_block() {
        let mut config = SparkMagicConfig::default();
        config.apply(&settings(true)).unwrap();

        assert_eq!(config.get("kernel_scala_credentials").unwrap()["auth"], "Kerberos");
        let auth = config.get(KERBEROS_AUTH_KEY).unwrap();
        assert_eq!(auth["hostname_override"], "ip-172-31-1-113.test.me");
        assert_eq!(auth["force_preemptive"], true);
    }

    #[test]
    fn test_apply_drops_stale_kerberos_block() {
        let mut config =
            SparkMagicConfig::from_template(r#"{"kerberos_auth_configuration": {"service": "HTTP"}}"#)
                .unwrap();
        config.apply(&settings(false)).unwrap();
        assert!(config.get(KERBEROS_AUTH_KEY).is_none());
    }

    #[test]
    fn test_template_must_be_object() {
        assert!(SparkMagicConfig::from_template("[1, 2]").is_err());
    }
}
