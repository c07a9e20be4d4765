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

use crate::domain::config::connect::ConnectConf;
use crate::shared::error::{ConnectError, Result};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::warn;

/// Parse dynamic configuration properties from -D key=value format
pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for config in configs {
        let (key, value) = config.split_once('=').ok_or_else(|| {
            ConnectError::config_error(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(ConnectError::config_error(format!(
                "Empty key in config: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key = %key, value = %value, "Ignoring invalid dynamic config value");
            None
        }
    }
}

pub fn apply_to_connect_conf(configs: &HashMap<String, String>, conf: &mut ConnectConf) {
    if let Some(region) = configs.get("region") {
        conf.region = Some(region.clone());
    }

    if let Some(user_name) = configs.get("user-name") {
        conf.user_name = user_name.clone();
    }

    if let Some(path) = configs.get("paths.sparkmagic-conf") {
        conf.paths.sparkmagic_conf = path.clone();
    }

    if let Some(path) = configs.get("paths.krb5-conf") {
        conf.paths.krb5_conf = path.clone();
    }

    if let Some(path) = configs.get("paths.resolv-conf") {
        conf.paths.resolv_conf = path.clone();
    }

    if let Some(path) = configs.get("paths.base-template") {
        conf.paths.base_template = Some(path.clone());
    }

    if let Some(service) = configs.get("kerberos.service") {
        conf.kerberos.service = service.clone();
    }

    if let Some(principal) = configs.get("kerberos.principal") {
        conf.kerberos.principal = principal.clone();
    }

    if let Some(v) = configs
        .get("kerberos.mutual-authentication")
        .and_then(|v| parse_or_warn::<u8>("kerberos.mutual-authentication", v))
    {
        conf.kerberos.mutual_authentication = v;
    }

    if let Some(v) = configs
        .get("kerberos.delegate")
        .and_then(|v| parse_or_warn::<bool>("kerberos.delegate", v))
    {
        conf.kerberos.delegate = v;
    }

    if let Some(v) = configs
        .get("kerberos.force-preemptive")
        .and_then(|v| parse_or_warn::<bool>("kerberos.force-preemptive", v))
    {
        conf.kerberos.force_preemptive = v;
    }

    if let Some(v) = configs
        .get("kerberos.send-cbt")
        .and_then(|v| parse_or_warn::<bool>("kerberos.send-cbt", v))
    {
        conf.kerberos.send_cbt = v;
    }
}
