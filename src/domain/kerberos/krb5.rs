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

//! krb5.conf rendering and parsing for the sections we generate

use crate::domain::kerberos::realm::{KerberosRealmConfig, RealmEntry};
use crate::shared::error::{ConnectError, Result};

const INDENT: &str = "    ";

pub fn render_krb5_conf(conf: &KerberosRealmConfig) -> String {
    let mut out = String::new();
    out.push_str("# Generated by sm-sparkmagic\n");

    out.push_str("[libdefaults]\n");
    out.push_str(&format!("{}default_realm = {}\n", INDENT, conf.libdefaults.default_realm));
    if let Some(lifetime) = &conf.libdefaults.ticket_lifetime {
        out.push_str(&format!("{}ticket_lifetime = {}\n", INDENT, lifetime));
    }

    out.push_str("\n[realms]\n");
    for (realm, entry) in &conf.realms {
        out.push_str(&format!("{}{} = {{\n", INDENT, realm));
        out.push_str(&format!("{0}{0}kdc = {1}\n", INDENT, entry.kdc));
        out.push_str(&format!("{0}{0}admin_server = {1}\n", INDENT, entry.admin_server));
        out.push_str(&format!("{0}{0}default_domain = {1}\n", INDENT, entry.default_domain));
        out.push_str(&format!("{}}}\n", INDENT));
    }

    out.push_str("\n[domain_realm]\n");
    for (domain, realm) in &conf.domain_realm {
        out.push_str(&format!("{}{} = {}\n", INDENT, domain, realm));
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    LibDefaults,
    Realms,
    DomainRealm,
    Other,
}

#[derive(Default)]
struct PartialRealm {
    name: String,
    kdc: Option<String>,
    admin_server: Option<String>,
    default_domain: Option<String>,
}

impl PartialRealm {
    fn finish(self, line_no: usize) -> Result<(String, RealmEntry)> {
        let missing = |key: &str| {
            ConnectError::config_error(format!(
                "krb5.conf line {}: realm '{}' is missing '{}'",
                line_no, self.name, key
            ))
        };
        let entry = RealmEntry {
            kdc: self.kdc.clone().ok_or_else(|| missing("kdc"))?,
            admin_server: self.admin_server.clone().ok_or_else(|| missing("admin_server"))?,
            default_domain: self
                .default_domain
                .clone()
                .ok_or_else(|| missing("default_domain"))?,
        };
        Ok((self.name, entry))
    }
}

fn key_value(line: &str, line_no: usize) -> Result<(&str, &str)> {
    line.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| {
            ConnectError::config_error(format!(
                "krb5.conf line {}: expected 'key = value', got '{}'",
                line_no, line
            ))
        })
}

/// Parse the `libdefaults`, `realms` and `domain_realm` sections back into a
/// [`KerberosRealmConfig`]. Other sections and unknown keys are ignored.
pub fn parse_krb5_conf(text: &str) -> Result<KerberosRealmConfig> {
    let mut conf = KerberosRealmConfig::default();
    let mut section = Section::Other;
    let mut open_realm: Option<PartialRealm> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(realm) = open_realm.as_mut() {
            if line == "}" {
                if let Some(done) = open_realm.take() {
                    let (name, entry) = done.finish(line_no)?;
                    conf.realms.insert(name, entry);
                }
                continue;
            }
            let (key, value) = key_value(line, line_no)?;
            match key {
                "kdc" => realm.kdc = Some(value.to_string()),
                "admin_server" => realm.admin_server = Some(value.to_string()),
                "default_domain" => realm.default_domain = Some(value.to_string()),
                _ => {}
            }
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = match name.trim() {
                "libdefaults" => Section::LibDefaults,
                "realms" => Section::Realms,
                "domain_realm" => Section::DomainRealm,
                _ => Section::Other,
            };
            continue;
        }

        let (key, value) = key_value(line, line_no)?;
        match section {
            Section::LibDefaults => match key {
                "default_realm" => conf.libdefaults.default_realm = value.to_string(),
                "ticket_lifetime" => conf.libdefaults.ticket_lifetime = Some(value.to_string()),
                _ => {}
            },
            Section::Realms => {
                if value != "{" {
                    return Err(ConnectError::config_error(format!(
                        "krb5.conf line {}: expected '{} = {{'",
                        line_no, key
                    )));
                }
                open_realm = Some(PartialRealm {
                    name: key.to_string(),
                    ..Default::default()
                });
            }
            Section::DomainRealm => {
                conf.domain_realm.insert(key.to_string(), value.to_string());
            }
            Section::Other => {}
        }
    }

    if let Some(realm) = open_realm {
        return Err(ConnectError::config_error(format!(
            "krb5.conf: realm '{}' is not closed",
            realm.name
        )));
    }

    Ok(conf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kerberos::realm::LibDefaults;
    use std::collections::BTreeMap;

    fn sample() -> KerberosRealmConfig {
        let mut realms = BTreeMap::new();
        realms.insert(
            "KTEST.COM".to_string(),
            RealmEntry {
                kdc: "ip-172-31-1-113.us-west-2.compute.internal:88".to_string(),
                admin_server: "ip-172-31-1-113.us-west-2.compute.internal:749".to_string(),
                default_domain: "test.me".to_string(),
            },
        );
        let mut conf = KerberosRealmConfig {
            libdefaults: LibDefaults {
                default_realm: "KTEST.COM".to_string(),
                ticket_lifetime: Some("24h".to_string()),
            },
            realms,
            domain_realm: BTreeMap::new(),
        };
        conf.map_domain("test.me", "KTEST.COM");
        conf
    }

    #[test]
    fn test_render_sections() {
        let text = render_krb5_conf(&sample());
        assert!(text.contains(
            "[libdefaults]\n    default_realm = KTEST.COM\n    ticket_lifetime = 24h\n"
        ));
        assert!(text.contains(
            "    KTEST.COM = {\n        kdc = ip-172-31-1-113.us-west-2.compute.internal:88\n"
        ));
        assert!(text.contains(
            "[domain_realm]\n    .test.me = KTEST.COM\n    test.me = KTEST.COM\n"
        ));
    }

    #[test]
    fn test_render_then_parse_reproduces_config() {
        let conf = sample();
        assert_eq!(parse_krb5_conf(&render_krb5_conf(&conf)).unwrap(), conf);
    }

    #[test]
    fn test_parse_ignores_unknown_sections_and_keys() {
        let text = "[logging]\n default = FILE:/var/log/krb5libs.log\n\
                    [libdefaults]\n default_realm = A.COM\n dns_lookup_realm = false\n\
                    [realms]\n A.COM = {\n  kdc = kdc.a.com\n  admin_server = kdc.a.com\n  default_domain = a.com\n  max_life = 1d\n }\n";
        let conf = parse_krb5_conf(text).unwrap();
        assert_eq!(conf.libdefaults.default_realm, "A.COM");
        assert_eq!(conf.libdefaults.ticket_lifetime, None);
        assert_eq!(conf.realms["A.COM"].kdc, "kdc.a.com");
    }

    #[test]
    fn test_parse_rejects_unclosed_realm() {
        let text = "[realms]\n A.COM = {\n  kdc = kdc.a.com\n";
        assert!(parse_krb5_conf(text).is_err());
    }

    #[test]
    fn test_parse_rejects_incomplete_realm() {
        let text = "[realms]\n A.COM = {\n  kdc = kdc.a.com\n }\n";
        assert!(parse_krb5_conf(text).is_err());
    }
}
