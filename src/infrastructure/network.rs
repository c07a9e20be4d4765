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

//! Region and DNS search domain resolution

use crate::infrastructure::constants::{
    CHINA_DNS_SUFFIX, COMPUTE_INTERNAL_SUFFIX, DEFAULT_DNS_SUFFIX, DEFAULT_REGION,
    EMR_ENDPOINT_PREFIX, ISOB_DNS_SUFFIX, ISO_DNS_SUFFIX, REGION_ENV,
};
use std::fs::read_to_string;
use std::path::Path;
use tracing::{debug, warn};

/// DNS search domain in effect for the local host.
///
/// `overridden` is true when the domain differs from the EC2 default
/// `<region>.compute.internal`, which means the leader's private DNS name
/// has to be rewritten before it is used for the Kerberos handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsSearch {
    pub domain: String,
    pub overridden: bool,
}

impl DnsSearch {
    pub fn new(region: &str, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        let overridden = domain != default_domain_search(region);
        Self { domain, overridden }
    }

    pub fn default_for(region: &str) -> Self {
        Self {
            domain: default_domain_search(region),
            overridden: false,
        }
    }
}

pub fn default_domain_search(region: &str) -> String {
    format!("{}.{}", region, COMPUTE_INTERNAL_SUFFIX)
}

/// Resolve the effective region: explicit value, then `AWS_REGION`, then the default.
pub fn resolve_region(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .filter(|r| !r.trim().is_empty())
        .or_else(|| std::env::var(REGION_ENV).ok().filter(|r| !r.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

/// Extract the first `search` domain from resolv.conf content.
/// See resolv.conf(5).
pub fn parse_domain_search(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let line = line.split(['#', ';']).next().unwrap_or_default();
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("search") => tokens.next().map(str::to_string),
            _ => None,
        }
    })
}

/// Read the DNS search domain from the resolver configuration at `path`,
/// falling back to the region default when the file is unreadable or has
/// no `search` directive.
pub fn resolve_dns_search_domain(region: &str, path: impl AsRef<Path>) -> DnsSearch {
    let path = path.as_ref();
    match read_to_string(path) {
        Ok(contents) => match parse_domain_search(&contents) {
            Some(domain) => {
                debug!(domain = %domain, path = %path.display(), "Found DNS search domain");
                DnsSearch::new(region, domain)
            }
            None => DnsSearch::default_for(region),
        },
        Err(e) => {
            let fallback = DnsSearch::default_for(region);
            warn!(
                path = %path.display(),
                error = %e,
                "Unable to read resolver configuration. Using default value for domain search name: {}",
                fallback.domain
            );
            fallback
        }
    }
}

fn partition_dns_suffix(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        CHINA_DNS_SUFFIX
    } else if region.starts_with("us-isob-") {
        ISOB_DNS_SUFFIX
    } else if region.starts_with("us-iso-") {
        ISO_DNS_SUFFIX
    } else {
        DEFAULT_DNS_SUFFIX
    }
}

/// Regional EMR API host, e.g. `elasticmapreduce.us-west-2.amazonaws.com`.
pub fn region_endpoint_host(region: &str) -> String {
    format!(
        "{}.{}.{}",
        EMR_ENDPOINT_PREFIX,
        region,
        partition_dns_suffix(region)
    )
}

/// Regional EMR endpoint URL. Constructed explicitly so private-link setups
/// without internet access resolve the VPC endpoint name.
pub fn emr_endpoint_url(region: &str) -> String {
    format!("https://{}", region_endpoint_host(region))
}
