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

/// Default output paths
pub const SPARKMAGIC_CONF_FILE: &str = "/etc/sparkmagic/config.json";
pub const KRB5_CONF_FILE: &str = "/etc/krb5.conf";
pub const RESOLV_CONF_FILE: &str = "/etc/resolv.conf";

/// Tool configuration file environment variable
pub const CONF_FILE_ENV: &str = "SM_SPARKMAGIC_CONF";

/// Region resolution
pub const REGION_ENV: &str = "AWS_REGION";
pub const DEFAULT_REGION: &str = "us-west-2";

/// Livy
pub const LIVY_PORT: u16 = 8998;
pub const DEFAULT_USER_NAME: &str = "livy";
pub const KINIT_USER_PLACEHOLDER: &str = "$user";

/// Kerberos ports on the cluster-dedicated KDC
pub const KDC_PORT: u16 = 88;
pub const KADMIN_PORT: u16 = 749;
pub const DEFAULT_TICKET_LIFETIME_HOURS: u32 = 24;

/// Role assumption
pub const ROLE_SESSION_NAME: &str = "SageMakerStudioUser";

/// EMR endpoints
pub const EMR_ENDPOINT_PREFIX: &str = "elasticmapreduce";
pub const DEFAULT_DNS_SUFFIX: &str = "amazonaws.com";
pub const CHINA_DNS_SUFFIX: &str = "amazonaws.com.cn";
pub const ISO_DNS_SUFFIX: &str = "c2s.ic.gov";
pub const ISOB_DNS_SUFFIX: &str = "sc2s.sgov.gov";

/// Compute domain used by EC2 private DNS names
pub const COMPUTE_INTERNAL_SUFFIX: &str = "compute.internal";
