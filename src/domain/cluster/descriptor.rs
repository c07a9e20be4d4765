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

use crate::domain::cluster::primary::PrimaryNode;
use crate::domain::cluster::topology::{assume_role, ClusterTopology};
use crate::domain::cluster::validator::ConnectionValidator;
use crate::domain::config::ConnectConf;
use crate::domain::kerberos::{render_krb5_conf, resolve_realm_config, KerberosRealmConfig};
use crate::domain::sparkmagic::{
    assemble_credentials, kinit_user_name, AuthMode, ConnectorSettings, KerberosContext,
    SparkMagicConfig,
};
use crate::infrastructure::aws::{AwsEmrConnector, AwsStsClient, EmrConnector, StsApi};
use crate::infrastructure::constants::{DEFAULT_USER_NAME, KINIT_USER_PLACEHOLDER};
use crate::infrastructure::filesystem::ArtifactWriter;
use crate::infrastructure::network::{resolve_dns_search_domain, resolve_region, DnsSearch};
use crate::shared::error::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One connection request against an EMR cluster.
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    pub cluster_id: String,
    pub role_arn: Option<String>,
    pub user_name: String,
    pub skip_kerberos: bool,
}

impl ConnectRequest {
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            role_arn: None,
            user_name: DEFAULT_USER_NAME.to_string(),
            skip_kerberos: false,
        }
    }
}

/// Everything derived for a connection, before anything is written.
#[derive(Debug, Clone)]
pub struct ConnectionPlan {
    pub cluster_id: String,
    pub cluster_name: String,
    pub region: String,
    pub dns_search: DnsSearch,
    pub primary: PrimaryNode,
    pub settings: ConnectorSettings,
    pub realm_config: Option<KerberosRealmConfig>,
    pub kinit_user: Option<String>,
}

impl ConnectionPlan {
    pub fn is_kerberos(&self) -> bool {
        self.settings.credentials.auth == AuthMode::Kerberos
    }

    pub fn livy_url(&self) -> &str {
        &self.settings.credentials.url
    }

    /// Ordered follow-up actions for the notebook user.
    pub fn next_steps(&self) -> Vec<String> {
        let mut steps = Vec::new();
        if let Some(user) = &self.kinit_user {
            steps.push(format!(
                "Open the image terminal and run 'kinit {}' to get a Kerberos ticket",
                user
            ));
        }
        steps.push(
            "Restart the kernel. This is required so that SparkMagic can pick up the generated configuration"
                .to_string(),
        );
        steps
    }
}

/// Files written when a plan is applied.
#[derive(Debug, Clone, Default)]
pub struct AppliedArtifacts {
    pub sparkmagic_conf: Option<PathBuf>,
    pub krb5_conf: Option<PathBuf>,
}

pub struct EmrConnectionDescriptor {
    sts: Box<dyn StsApi>,
    emr: Box<dyn EmrConnector>,
    conf: ConnectConf,
    region: String,
}

impl EmrConnectionDescriptor {
    /// Build a descriptor backed by the AWS SDK.
    pub async fn new(conf: ConnectConf) -> Self {
        let region = resolve_region(conf.region.as_deref());
        let sts = AwsStsClient::new(&region).await;
        Self::with_clients(Box::new(sts), Box::new(AwsEmrConnector), conf)
    }

    pub fn with_clients(
        sts: Box<dyn StsApi>,
        emr: Box<dyn EmrConnector>,
        conf: ConnectConf,
    ) -> Self {
        let region = resolve_region(conf.region.as_deref());
        Self {
            sts,
            emr,
            conf,
            region,
        }
    }

    pub fn conf(&self) -> &ConnectConf {
        &self.conf
    }

    /// Resolve the cluster into a connection plan. Nothing is written.
    pub async fn resolve(&self, request: &ConnectRequest) -> Result<ConnectionPlan> {
        ConnectionValidator::new()?.validate(
            &request.cluster_id,
            request.role_arn.as_deref(),
            &request.user_name,
        )?;

        let dns_search = resolve_dns_search_domain(&self.region, &self.conf.paths.resolv_conf);
        info!(
            region = %self.region,
            domain_search = %dns_search.domain,
            "Resolved network settings"
        );

        // The role is assumed only once the request is known to be valid
        let credentials = match &request.role_arn {
            Some(arn) => Some(assume_role(self.sts.as_ref(), arn).await?),
            None => None,
        };
        let emr = self.emr.connect(&self.region, credentials).await;

        let topology = ClusterTopology::fetch(emr.as_ref(), &request.cluster_id).await?;
        let primary = PrimaryNode::identify(&topology.cluster, &topology.instances)?;
        info!(
            cluster_id = %request.cluster_id,
            leader = %primary.private_dns_name(),
            "Identified primary node"
        );

        let kerberos_active = topology.cluster.is_kerberos_cluster() && !request.skip_kerberos;
        if topology.cluster.is_kerberos_cluster() && request.skip_kerberos {
            info!("Kerberos is enabled on the cluster but skipped on request");
        }

        let provider = topology
            .security_configuration
            .as_ref()
            .and_then(|sc| sc.kerberos.as_ref());

        let realm_config = match (kerberos_active, topology.cluster.kerberos_realm()) {
            (true, Some(realm)) if topology.security_configuration.is_some() => {
                Some(resolve_realm_config(
                    realm,
                    primary.private_dns_name(),
                    &dns_search.domain,
                    provider,
                ))
            }
            (true, _) => {
                warn!(
                    cluster_id = %request.cluster_id,
                    "Cluster has Kerberos attributes but no security configuration, skipping krb5.conf"
                );
                None
            }
            _ => None,
        };

        let kerberos_context = kerberos_active.then_some(KerberosContext {
            provider,
            dns_search: &dns_search,
            client: &self.conf.kerberos,
        });
        let settings = assemble_credentials(
            primary.private_dns_name(),
            &request.user_name,
            kerberos_context,
        );

        let kinit_user = kerberos_active.then(|| {
            let user = if request.user_name == DEFAULT_USER_NAME {
                KINIT_USER_PLACEHOLDER
            } else {
                request.user_name.as_str()
            };
            kinit_user_name(user, provider)
        });

        Ok(ConnectionPlan {
            cluster_id: topology.cluster.id.clone(),
            cluster_name: topology.cluster.name.clone(),
            region: self.region.clone(),
            dns_search,
            primary,
            settings,
            realm_config,
            kinit_user,
        })
    }

    /// Write the plan's artifacts through `writer`.
    pub fn apply(
        &self,
        plan: &ConnectionPlan,
        writer: &dyn ArtifactWriter,
    ) -> Result<AppliedArtifacts> {
        let paths = &self.conf.paths;

        let mut document = match &paths.base_template {
            Some(template) => SparkMagicConfig::from_template(
                &writer.read_base_template(Path::new(template))?,
            )?,
            None => SparkMagicConfig::default(),
        };
        document.apply(&plan.settings)?;

        let krb5 = plan.realm_config.as_ref().map(render_krb5_conf);

        let mut artifacts = AppliedArtifacts {
            sparkmagic_conf: Some(writer.write_sparkmagic_conf(
                Path::new(&paths.sparkmagic_conf),
                &document.to_json_pretty()?,
            )?),
            krb5_conf: None,
        };
        if let Some(text) = krb5 {
            artifacts.krb5_conf =
                Some(writer.write_krb5_conf(Path::new(&paths.krb5_conf), &text)?);
        }

        Ok(artifacts)
    }
}
