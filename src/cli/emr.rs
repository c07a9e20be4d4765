//! EMR connection commands

use crate::cli::display::TableRenderer;
use crate::domain::cluster::{ConnectRequest, EmrConnectionDescriptor};
use crate::domain::config::{apply_to_connect_conf, parse_dynamic_configs, ConnectConf};
use crate::infrastructure::constants::CONF_FILE_ENV;
use crate::infrastructure::FileArtifactWriter;
use clap::Parser;
use colored::Colorize;
use tracing::info;

#[derive(Parser, Debug, Clone)]
pub struct ConnectCommand {
    /// EMR cluster id, e.g. j-3DD9ZR01DAU14
    #[arg(long, short = 'c')]
    pub cluster_id: String,

    /// User submitting Livy sessions. Defaults to `user_name` from the config file, then "livy"
    #[arg(long, short = 'u')]
    pub user_name: Option<String>,

    /// IAM role to assume for cross-account access to the cluster
    #[arg(long)]
    pub role_arn: Option<String>,

    /// AWS region of the cluster. Falls back to the config file, then AWS_REGION, then us-west-2
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Connect without Kerberos even when the cluster has it enabled
    #[arg(long)]
    pub skip_kerberos: bool,

    /// Resolve and print the connection, but do not write any file
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the tool configuration file (TOML)
    /// If not provided, reads SM_SPARKMAGIC_CONF environment variable when set
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Dynamic configuration properties to override any settings (-D key=value)
    ///
    /// General: region, user-name
    /// Paths: paths.sparkmagic-conf, paths.krb5-conf, paths.resolv-conf, paths.base-template
    /// Kerberos: kerberos.service, kerberos.principal, kerberos.mutual-authentication,
    ///           kerberos.delegate, kerberos.force-preemptive, kerberos.send-cbt
    ///
    /// Example: -Dpaths.krb5-conf=/tmp/krb5.conf -Dkerberos.delegate=true
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DescribeCommand {
    /// EMR cluster id, e.g. j-3DD9ZR01DAU14
    #[arg(long, short = 'c')]
    pub cluster_id: String,

    /// User submitting Livy sessions. Defaults to `user_name` from the config file, then "livy"
    #[arg(long, short = 'u')]
    pub user_name: Option<String>,

    /// IAM role to assume for cross-account access to the cluster
    #[arg(long)]
    pub role_arn: Option<String>,

    /// AWS region of the cluster. Falls back to the config file, then AWS_REGION, then us-west-2
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Describe the connection as if Kerberos were disabled on the cluster
    #[arg(long)]
    pub skip_kerberos: bool,

    /// Path to the tool configuration file (TOML)
    /// If not provided, reads SM_SPARKMAGIC_CONF environment variable when set
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Dynamic configuration properties to override any settings (-D key=value),
    /// same keys as `connect`
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

/// Build the effective configuration.
/// Priority: command line > -D properties > config file > environment > defaults
pub fn load_connect_conf(
    config_file: Option<&str>,
    properties: &[String],
    region: Option<&str>,
) -> anyhow::Result<ConnectConf> {
    let mut conf = if let Some(path) = config_file {
        ConnectConf::from(path)?
    } else if let Ok(env_path) = std::env::var(CONF_FILE_ENV) {
        ConnectConf::from(&env_path)?
    } else {
        info!("No configuration file specified, using default settings");
        ConnectConf::default()
    };

    if !properties.is_empty() {
        let dynamic_configs = parse_dynamic_configs(properties)
            .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
        apply_to_connect_conf(&dynamic_configs, &mut conf);
    }

    if let Some(region) = region {
        conf.region = Some(region.to_string());
    }

    Ok(conf)
}

fn build_request(
    cluster_id: &str,
    user_name: Option<&str>,
    role_arn: Option<&str>,
    skip_kerberos: bool,
    conf: &ConnectConf,
) -> ConnectRequest {
    ConnectRequest {
        cluster_id: cluster_id.to_string(),
        role_arn: role_arn.map(str::to_string),
        user_name: user_name.unwrap_or(conf.user_name.as_str()).to_string(),
        skip_kerberos,
    }
}

impl ConnectCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let conf = load_connect_conf(
            self.config_file.as_deref(),
            &self.properties,
            self.region.as_deref(),
        )?;
        let request = build_request(
            &self.cluster_id,
            self.user_name.as_deref(),
            self.role_arn.as_deref(),
            self.skip_kerberos,
            &conf,
        );

        let descriptor = EmrConnectionDescriptor::new(conf).await;

        let plan = descriptor
            .resolve(&request)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to resolve cluster {}: {}", self.cluster_id, e))?;

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_connection_plan(&plan));

        if self.dry_run {
            println!("{}", "Dry run, no files were written".bright_black());
            return Ok(());
        }

        let artifacts = descriptor
            .apply(&plan, &FileArtifactWriter::new())
            .map_err(|e| anyhow::anyhow!("Failed to write connection configuration: {}", e))?;

        print!("{}", renderer.render_artifacts(&artifacts));
        println!();
        print!("{}", renderer.render_next_steps(&plan.next_steps()));
        Ok(())
    }
}

impl DescribeCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let conf = load_connect_conf(
            self.config_file.as_deref(),
            &self.properties,
            self.region.as_deref(),
        )?;
        let request = build_request(
            &self.cluster_id,
            self.user_name.as_deref(),
            self.role_arn.as_deref(),
            self.skip_kerberos,
            &conf,
        );

        let descriptor = EmrConnectionDescriptor::new(conf).await;

        let plan = descriptor
            .resolve(&request)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to describe cluster {}: {}", self.cluster_id, e))?;

        println!("{}", TableRenderer::new().render_connection_plan(&plan));
        Ok(())
    }
}
