// CLI command definitions

use super::emr::{ConnectCommand, DescribeCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sm-sparkmagic",
    version,
    about = "Connect SparkMagic notebooks to EMR clusters",
    long_about = "Discovers an EMR cluster's leader node and Kerberos setup, then writes the \
                  SparkMagic and krb5 configuration needed to reach its Livy endpoint"
)]
pub struct CliArgs {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Write SparkMagic (and krb5) configuration for an EMR cluster
    Connect(ConnectCommand),

    /// Show how a cluster would be connected, without writing anything
    Describe(DescribeCommand),
}
