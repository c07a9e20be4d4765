//! Build automation for sm-sparkmagic
//!
//! Usage: cargo xtask <command>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN: &str = "sm-sparkmagic";

const SAMPLE_CONFIG: &str = r#"# sm-sparkmagic configuration
# Every key is optional. -D properties and command line flags override these values.

# region = "us-west-2"
user_name = "livy"

[paths]
sparkmagic_conf = "/etc/sparkmagic/config.json"
krb5_conf = "/etc/krb5.conf"
resolv_conf = "/etc/resolv.conf"
# base_template = "/etc/sparkmagic/base-config.json"

[kerberos]
mutual_authentication = 1
service = "HTTP"
delegate = false
force_preemptive = true
principal = ""
sanitize_mutual_error_response = true
send_cbt = false
"#;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for sm-sparkmagic")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the binary
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run unit and integration tests
    Test {
        /// Run only tests under tests/
        #[arg(long)]
        integration: bool,
    },
    /// Package the release binary with a sample configuration
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
    },
    /// Write a sample configuration file
    SampleConfig {
        #[arg(long, default_value = "sm-sparkmagic.toml")]
        output: PathBuf,
    },
    /// Run fmt check, clippy and tests
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { integration } => test(&sh, integration),
        Commands::Dist { target } => dist(&sh, target),
        Commands::SampleConfig { output } => sample_config(&sh, &output),
        Commands::Ci => ci(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    if release {
        cmd!(sh, "cargo build --release --bin {BIN}").run()?;
        println!("✅ Release build completed: target/release/{}", BIN);
    } else {
        cmd!(sh, "cargo build --bin {BIN}").run()?;
        println!("✅ Debug build completed: target/debug/{}", BIN);
    }
    Ok(())
}

fn test(sh: &Shell, integration: bool) -> Result<()> {
    if integration {
        cmd!(sh, "cargo test -p {BIN} --test '*'").run()?;
    } else {
        cmd!(sh, "cargo test --all").run()?;
    }
    println!("✅ All tests passed");
    Ok(())
}

fn dist(sh: &Shell, target: Option<String>) -> Result<()> {
    let root = project_root()?;
    let release_dir = match &target {
        Some(triple) => {
            cmd!(sh, "cargo build --release --bin {BIN} --target {triple}").run()?;
            root.join("target").join(triple).join("release")
        }
        None => {
            cmd!(sh, "cargo build --release --bin {BIN}").run()?;
            root.join("target").join("release")
        }
    };

    let dist_dir = root.join("dist");
    sh.create_dir(&dist_dir)?;
    sh.copy_file(release_dir.join(BIN), dist_dir.join(BIN))?;
    sh.write_file(dist_dir.join("sm-sparkmagic.toml"), SAMPLE_CONFIG)?;

    let archive_name = format!("{}-{}.tar.gz", BIN, env!("CARGO_PKG_VERSION"));
    cmd!(sh, "tar -czf {archive_name} -C dist {BIN} sm-sparkmagic.toml")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created: {}", archive_name);
    Ok(())
}

fn sample_config(sh: &Shell, output: &Path) -> Result<()> {
    sh.write_file(output, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("✅ Sample configuration written to {}", output.display());
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    cmd!(sh, "cargo clippy --all-targets --all-features -- -D warnings").run()?;
    test(sh, false)?;
    println!("✅ All CI checks passed");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}
