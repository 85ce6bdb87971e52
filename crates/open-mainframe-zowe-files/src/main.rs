//! `zowe-files` — command-line access to the z/OSMF Files REST API.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use open_mainframe_zowe_core::{Protocol, Result, ZosmfProfile};
use open_mainframe_zowe_files::{AllocationOptions, Files};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "open_mainframe_zowe_files=info,open_mainframe_zowe_core=info,warn";

/// z/OSMF Files CLI.
#[derive(Parser, Debug)]
#[command(name = "zowe-files", version, about = "Datasets and USS files over the z/OSMF REST API")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection overrides, applied after the profile file and `ZOWE_OPT_*` variables.
#[derive(Args, Debug)]
struct ConnectionArgs {
    /// TOML profile file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// z/OSMF host.
    #[arg(long, global = true)]
    host: Option<String>,

    /// z/OSMF port.
    #[arg(long, global = true)]
    port: Option<u16>,

    /// User ID.
    #[arg(long, global = true)]
    user: Option<String>,

    /// Password.
    #[arg(long, global = true)]
    password: Option<String>,

    /// `http` or `https`.
    #[arg(long, global = true)]
    protocol: Option<String>,

    /// Reject untrusted TLS certificates (`true`/`false`).
    #[arg(long, global = true)]
    reject_unauthorized: Option<bool>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List USS files under a path.
    ListFiles { path: String },
    /// Show the content of a USS file.
    ViewFile { path: String },
    /// List datasets matching a pattern.
    ListDs { pattern: String },
    /// List the members of a PDS/PDSE.
    ListMembers { dataset: String },
    /// Show the content of a dataset or member.
    ViewDs { dataset: String },
    /// Replace the content of a dataset.
    WriteDs {
        dataset: String,
        /// Text to write.
        #[arg(long)]
        data: String,
    },
    /// Save a dataset to a local file.
    DownloadDs { dataset: String, output: PathBuf },
    /// Write a local file into a dataset.
    UploadDs { input: PathBuf, dataset: String },
    /// Delete a dataset.
    DeleteDs {
        dataset: String,
        /// Volume serial the dataset lives on.
        #[arg(long)]
        volume: Option<String>,
    },
    /// Allocate a dataset.
    AllocateDs(AllocateArgs),
}

#[derive(Args, Debug)]
struct AllocateArgs {
    /// Dataset name.
    dataset: String,
    /// Send only the options given on the command line.
    #[arg(long)]
    no_defaults: bool,
    #[arg(long)]
    volser: Option<String>,
    #[arg(long)]
    unit: Option<String>,
    #[arg(long)]
    dsorg: Option<String>,
    #[arg(long)]
    alcunit: Option<String>,
    #[arg(long)]
    primary: Option<u32>,
    #[arg(long)]
    secondary: Option<u32>,
    #[arg(long)]
    dirblk: Option<u32>,
    #[arg(long)]
    avgblk: Option<u32>,
    #[arg(long)]
    recfm: Option<String>,
    #[arg(long)]
    blksize: Option<u32>,
    #[arg(long)]
    lrecl: Option<u32>,
    #[arg(long)]
    storclass: Option<String>,
    #[arg(long)]
    mgntclass: Option<String>,
    #[arg(long)]
    dataclass: Option<String>,
    #[arg(long)]
    dsntype: Option<String>,
    /// Model dataset.
    #[arg(long)]
    like: Option<String>,
}

impl AllocateArgs {
    fn to_options(&self) -> AllocationOptions {
        let mut options = if self.no_defaults {
            AllocationOptions::empty()
        } else {
            AllocationOptions::default()
        };

        let text = [
            (&mut options.volser, &self.volser),
            (&mut options.unit, &self.unit),
            (&mut options.dsorg, &self.dsorg),
            (&mut options.alcunit, &self.alcunit),
            (&mut options.recfm, &self.recfm),
            (&mut options.storclass, &self.storclass),
            (&mut options.mgntclass, &self.mgntclass),
            (&mut options.dataclass, &self.dataclass),
            (&mut options.dsntype, &self.dsntype),
            (&mut options.like, &self.like),
        ];
        for (field, value) in text {
            if value.is_some() {
                *field = value.clone();
            }
        }

        let numeric = [
            (&mut options.primary, self.primary),
            (&mut options.secondary, self.secondary),
            (&mut options.dirblk, self.dirblk),
            (&mut options.avgblk, self.avgblk),
            (&mut options.blksize, self.blksize),
            (&mut options.lrecl, self.lrecl),
        ];
        for (field, value) in numeric {
            if value.is_some() {
                *field = value;
            }
        }

        options
    }
}

impl ConnectionArgs {
    /// Profile file, then environment, then flags.
    fn resolve_profile(&self) -> Result<ZosmfProfile> {
        let mut profile = match self.config {
            Some(ref path) => ZosmfProfile::from_file(path)?,
            None => ZosmfProfile::default(),
        };
        profile.apply_env_overrides()?;

        if let Some(ref host) = self.host {
            profile.host = host.clone();
        }
        if let Some(port) = self.port {
            profile.port = Some(port);
        }
        if let Some(ref user) = self.user {
            profile.user = user.clone();
        }
        if let Some(ref password) = self.password {
            profile.password = password.clone();
        }
        if let Some(ref protocol) = self.protocol {
            profile.protocol = protocol.parse::<Protocol>()?;
        }
        if let Some(flag) = self.reject_unauthorized {
            profile.reject_unauthorized = flag;
        }
        Ok(profile)
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let profile = cli.connection.resolve_profile()?;
    tracing::debug!(profile = ?profile, "Resolved z/OSMF profile");
    let files = Files::from_profile(&profile)?;

    match cli.command {
        Commands::ListFiles { path } => print_json(&files.list_files(&path).await?),
        Commands::ViewFile { path } => print_json(&files.get_file_content(&path).await?),
        Commands::ListDs { pattern } => print_json(&files.list_dsn(&pattern).await?),
        Commands::ListMembers { dataset } => {
            let members = files.list_dsn_members(&dataset).await?;
            print_json(&serde_json::to_value(members)?)
        }
        Commands::ViewDs { dataset } => print_json(&files.get_dsn_content(&dataset).await?),
        Commands::WriteDs { dataset, data } => {
            print_json(&files.write_to_dsn(&dataset, &data).await?)
        }
        Commands::DownloadDs { dataset, output } => files.download_dsn(&dataset, &output).await,
        Commands::UploadDs { input, dataset } => {
            print_json(&files.upload_file_to_dsn(&input, &dataset).await?)
        }
        Commands::DeleteDs { dataset, volume } => {
            print_json(&files.delete_dsn(&dataset, volume.as_deref()).await?)
        }
        Commands::AllocateDs(args) => {
            let options = args.to_options();
            print_json(&files.allocate_dsn(&args.dataset, &options).await?)
        }
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allocate_defaults() {
        let cli = Cli::try_parse_from([
            "zowe-files",
            "--host",
            "lpar1",
            "allocate-ds",
            "TEST.DATASET",
            "--primary",
            "10",
            "--recfm",
            "VB",
        ])
        .unwrap();
        let Commands::AllocateDs(args) = cli.command else {
            panic!("expected allocate-ds");
        };
        let options = args.to_options();
        assert_eq!(options.primary, Some(10));
        assert_eq!(options.recfm.as_deref(), Some("VB"));
        assert_eq!(options.dsorg.as_deref(), Some("PS"));
        assert_eq!(options.lrecl, Some(80));
    }

    #[test]
    fn test_parse_allocate_without_defaults() {
        let cli = Cli::try_parse_from([
            "zowe-files",
            "allocate-ds",
            "TEST.PDS",
            "--no-defaults",
            "--dsorg",
            "PO",
            "--dirblk",
            "5",
        ])
        .unwrap();
        let Commands::AllocateDs(args) = cli.command else {
            panic!("expected allocate-ds");
        };
        assert_eq!(
            args.to_options(),
            AllocationOptions::empty().dsorg("PO").dirblk(5)
        );
    }

    #[test]
    fn test_connection_flags_override_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zosmf.toml");
        std::fs::write(&path, "host = \"lpar1\"\nuser = \"IBMUSER\"\nport = 443\n").unwrap();

        let cli = Cli::try_parse_from([
            "zowe-files",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "10443",
            "--protocol",
            "http",
            "list-ds",
            "IBMUSER.*",
        ])
        .unwrap();
        let profile = cli.connection.resolve_profile().unwrap();
        // Environment variables could override the file; flags always win.
        assert_eq!(profile.port, Some(10443));
        assert_eq!(profile.protocol, Protocol::Http);
        assert!(matches!(cli.command, Commands::ListDs { ref pattern } if pattern == "IBMUSER.*"));
    }

    #[test]
    fn test_default_log_filter() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert!(DEFAULT_LOG_FILTER.contains("open_mainframe_zowe_files=info"));
        assert!(DEFAULT_LOG_FILTER.contains("open_mainframe_zowe_core=info"));
    }

    #[test]
    fn test_parse_delete_with_volume() {
        let cli = Cli::try_parse_from(["zowe-files", "delete-ds", "IBMUSER.OLD", "--volume", "WORK01"])
            .unwrap();
        match cli.command {
            Commands::DeleteDs { dataset, volume } => {
                assert_eq!(dataset, "IBMUSER.OLD");
                assert_eq!(volume.as_deref(), Some("WORK01"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
