//! Command-line and environment configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use subwarden_sync::{RecordStore, RecordStoreClient, RemoteConfig, UnconfiguredStore};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "subwarden", version, about = "Sub-warden application intake")]
pub struct Cli {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// JSON file used as the local fallback store.
    #[arg(
        long,
        env = "SUBWARDEN_LOCAL_STORE",
        default_value = "applications.json",
        global = true
    )]
    pub local_store: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// Base URL of the record store API.
    #[arg(
        long,
        env = "SUBWARDEN_API_URL",
        default_value = subwarden_sync::DEFAULT_API_URL,
        global = true
    )]
    pub api_url: String,

    #[arg(long, env = "SUBWARDEN_BASE_ID", global = true)]
    pub base_id: Option<String>,

    #[arg(
        long,
        env = "SUBWARDEN_TABLE",
        default_value = subwarden_sync::DEFAULT_TABLE,
        global = true
    )]
    pub table: String,

    #[arg(long, env = "SUBWARDEN_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Per-request timeout for the record store, in seconds.
    #[arg(long, env = "SUBWARDEN_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit an application from a JSON form-state file.
    Submit {
        /// Form state as produced by the application form.
        form: PathBuf,
        /// Plain text of the CV; pre-fills the extracted profile when the form has none.
        #[arg(long)]
        cv_text: Option<PathBuf>,
    },
    /// List submitted applications from both stores.
    List {
        /// Must match the configured SUBWARDEN_ADMIN_SECRET.
        #[arg(long)]
        admin_secret: String,
        #[arg(
            long = "expected-admin-secret",
            env = "SUBWARDEN_ADMIN_SECRET",
            hide = true,
            hide_env_values = true
        )]
        expected_admin_secret: Option<String>,
        /// Print a JSON array instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Extract a profile from CV text and print it as JSON.
    Extract { cv_text: PathBuf },
    /// Show the leadership roles and positions offered by the form.
    Roles,
}

impl RemoteArgs {
    /// Build the record store client, or a store that always fails when
    /// credentials are missing so submissions go to the local store.
    pub fn record_store(&self) -> anyhow::Result<Arc<dyn RecordStore>> {
        let (Some(base_id), Some(token)) = (&self.base_id, &self.api_token) else {
            warn!("record store credentials not set; applications will be saved locally only");
            return Ok(Arc::new(UnconfiguredStore));
        };
        let config = RemoteConfig::new(base_id, token)
            .with_api_url(&self.api_url)
            .with_table(&self.table)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        let client = RecordStoreClient::new(config).context("configuring record store client")?;
        Ok(Arc::new(client))
    }
}

/// Shared-secret gate for the admin listing. Not an access-control boundary.
pub fn check_admin(configured: Option<&str>, given: &str) -> anyhow::Result<()> {
    match configured {
        None | Some("") => bail!("admin listing is disabled; set SUBWARDEN_ADMIN_SECRET"),
        Some(secret) if secret == given => Ok(()),
        Some(_) => bail!("incorrect admin secret"),
    }
}
