mod config;
mod display;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use subwarden_core::catalogue::{LEADERSHIP_OPTIONS, OPEN_POSITIONS, is_listed_role};
use subwarden_core::{ExtractedProfile, FormState, extract_profile};
use subwarden_intake::{AdminView, SubmissionWorkflow};
use subwarden_store::{JsonFileStore, LocalStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command, check_admin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Submit { form, cv_text } => {
            let form = load_form(&form, cv_text.as_deref())?;
            let local: Arc<dyn LocalStore> = Arc::new(JsonFileStore::open(&cli.local_store));
            let workflow = SubmissionWorkflow::new(cli.remote.record_store()?, local);
            workflow.resume_local_ids().await;
            let submission = workflow.submit(&form).await?;
            display::print_submission(&submission);
        }
        Command::List {
            admin_secret,
            expected_admin_secret,
            json,
        } => {
            check_admin(expected_admin_secret.as_deref(), &admin_secret)?;
            let local: Arc<dyn LocalStore> = Arc::new(JsonFileStore::open(&cli.local_store));
            let dashboard = AdminView::new(cli.remote.record_store()?, local)
                .load()
                .await;
            if json {
                let all = dashboard.into_all();
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                display::print_dashboard(&dashboard);
            }
        }
        Command::Extract { cv_text } => {
            let text = read_text(&cv_text)?;
            let profile = extract_profile(&text);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Roles => {
            println!("Open positions:");
            for position in OPEN_POSITIONS {
                println!("  {position}");
            }
            println!("Leadership roles:");
            for role in LEADERSHIP_OPTIONS {
                println!("  {role}");
            }
        }
    }

    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Parse a form-state file, filling the extracted profile from CV text when
/// the form does not already carry one.
fn load_form(path: &Path, cv_text: Option<&Path>) -> anyhow::Result<FormState> {
    let raw = read_text(path)?;
    let mut form: FormState =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    let unlisted: Vec<_> = form
        .applicant
        .leadership_roles
        .iter()
        .filter(|role| !is_listed_role(role))
        .collect();
    if !unlisted.is_empty() {
        debug!(?unlisted, "form ticks leadership roles outside the catalogue");
    }

    if let Some(cv_path) = cv_text
        && form.extracted == ExtractedProfile::default()
    {
        form.extracted = extract_profile(&read_text(cv_path)?);
        info!(path = %cv_path.display(), "pre-filled profile from CV text");
    }
    Ok(form)
}
