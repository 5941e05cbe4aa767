//! mfa-report - Entra ID MFA registration report
//!
//! Signs in with the local Azure CLI session, pulls the authentication
//! method registration report and per-user account details, joins them
//! by user id and writes one spreadsheet row per registered account.

mod api;
mod auth;
mod config;
mod error;
mod export;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{DEFAULT_CONCURRENCY, GraphClient, HttpConfig};
use crate::auth::{AAD_GRAPH_RESOURCE, AzureAuthenticator, GRAPH_RESOURCE};
use crate::config::Config;
use crate::export::ExportFormat;

/// Picked up from the working directory when no CA certificate is configured
const DEFAULT_CA_CERTIFICATE: &str = "certificate.pem";
const DEFAULT_TIMEOUT_SECS: u64 = 50;
const DEFAULT_API_VERSION: &str = "beta";

/// mfa-report - MFA registration report for an Entra ID tenant
#[derive(Parser, Debug, Default)]
#[command(name = "mfa-report")]
#[command(about = "Export MFA registration state and sign-in details of every enabled account")]
#[command(version)]
struct Args {
    /// Directory the report file is written to
    #[arg(short, long, env = "MFA_REPORT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Output file format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Tenant domain column value (default: the tenant's default verified domain)
    #[arg(long, env = "MFA_REPORT_TENANT_DOMAIN")]
    tenant_domain: Option<String>,

    /// Extra PEM root certificate to trust (default: ./certificate.pem if present)
    #[arg(long, env = "MFA_REPORT_CA_CERT")]
    ca_cert: Option<PathBuf>,

    /// Maximum concurrent user detail requests
    #[arg(long)]
    concurrency: Option<usize>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Directory API version used for the report and user endpoints
    #[arg(long)]
    api_version: Option<String>,
}

/// Effective run settings after merging CLI, config file and defaults
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    output_dir: PathBuf,
    format: ExportFormat,
    tenant_domain: Option<String>,
    ca_certificate: Option<PathBuf>,
    concurrency: usize,
    timeout: Duration,
    api_version: String,
}

impl Settings {
    fn resolve(args: Args, config: Config, working_dir: &Path) -> Self {
        let ca_certificate = args.ca_cert.or(config.ca_certificate).or_else(|| {
            let candidate = working_dir.join(DEFAULT_CA_CERTIFICATE);
            candidate.is_file().then_some(candidate)
        });

        Self {
            output_dir: args
                .output_dir
                .or(config.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            format: args.format.or(config.format).unwrap_or_default(),
            tenant_domain: args.tenant_domain.or(config.tenant_domain),
            ca_certificate,
            concurrency: args
                .concurrency
                .or(config.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY)
                .max(1),
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(config.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            api_version: args
                .api_version
                .or(config.api_version)
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        }
    }

    fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: self.timeout,
            ca_certificate: self.ca_certificate.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default info level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let settings = Settings::resolve(args, config, Path::new("."));
    let started_at = Local::now();

    tracing::info!("Authenticating using Azure CLI ...");
    let authenticator = AzureAuthenticator::new()
        .context("Failed to create Azure authenticator")?;
    let graph_token = authenticator.get_token_for_resource(GRAPH_RESOURCE).await?;
    let aad_graph_token = authenticator.get_token_for_resource(AAD_GRAPH_RESOURCE).await?;

    let http = settings.http_config();
    let graph = GraphClient::new(GRAPH_RESOURCE, graph_token, &http)
        .context("Failed to create Microsoft Graph client")?;
    let aad_graph = GraphClient::new(AAD_GRAPH_RESOURCE, aad_graph_token, &http)
        .context("Failed to create AAD Graph client")?;

    let tenant = graph
        .get_organization()
        .await
        .context("Failed to retrieve tenant details")?;
    tracing::info!("Tenant ID: {}", tenant.id);
    tracing::info!("Tenant Name: {}", tenant.get_display_name());

    let tenant_domain = settings
        .tenant_domain
        .clone()
        .or_else(|| tenant.default_domain().map(str::to_string))
        .unwrap_or_else(|| "N/A".to_string());

    tracing::info!("Retrieving user authentication registration report ...");
    let registrations = aad_graph
        .get_auth_method_registrations(&settings.api_version)
        .await
        .with_context(|| {
            format!(
                "Failed to retrieve registration report from {}",
                aad_graph.base_url()
            )
        })?;
    let mfa_registered = registrations
        .iter()
        .filter(|r| r.is_mfa_registered.unwrap_or(false))
        .count();
    tracing::info!(
        "Retrieved {} user authentication registration records ({} registered for MFA)",
        registrations.len(),
        mfa_registered
    );

    tracing::info!("Retrieving user details ...");
    let user_ids: Vec<String> = registrations
        .iter()
        .filter_map(|r| r.user_id.as_deref().map(str::trim))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    let details = graph
        .get_user_details(&user_ids, &settings.api_version, settings.concurrency)
        .await;
    tracing::info!("Retrieved {} user details records", details.len());

    let report = report::merge(&registrations, &details, &tenant_domain);
    if !report.warnings.is_empty() {
        tracing::warn!(
            "{} record(s) had missing or malformed data, see warnings above",
            report.warnings.len()
        );
    }

    let filename =
        export::report_filename(tenant.get_display_name(), &started_at, settings.format);
    let path = settings.output_dir.join(filename);
    tracing::info!("Generating report file {} ...", path.display());
    let written = export::export_report(&report.rows, settings.format, &path)?;
    tracing::info!("Wrote {} rows to {}", report.rows.len(), written);

    Ok(())
}
