//! Tenant limits report
//!
//! Prints a tenant's current usage against its effective plan limits as JSON.
//!
//! Usage:
//!   limits-report <tenant-uuid>
//!
//! Environment:
//!   DATABASE_URL               Postgres connection string (required)
//!   DATABASE_MAX_CONNECTIONS   Pool size (default 3)
//!   LOG_FORMAT                 `pretty` or `json` (default pretty)
//!   RUST_LOG                   Log filter (default info)

mod config;

use std::env;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use workforce_gating::FeatureGateService;
use workforce_shared::{
    db::create_pool,
    error::{WorkforceError, WorkforceResult},
    types::TenantId,
};

use crate::config::{Config, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    let tenant_id = parse_tenant_arg(env::args().nth(1))?;

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;

    let gate = FeatureGateService::with_pool(pool);
    let ctx = gate.load_context(tenant_id).await?;
    let summary = gate.usage_summary(&ctx).await?;

    for usage in summary.blocked() {
        tracing::warn!(
            tenant_id = %tenant_id,
            resource = %usage.resource,
            current = usage.current,
            limit = ?usage.limit,
            "Tenant is at its limit"
        );
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays valid JSON
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn parse_tenant_arg(arg: Option<String>) -> WorkforceResult<TenantId> {
    let arg = arg.ok_or_else(|| {
        WorkforceError::Validation("usage: limits-report <tenant-uuid>".to_string())
    })?;
    arg.parse().map_err(WorkforceError::Validation)
}
