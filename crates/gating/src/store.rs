//! Tenant data access for the feature gate
//!
//! The gate only ever reads. Every query is scoped by `tenant_id`; nothing
//! here counts rows across tenants. Status and role columns are compared
//! lowercased, matching the case-insensitive parsers in `workforce_shared`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;
use workforce_shared::types::{
    AddonStatus, AddonType, EmploymentStatus, Plan, PlanId, PlanLimits, TenantAddon, TenantId,
    TenantRole,
};

use crate::error::GatingResult;

/// Read access to one tenant's plan, add-ons and usage rows
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// The plan currently assigned to the tenant, if any
    async fn find_plan(&self, tenant_id: TenantId) -> GatingResult<Option<Plan>>;

    /// All add-ons attached to the tenant, in every lifecycle state
    async fn list_addons(&self, tenant_id: TenantId) -> GatingResult<Vec<TenantAddon>>;

    /// Employees whose employment status is one of `statuses`
    async fn count_employees(
        &self,
        tenant_id: TenantId,
        statuses: &[EmploymentStatus],
    ) -> GatingResult<i64>;

    async fn count_biometric_devices(&self, tenant_id: TenantId) -> GatingResult<i64>;

    async fn count_kiosks(&self, tenant_id: TenantId) -> GatingResult<i64>;

    /// Tenant memberships whose role is one of `roles`
    async fn count_memberships(&self, tenant_id: TenantId, roles: &[TenantRole])
        -> GatingResult<i64>;
}

/// Postgres-backed tenant store
#[derive(Clone)]
pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn find_plan(&self, tenant_id: TenantId) -> GatingResult<Option<Plan>> {
        let row: Option<(Uuid, String, String, Json<BTreeMap<String, serde_json::Value>>)> =
            sqlx::query_as(
                r#"
                SELECT p.id, p.slug, p.name, p.limits
                FROM tenants t
                JOIN plans p ON p.id = t.plan_id
                WHERE t.id = $1
                "#,
            )
            .bind(tenant_id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id, slug, name, Json(raw_limits))| Plan {
            id: PlanId(id),
            limits: parse_limits(&slug, raw_limits),
            slug,
            name,
        }))
    }

    async fn list_addons(&self, tenant_id: TenantId) -> GatingResult<Vec<TenantAddon>> {
        let rows: Vec<(String, i32, Option<i32>, String)> = sqlx::query_as(
            r#"
            SELECT addon_type, COALESCE(quantity, 1), units_per_quantity, status
            FROM tenant_addons
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id.0)
        .fetch_all(&self.pool)
        .await?;

        let mut addons = Vec::with_capacity(rows.len());
        for (addon_type, quantity, units_per_quantity, status) in rows {
            let Ok(addon_type) = addon_type.parse::<AddonType>() else {
                tracing::warn!(
                    tenant_id = %tenant_id,
                    addon_type = %addon_type,
                    "Skipping add-on with unknown type"
                );
                continue;
            };
            let Ok(status) = status.parse::<AddonStatus>() else {
                tracing::warn!(
                    tenant_id = %tenant_id,
                    addon_type = %addon_type,
                    status = %status,
                    "Skipping add-on with unknown status"
                );
                continue;
            };

            addons.push(TenantAddon {
                addon_type,
                quantity: u32::try_from(quantity).unwrap_or(0),
                units_per_quantity: units_per_quantity
                    .map(|units| u32::try_from(units).unwrap_or(0))
                    .unwrap_or_else(|| addon_type.default_units_per_quantity()),
                status,
            });
        }

        Ok(addons)
    }

    async fn count_employees(
        &self,
        tenant_id: TenantId,
        statuses: &[EmploymentStatus],
    ) -> GatingResult<i64> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM employees
            WHERE tenant_id = $1 AND lower(employment_status) = ANY($2)
            "#,
        )
        .bind(tenant_id.0)
        .bind(&statuses)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_biometric_devices(&self, tenant_id: TenantId) -> GatingResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM biometric_devices WHERE tenant_id = $1")
                .bind(tenant_id.0)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_kiosks(&self, tenant_id: TenantId) -> GatingResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kiosks WHERE tenant_id = $1")
            .bind(tenant_id.0)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_memberships(
        &self,
        tenant_id: TenantId,
        roles: &[TenantRole],
    ) -> GatingResult<i64> {
        let roles: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();

        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM tenant_users
            WHERE tenant_id = $1 AND lower(role) = ANY($2)
            "#,
        )
        .bind(tenant_id.0)
        .bind(&roles)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Keep integer limits, drop anything else with a warning
fn parse_limits(plan_slug: &str, raw: BTreeMap<String, serde_json::Value>) -> PlanLimits {
    let mut limits = BTreeMap::new();
    for (key, value) in raw {
        match value.as_i64() {
            Some(limit) => {
                limits.insert(key, limit);
            }
            None => {
                tracing::warn!(
                    plan = %plan_slug,
                    limit_key = %key,
                    value = %value,
                    "Ignoring non-integer plan limit"
                );
            }
        }
    }
    PlanLimits(limits)
}
