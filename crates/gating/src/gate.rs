//! Feature Gate Service
//!
//! Answers two questions for a tenant:
//!
//! 1. What is the effective limit for a given key? (`effective_limit`)
//! 2. Is current usage of a resource still below that limit? (`is_within_*_limit`)
//!
//! The tenant is always passed in explicitly as a [`TenantContext`]. Checks
//! are read-only and best-effort: a check followed by an insert elsewhere is
//! not atomic, so two concurrent requests can both pass at `limit - 1`.

use std::sync::Arc;

use sqlx::PgPool;
use time::OffsetDateTime;
use workforce_shared::types::{EmploymentStatus, LimitKey, TenantContext, TenantId, TenantRole};

use crate::{
    error::{GatingError, GatingResult},
    limits::{self, Resource},
    store::{PgTenantStore, TenantStore},
    usage::{ResourceUsage, UsageSummary},
};

/// Plan-based usage limit checks
#[derive(Clone)]
pub struct FeatureGateService {
    store: Arc<dyn TenantStore>,
}

impl FeatureGateService {
    pub fn new(store: Arc<dyn TenantStore>) -> Self {
        Self { store }
    }

    /// Service backed by the Postgres tenant store
    pub fn with_pool(pool: PgPool) -> Self {
        Self::new(Arc::new(PgTenantStore::new(pool)))
    }

    /// Resolve the plan and add-ons for a tenant
    ///
    /// Unknown tenants and tenants without a plan both come back without a
    /// plan, which leaves every limit unenforced.
    pub async fn load_context(&self, tenant_id: TenantId) -> GatingResult<TenantContext> {
        let plan = self.store.find_plan(tenant_id).await?;
        let addons = self.store.list_addons(tenant_id).await?;

        if plan.is_none() {
            tracing::debug!(tenant_id = %tenant_id, "Tenant has no plan, limits not enforced");
        }

        Ok(TenantContext::new(tenant_id, plan, addons))
    }

    /// Effective limit for `key`: `None` if not enforced, `-1` if unlimited
    pub fn effective_limit(&self, ctx: &TenantContext, key: LimitKey) -> Option<i64> {
        limits::effective_limit(ctx.plan.as_ref(), &ctx.addons, key)
    }

    /// Count live usage of a resource for the tenant
    pub async fn current_usage(&self, ctx: &TenantContext, resource: Resource) -> GatingResult<i64> {
        let tenant_id = ctx.tenant_id;
        match resource {
            Resource::Employees => {
                self.store
                    .count_employees(tenant_id, EmploymentStatus::COUNTED)
                    .await
            }
            Resource::BiometricDevices => self.store.count_biometric_devices(tenant_id).await,
            Resource::Kiosks => self.store.count_kiosks(tenant_id).await,
            Resource::AdminUsers => {
                self.store
                    .count_memberships(tenant_id, TenantRole::ELEVATED)
                    .await
            }
        }
    }

    /// Whether one more `resource` can be added without reaching the limit
    ///
    /// Usage is only counted when the limit is actually enforced.
    pub async fn is_within_limit(&self, ctx: &TenantContext, resource: Resource) -> GatingResult<bool> {
        let limit = self.effective_limit(ctx, resource.limit_key());
        if !limits::is_enforced(limit) {
            return Ok(true);
        }

        let current = self.current_usage(ctx, resource).await?;
        let within = limits::is_within(limit, current);

        tracing::debug!(
            tenant_id = %ctx.tenant_id,
            resource = %resource,
            current,
            limit = ?limit,
            within,
            "Evaluated usage limit"
        );

        Ok(within)
    }

    pub async fn is_within_employee_limit(&self, ctx: &TenantContext) -> GatingResult<bool> {
        self.is_within_limit(ctx, Resource::Employees).await
    }

    pub async fn is_within_device_limit(&self, ctx: &TenantContext) -> GatingResult<bool> {
        self.is_within_limit(ctx, Resource::BiometricDevices).await
    }

    pub async fn is_within_kiosk_limit(&self, ctx: &TenantContext) -> GatingResult<bool> {
        self.is_within_limit(ctx, Resource::Kiosks).await
    }

    /// Admin seat check: counts Admin, HR manager, HR staff and HR consultant roles
    pub async fn is_within_user_limit(&self, ctx: &TenantContext) -> GatingResult<bool> {
        self.is_within_limit(ctx, Resource::AdminUsers).await
    }

    /// Like [`is_within_limit`](Self::is_within_limit), but returns
    /// `GatingError::LimitReached` when blocked so call sites can use `?`
    pub async fn ensure_within_limit(&self, ctx: &TenantContext, resource: Resource) -> GatingResult<()> {
        let limit = match self.effective_limit(ctx, resource.limit_key()) {
            Some(limit) if limits::is_enforced(Some(limit)) => limit,
            _ => return Ok(()),
        };

        let current = self.current_usage(ctx, resource).await?;
        if limits::is_within(Some(limit), current) {
            return Ok(());
        }

        tracing::info!(
            tenant_id = %ctx.tenant_id,
            plan = ?ctx.plan_slug(),
            resource = %resource,
            current,
            limit,
            "Usage limit reached"
        );

        Err(GatingError::LimitReached {
            resource,
            current,
            limit,
        })
    }

    /// Current usage and effective limits for every tracked resource
    pub async fn usage_summary(&self, ctx: &TenantContext) -> GatingResult<UsageSummary> {
        let mut resources = Vec::with_capacity(Resource::all().len());
        for resource in Resource::all() {
            let current = self.current_usage(ctx, resource).await?;
            let limit = self.effective_limit(ctx, resource.limit_key());
            resources.push(ResourceUsage::evaluate(resource, current, limit));
        }

        Ok(UsageSummary {
            tenant_id: ctx.tenant_id,
            plan: ctx.plan_slug().map(str::to_string),
            resources,
            computed_at: OffsetDateTime::now_utc(),
        })
    }
}
