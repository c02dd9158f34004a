//! In-memory tenant store for gate tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use workforce_gating::{FeatureGateService, GatingError, GatingResult, TenantStore};
use workforce_shared::types::{
    EmploymentStatus, LimitKey, Plan, PlanId, PlanLimits, TenantAddon, TenantId, TenantRole,
};

#[derive(Debug, Default, Clone)]
struct TenantRows {
    plan: Option<Plan>,
    addons: Vec<TenantAddon>,
    employees: Vec<EmploymentStatus>,
    devices: i64,
    kiosks: i64,
    memberships: Vec<TenantRole>,
}

/// Tenant rows kept in memory, partitioned by tenant id
#[derive(Debug, Default)]
pub struct MemoryStore {
    tenants: RwLock<HashMap<TenantId, TenantRows>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_tenant(&self, tenant_id: TenantId, f: impl FnOnce(&mut TenantRows)) {
        let mut tenants = self.tenants.write().unwrap();
        f(tenants.entry(tenant_id).or_default());
    }

    pub fn assign_plan(&self, tenant_id: TenantId, plan: Plan) {
        self.with_tenant(tenant_id, |rows| rows.plan = Some(plan));
    }

    pub fn add_addon(&self, tenant_id: TenantId, addon: TenantAddon) {
        self.with_tenant(tenant_id, |rows| rows.addons.push(addon));
    }

    pub fn add_employees(&self, tenant_id: TenantId, status: EmploymentStatus, count: usize) {
        self.with_tenant(tenant_id, |rows| {
            rows.employees.extend(std::iter::repeat(status).take(count))
        });
    }

    pub fn add_devices(&self, tenant_id: TenantId, count: i64) {
        self.with_tenant(tenant_id, |rows| rows.devices += count);
    }

    pub fn add_kiosks(&self, tenant_id: TenantId, count: i64) {
        self.with_tenant(tenant_id, |rows| rows.kiosks += count);
    }

    pub fn add_members(&self, tenant_id: TenantId, role: TenantRole, count: usize) {
        self.with_tenant(tenant_id, |rows| {
            rows.memberships.extend(std::iter::repeat(role).take(count))
        });
    }

    fn rows(&self, tenant_id: TenantId) -> TenantRows {
        self.tenants
            .read()
            .unwrap()
            .get(&tenant_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TenantStore for MemoryStore {
    async fn find_plan(&self, tenant_id: TenantId) -> GatingResult<Option<Plan>> {
        Ok(self.rows(tenant_id).plan)
    }

    async fn list_addons(&self, tenant_id: TenantId) -> GatingResult<Vec<TenantAddon>> {
        Ok(self.rows(tenant_id).addons)
    }

    async fn count_employees(
        &self,
        tenant_id: TenantId,
        statuses: &[EmploymentStatus],
    ) -> GatingResult<i64> {
        let rows = self.rows(tenant_id);
        Ok(rows.employees.iter().filter(|s| statuses.contains(s)).count() as i64)
    }

    async fn count_biometric_devices(&self, tenant_id: TenantId) -> GatingResult<i64> {
        Ok(self.rows(tenant_id).devices)
    }

    async fn count_kiosks(&self, tenant_id: TenantId) -> GatingResult<i64> {
        Ok(self.rows(tenant_id).kiosks)
    }

    async fn count_memberships(
        &self,
        tenant_id: TenantId,
        roles: &[TenantRole],
    ) -> GatingResult<i64> {
        let rows = self.rows(tenant_id);
        Ok(rows.memberships.iter().filter(|r| roles.contains(r)).count() as i64)
    }
}

/// Store whose every read fails, as if the database were down
pub struct UnavailableStore;

#[async_trait]
impl TenantStore for UnavailableStore {
    async fn find_plan(&self, _tenant_id: TenantId) -> GatingResult<Option<Plan>> {
        Err(GatingError::Database("connection refused".to_string()))
    }

    async fn list_addons(&self, _tenant_id: TenantId) -> GatingResult<Vec<TenantAddon>> {
        Err(GatingError::Database("connection refused".to_string()))
    }

    async fn count_employees(
        &self,
        _tenant_id: TenantId,
        _statuses: &[EmploymentStatus],
    ) -> GatingResult<i64> {
        Err(GatingError::Database("connection refused".to_string()))
    }

    async fn count_biometric_devices(&self, _tenant_id: TenantId) -> GatingResult<i64> {
        Err(GatingError::Database("connection refused".to_string()))
    }

    async fn count_kiosks(&self, _tenant_id: TenantId) -> GatingResult<i64> {
        Err(GatingError::Database("connection refused".to_string()))
    }

    async fn count_memberships(
        &self,
        _tenant_id: TenantId,
        _roles: &[TenantRole],
    ) -> GatingResult<i64> {
        Err(GatingError::Database("connection refused".to_string()))
    }
}

pub fn gate(store: &Arc<MemoryStore>) -> FeatureGateService {
    FeatureGateService::new(store.clone())
}

pub fn plan(slug: &str, limits: &[(LimitKey, i64)]) -> Plan {
    let limits = limits
        .iter()
        .fold(PlanLimits::new(), |acc, (key, value)| acc.with(*key, *value));
    Plan {
        id: PlanId::new(),
        slug: slug.to_string(),
        name: slug.to_string(),
        limits,
    }
}

/// Seeded starter plan
pub fn starter_plan() -> Plan {
    plan(
        "starter",
        &[
            (LimitKey::MaxEmployees, 25),
            (LimitKey::MaxBiometricDevices, 2),
            (LimitKey::MaxKiosks, 1),
            (LimitKey::MaxAdminUsers, 3),
        ],
    )
}
