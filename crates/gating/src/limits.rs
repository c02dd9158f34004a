//! Effective limit arithmetic
//!
//! Pure functions over a plan and its add-ons. No I/O happens here, so the
//! whole policy can be tested without a store.
//!
//! ## Rules
//!
//! - A missing plan or a missing limit key means the limit is not enforced (`None`)
//! - A base limit of `-1` is unlimited and absorbs every add-on
//! - Otherwise the effective limit is the base plus the contribution of every
//!   *active* add-on that targets the same key

use serde::{Deserialize, Serialize};
use workforce_shared::types::{LimitKey, Plan, PlanLimits, TenantAddon};

/// A countable resource guarded by a plan limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Employees,
    BiometricDevices,
    Kiosks,
    /// Users holding an elevated (admin or HR) role
    AdminUsers,
}

impl Resource {
    pub fn all() -> [Self; 4] {
        [
            Self::Employees,
            Self::BiometricDevices,
            Self::Kiosks,
            Self::AdminUsers,
        ]
    }

    pub fn limit_key(&self) -> LimitKey {
        match self {
            Self::Employees => LimitKey::MaxEmployees,
            Self::BiometricDevices => LimitKey::MaxBiometricDevices,
            Self::Kiosks => LimitKey::MaxKiosks,
            Self::AdminUsers => LimitKey::MaxAdminUsers,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::BiometricDevices => "biometric_devices",
            Self::Kiosks => "kiosks",
            Self::AdminUsers => "admin_users",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the effective limit for `key`
///
/// Returns `None` when the limit is not enforced, `Some(-1)` when unlimited,
/// and the base plus active add-on contributions otherwise.
pub fn effective_limit(plan: Option<&Plan>, addons: &[TenantAddon], key: LimitKey) -> Option<i64> {
    let base = plan?.limits.get(key)?;

    if base == PlanLimits::UNLIMITED {
        return Some(PlanLimits::UNLIMITED);
    }

    let extra = addons
        .iter()
        .filter(|addon| addon.status.contributes() && addon.addon_type.limit_key() == key)
        .map(TenantAddon::contribution)
        .fold(0i64, i64::saturating_add);

    Some(base.saturating_add(extra))
}

/// Whether a limit value actually caps usage
pub fn is_enforced(limit: Option<i64>) -> bool {
    !matches!(limit, None | Some(PlanLimits::UNLIMITED))
}

/// Whether `current` usage still leaves room under `limit`
///
/// Reaching the limit blocks: a limit of 3 with 3 in use is not within.
pub fn is_within(limit: Option<i64>, current: i64) -> bool {
    match limit {
        None | Some(PlanLimits::UNLIMITED) => true,
        Some(limit) => current < limit,
    }
}
