//! Common types used across the workforce platform

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ID Wrappers
// =============================================================================

/// Tenant ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TenantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TenantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid tenant id '{}': {}", s, e))
    }
}

/// Plan ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub Uuid);

impl PlanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlanId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

// =============================================================================
// Plans and Limits
// =============================================================================

/// Keys of the numeric limits a plan can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKey {
    MaxEmployees,
    MaxBiometricDevices,
    MaxKiosks,
    MaxAdminUsers,
}

impl LimitKey {
    pub fn all() -> [Self; 4] {
        [
            Self::MaxEmployees,
            Self::MaxBiometricDevices,
            Self::MaxKiosks,
            Self::MaxAdminUsers,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxEmployees => "max_employees",
            Self::MaxBiometricDevices => "max_biometric_devices",
            Self::MaxKiosks => "max_kiosks",
            Self::MaxAdminUsers => "max_admin_users",
        }
    }
}

impl std::fmt::Display for LimitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LimitKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max_employees" => Ok(Self::MaxEmployees),
            "max_biometric_devices" => Ok(Self::MaxBiometricDevices),
            "max_kiosks" => Ok(Self::MaxKiosks),
            "max_admin_users" => Ok(Self::MaxAdminUsers),
            _ => Err(format!("Invalid limit key: {}", s)),
        }
    }
}

/// Limit values granted by a plan, keyed by limit name
///
/// Stored as a JSON object so plans can carry keys this crate does not
/// evaluate yet. A missing key means the limit is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanLimits(pub BTreeMap<String, i64>);

impl PlanLimits {
    /// Sentinel stored for an unlimited resource
    pub const UNLIMITED: i64 = -1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for seeding and tests
    pub fn with(mut self, key: LimitKey, value: i64) -> Self {
        self.0.insert(key.as_str().to_string(), value);
        self
    }

    pub fn get(&self, key: LimitKey) -> Option<i64> {
        self.0.get(key.as_str()).copied()
    }

    pub fn is_unlimited(&self, key: LimitKey) -> bool {
        self.get(key) == Some(Self::UNLIMITED)
    }
}

/// Subscription plan (read-only reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub slug: String,
    pub name: String,
    pub limits: PlanLimits,
}

// =============================================================================
// Add-ons
// =============================================================================

/// Purchasable increments to a single plan limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonType {
    /// Extra employee slots, sold in packs of 10
    EmployeeSlots,
    BiometricDevices,
    Kiosks,
    AdminUsers,
}

impl AddonType {
    pub fn all() -> [Self; 4] {
        [
            Self::EmployeeSlots,
            Self::BiometricDevices,
            Self::Kiosks,
            Self::AdminUsers,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmployeeSlots => "employee_slots",
            Self::BiometricDevices => "biometric_devices",
            Self::Kiosks => "kiosks",
            Self::AdminUsers => "admin_users",
        }
    }

    /// The plan limit this add-on raises
    pub fn limit_key(&self) -> LimitKey {
        match self {
            Self::EmployeeSlots => LimitKey::MaxEmployees,
            Self::BiometricDevices => LimitKey::MaxBiometricDevices,
            Self::Kiosks => LimitKey::MaxKiosks,
            Self::AdminUsers => LimitKey::MaxAdminUsers,
        }
    }

    /// Units granted per purchased quantity when the row does not say otherwise
    pub fn default_units_per_quantity(&self) -> u32 {
        match self {
            Self::EmployeeSlots => 10,
            Self::BiometricDevices | Self::Kiosks | Self::AdminUsers => 1,
        }
    }
}

impl std::fmt::Display for AddonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AddonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee_slots" => Ok(Self::EmployeeSlots),
            "biometric_devices" => Ok(Self::BiometricDevices),
            "kiosks" => Ok(Self::Kiosks),
            "admin_users" => Ok(Self::AdminUsers),
            _ => Err(format!("Invalid add-on type: {}", s)),
        }
    }
}

/// Add-on lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddonStatus {
    #[default]
    Active,
    Inactive,
    Cancelled,
}

impl AddonStatus {
    /// Only active add-ons raise limits
    pub fn contributes(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for AddonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid add-on status: {}", s)),
        }
    }
}

/// An add-on attached to a tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantAddon {
    pub addon_type: AddonType,
    pub quantity: u32,
    pub units_per_quantity: u32,
    pub status: AddonStatus,
}

impl TenantAddon {
    /// Active add-on using the catalog multiplier for its type
    pub fn active(addon_type: AddonType, quantity: u32) -> Self {
        Self {
            addon_type,
            quantity,
            units_per_quantity: addon_type.default_units_per_quantity(),
            status: AddonStatus::Active,
        }
    }

    /// Extra limit units this add-on grants, regardless of status
    pub fn contribution(&self) -> i64 {
        i64::from(self.quantity).saturating_mul(i64::from(self.units_per_quantity))
    }
}

// =============================================================================
// Usage Classification
// =============================================================================

/// Employment status of an employee record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Active,
    OnLeave,
    Suspended,
    Resigned,
    Terminated,
    Retired,
}

impl EmploymentStatus {
    /// Statuses that occupy an employee slot
    pub const COUNTED: &'static [EmploymentStatus] = &[EmploymentStatus::Active];

    pub fn counts_toward_limit(&self) -> bool {
        Self::COUNTED.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Suspended => "suspended",
            Self::Resigned => "resigned",
            Self::Terminated => "terminated",
            Self::Retired => "retired",
        }
    }
}

impl std::fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "on_leave" => Ok(Self::OnLeave),
            "suspended" => Ok(Self::Suspended),
            "resigned" => Ok(Self::Resigned),
            "terminated" => Ok(Self::Terminated),
            "retired" => Ok(Self::Retired),
            _ => Err(format!("Invalid employment status: {}", s)),
        }
    }
}

/// Role of a user within a tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantRole {
    Admin,
    HrManager,
    HrStaff,
    HrConsultant,
    Supervisor,
    #[default]
    Employee,
}

impl TenantRole {
    /// Roles that take an admin seat
    pub const ELEVATED: &'static [TenantRole] = &[
        TenantRole::Admin,
        TenantRole::HrManager,
        TenantRole::HrStaff,
        TenantRole::HrConsultant,
    ];

    pub fn is_elevated(&self) -> bool {
        Self::ELEVATED.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::HrManager => "hr_manager",
            Self::HrStaff => "hr_staff",
            Self::HrConsultant => "hr_consultant",
            Self::Supervisor => "supervisor",
            Self::Employee => "employee",
        }
    }
}

impl std::fmt::Display for TenantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TenantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "hr_manager" => Ok(Self::HrManager),
            "hr_staff" => Ok(Self::HrStaff),
            "hr_consultant" => Ok(Self::HrConsultant),
            "supervisor" => Ok(Self::Supervisor),
            "employee" => Ok(Self::Employee),
            _ => Err(format!("Invalid tenant role: {}", s)),
        }
    }
}

// =============================================================================
// Tenant Context
// =============================================================================

/// Everything the gate needs to know about a tenant's entitlements
///
/// Passed explicitly to every check. `plan` is `None` for tenants that have
/// not been assigned a plan, which disables every limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub plan: Option<Plan>,
    pub addons: Vec<TenantAddon>,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId, plan: Option<Plan>, addons: Vec<TenantAddon>) -> Self {
        Self {
            tenant_id,
            plan,
            addons,
        }
    }

    /// Context for a tenant without a plan or add-ons
    pub fn unassigned(tenant_id: TenantId) -> Self {
        Self::new(tenant_id, None, Vec::new())
    }

    pub fn plan_slug(&self) -> Option<&str> {
        self.plan.as_ref().map(|p| p.slug.as_str())
    }
}
