//! Workforce Feature Gating
//!
//! Decides whether a tenant may add another employee, biometric device,
//! kiosk or admin user, based on its plan limits and active add-ons.

pub mod error;
pub mod gate;
pub mod limits;
pub mod store;
pub mod usage;

pub use error::{GatingError, GatingResult};
pub use gate::FeatureGateService;
pub use limits::{effective_limit, is_within, Resource};
pub use store::{PgTenantStore, TenantStore};
pub use usage::{ResourceUsage, UsageSummary};
