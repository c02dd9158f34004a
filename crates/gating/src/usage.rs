//! Usage summaries
//!
//! A read-only snapshot of current usage against effective limits, for
//! dashboards and the operator report.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use workforce_shared::types::{LimitKey, TenantId};

use crate::limits::{is_enforced, is_within, Resource};

/// Usage of a single resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub resource: Resource,
    pub limit_key: LimitKey,
    /// Live rows counted for this resource
    pub current: i64,
    /// Effective limit, `None` when nothing caps this resource
    pub limit: Option<i64>,
    /// Slots left before the limit blocks, `None` when uncapped
    pub remaining: Option<i64>,
    pub within_limit: bool,
}

impl ResourceUsage {
    /// Evaluate `current` usage against an effective limit
    pub fn evaluate(resource: Resource, current: i64, effective_limit: Option<i64>) -> Self {
        let limit = match effective_limit {
            Some(limit) if is_enforced(Some(limit)) => Some(limit),
            _ => None,
        };

        Self {
            resource,
            limit_key: resource.limit_key(),
            current,
            limit,
            remaining: limit.map(|limit| limit.saturating_sub(current).max(0)),
            within_limit: is_within(effective_limit, current),
        }
    }
}

/// Usage of every tracked resource for one tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    pub tenant_id: TenantId,
    /// Slug of the assigned plan
    pub plan: Option<String>,
    pub resources: Vec<ResourceUsage>,
    #[serde(with = "time::serde::rfc3339")]
    pub computed_at: OffsetDateTime,
}

impl UsageSummary {
    pub fn get(&self, resource: Resource) -> Option<&ResourceUsage> {
        self.resources.iter().find(|usage| usage.resource == resource)
    }

    /// Resources that cannot grow any further
    pub fn blocked(&self) -> impl Iterator<Item = &ResourceUsage> {
        self.resources.iter().filter(|usage| !usage.within_limit)
    }
}
