//! Feature gating error types

use thiserror::Error;

use crate::limits::Resource;

/// Errors raised while evaluating tenant limits
#[derive(Debug, Error)]
pub enum GatingError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("{resource} limit reached ({current}/{limit})")]
    LimitReached {
        resource: Resource,
        current: i64,
        limit: i64,
    },
}

impl GatingError {
    /// Whether this is a policy denial rather than an infrastructure fault
    pub fn is_limit_reached(&self) -> bool {
        matches!(self, GatingError::LimitReached { .. })
    }
}

impl From<sqlx::Error> for GatingError {
    fn from(err: sqlx::Error) -> Self {
        GatingError::Database(err.to_string())
    }
}

pub type GatingResult<T> = Result<T, GatingError>;
