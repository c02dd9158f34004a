//! Error types shared across the workforce crates

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkforceError {
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type WorkforceResult<T> = Result<T, WorkforceError>;
