//! Workforce Shared Types and Utilities
//!
//! This crate contains the tenant, plan and usage types shared by the
//! feature gate and the tools built on top of it.

pub mod db;
pub mod error;
pub mod types;

pub use db::*;
pub use error::*;
pub use types::*;
