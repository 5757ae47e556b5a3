//! Shared domain types for Vigil.
//!
//! This crate contains the core domain types used across the Vigil hub:
//! workflow definitions, step records, condition operators, service health,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod workflow;
