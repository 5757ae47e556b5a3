//! Infrastructure implementations for Vigil.
//!
//! Everything here is an HTTP adapter for a port defined in
//! `vigil-core::service`: the observer telemetry service, the browser
//! bridge (reached through the team hub webhook), the team coordination
//! hub, and the SCC app. Plus the health prober and the team-backed
//! notification sink.

pub mod health;
pub mod http;
pub mod notify;
