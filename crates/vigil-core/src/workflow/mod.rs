//! Orchestration core: interpolation, condition evaluation, step dispatch,
//! and the sequential workflow engine.
//!
//! - `interpolate` -- `{{var}}` substitution over a JSON parameter tree
//! - `condition` -- fixed-operator context checks
//! - `step_runner` -- per-step dispatch to the collaborator ports
//! - `engine` -- sequential execution with halt-on-failure semantics
//! - `catalog` -- predefined workflow definitions

pub mod catalog;
pub mod condition;
pub mod engine;
pub mod interpolate;
pub mod step_runner;
