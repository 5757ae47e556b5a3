//! Workflow orchestration engine for Vigil.
//!
//! This crate defines the "ports" (collaborator service traits) that the
//! infrastructure layer implements, plus the orchestration core itself:
//! interpolation, condition evaluation, step dispatch, and the sequential
//! workflow engine. It depends only on `vigil-types` -- never on
//! `vigil-infra` or any HTTP crate.

pub mod service;
pub mod workflow;
