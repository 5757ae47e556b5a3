//! HTTP request handlers for the REST API.

pub mod services;
pub mod workflow;
