//! AWS-oriented adapters and handlers for event dispatch.
//!
//! This crate owns runtime integration details (the Lambda entry point,
//! logging, secrets and notification adapters) and exposes a single runtime
//! module boundary for classification, configuration and contract primitives.
//! See `crates/event_dispatch_lambda/README.md` for ownership boundaries.

pub mod adapters;
pub mod handlers;
pub mod runtime;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
