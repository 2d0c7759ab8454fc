//! Shared event dispatch domain primitives.
//!
//! This crate owns event classification, the invocation context, handler
//! configuration and the request/response contracts. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.
//! See `crates/event_dispatch_core/README.md` for ownership boundaries.

pub mod classify;
pub mod config;
pub mod context;
pub mod contract;
