//! formforge-audit
//!
//! Structured audit events for form lifecycle actions, emitted through
//! `tracing` so they land in CloudWatch Logs with the rest of the
//! request telemetry.

pub mod events;
