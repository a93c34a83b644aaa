//! formforge-core
//!
//! Pure domain types, schema/response validation, and S3 key conventions.
//! No AWS SDK dependency — this is the shared vocabulary of the FormForge
//! system.

pub mod models;
pub mod responses;
pub mod s3_keys;
pub mod slug;
pub mod validate;
