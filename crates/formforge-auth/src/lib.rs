//! formforge-auth
//!
//! Cognito-backed owner identity. Form-management operations trust the
//! subject extracted here; everything downstream keys ownership off it.

pub mod client;
pub mod error;
pub mod jwt;
