//! formforge-storage
//!
//! Form and submission persistence as JSON documents on S3, plus the two
//! storage-layer guarantees the rest of the system leans on: the slug
//! uniqueness constraint (conditional creates on marker objects) and
//! atomic submission-stat increments (ETag compare-and-swap).

pub mod client;
mod docs;
pub mod error;
pub mod forms;
pub mod slugs;
pub mod submissions;
pub mod uploads;
