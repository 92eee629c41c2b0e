//! Content snapshots
//!
//! - [`capture`] - freeze live content under a new snapshot
//! - [`validator`] - integrity gate run before publish
//! - [`publish`] - replace live content with a snapshot, atomically
//! - [`lifecycle`] - list, preview, delete, ZIP download

pub mod archive;
pub mod capture;
pub mod error;
pub mod lifecycle;
pub mod publisher;
pub mod validator;

pub use capture::capture;
pub use error::SnapshotError;
pub use publisher::publish;
