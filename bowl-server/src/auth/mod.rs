//! Admin authentication
//!
//! - [`JwtService`] - session token service
//! - [`AdminIdentity`] - current admin context
//! - [`require_admin`] - middleware guarding `/api/admin/*`
//! - [`password`] - argon2 hashing

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{AdminIdentity, Claims, JwtError, JwtService};
pub use middleware::{SESSION_COOKIE, require_admin};
