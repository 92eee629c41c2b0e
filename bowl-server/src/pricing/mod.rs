//! Server-side pricing

pub mod bowl;

pub use bowl::quote;
