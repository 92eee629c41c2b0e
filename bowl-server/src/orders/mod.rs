//! Orders
//!
//! - [`service`] - checkout ingestion and back office reads
//! - [`notifier`] - best-effort "new order" notification
//! - [`money`] - decimal arithmetic for totals

pub mod money;
pub mod notifier;
pub mod service;

pub use notifier::{NoopNotifier, NotifyError, OrderNotifier, TelegramNotifier};
