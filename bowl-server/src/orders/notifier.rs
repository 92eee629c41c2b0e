//! Order notifications
//!
//! Best effort: the caller logs a failure and moves on. Nothing here can
//! affect a stored order.

use std::time::Duration;

use async_trait::async_trait;
use shared::models::{OrderDetail, ServiceType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound "new order" notification
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn notify(&self, order: &OrderDetail) -> Result<(), NotifyError>;
}

/// Used when no notification target is configured
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl OrderNotifier for NoopNotifier {
    async fn notify(&self, order: &OrderDetail) -> Result<(), NotifyError> {
        tracing::debug!(order_id = order.order.id, "No notifier configured, skipping");
        Ok(())
    }
}

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Telegram Bot API `sendMessage`
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .field("bot_token", &"[REDACTED]")
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, NotifyError> {
        Self::with_api_base(TELEGRAM_API, bot_token, chat_id)
    }

    pub fn with_api_base(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }
}

#[async_trait]
impl OrderNotifier for TelegramNotifier {
    async fn notify(&self, order: &OrderDetail) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let resp = self
            .client
            .post(url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": format_message(order),
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(order_id = order.order.id, "Order notification sent");
        Ok(())
    }
}

/// Plain-text message for the kitchen chat
pub fn format_message(detail: &OrderDetail) -> String {
    let o = &detail.order;
    let service = match o.service_type {
        ServiceType::Pickup => "Pickup".to_string(),
        ServiceType::Dinein => match &o.table_number {
            Some(table) => format!("Dine-in, table {table}"),
            None => "Dine-in".to_string(),
        },
    };

    let mut lines = vec![
        format!("New order #{}", o.id),
        format!("{} ({})", o.customer_name, o.customer_phone),
        service,
        String::new(),
    ];
    for item in &detail.items {
        lines.push(format!("{} x{} = {:.2}", item.name, item.quantity, item.price * f64::from(item.quantity)));
    }
    lines.push(String::new());
    lines.push(format!("Total: {:.2}", o.total));
    if let Some(comment) = o.comment.as_deref().filter(|c| !c.is_empty()) {
        lines.push(format!("Comment: {comment}"));
    }
    lines.join("\n")
}
