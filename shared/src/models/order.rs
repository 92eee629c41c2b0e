//! Order Models

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::bowl::ItemCustomization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ServiceType {
    Pickup,
    Dinein,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ItemSize {
    Small,
    Standard,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub service_type: ServiceType,
    pub table_number: Option<String>,
    pub comment: Option<String>,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line. Name and price are copied at order time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Null once the menu item is removed from the live menu
    pub menu_item_id: Option<i64>,
    pub name: String,
    pub customization: Option<ItemCustomization>,
    pub size: Option<ItemSize>,
    pub quantity: i32,
    pub price: f64,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    #[validate(length(min = 5, max = 32))]
    pub customer_phone: String,
    #[validate(email, length(max = 254))]
    pub customer_email: Option<String>,
    pub service_type: ServiceType,
    #[validate(length(max = 16))]
    pub table_number: Option<String>,
    #[validate(length(max = 500))]
    pub comment: Option<String>,
    #[validate(custom(function = "validate_money"))]
    pub total: f64,
    #[validate(length(min = 1, max = 50), nested)]
    pub items: Vec<OrderItemCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemCreate {
    pub menu_item_id: Option<i64>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub size: Option<ItemSize>,
    #[validate(range(min = 1, max = 99))]
    pub quantity: i32,
    #[validate(custom(function = "validate_money"))]
    pub price: f64,
    pub customization: Option<ItemCustomization>,
}

/// Status change payload. Parsed by hand so an unknown status gets a coded error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: String,
}

fn validate_money(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new("invalid_amount"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> OrderItemCreate {
        OrderItemCreate {
            menu_item_id: Some(1),
            name: "Poke".into(),
            size: Some(ItemSize::Standard),
            quantity: 2,
            price: 9.5,
            customization: None,
        }
    }

    fn order() -> OrderCreate {
        OrderCreate {
            customer_name: "Anna".into(),
            customer_phone: "+79990001122".into(),
            customer_email: None,
            service_type: ServiceType::Pickup,
            table_number: None,
            comment: None,
            total: 19.0,
            items: vec![item()],
        }
    }

    #[test]
    fn valid_order_passes() {
        assert!(order().validate().is_ok());
    }

    #[test]
    fn empty_items_rejected() {
        let mut o = order();
        o.items.clear();
        assert!(o.validate().is_err());
    }

    #[test]
    fn nested_item_checked() {
        let mut o = order();
        o.items[0].quantity = 0;
        assert!(o.validate().is_err());

        let mut o = order();
        o.items[0].price = f64::NAN;
        assert!(o.validate().is_err());
    }

    #[test]
    fn negative_money_rejected() {
        let mut o = order();
        o.total = -0.01;
        assert!(o.validate().is_err());

        let mut o = order();
        o.items[0].price = 0.0;
        assert!(o.validate().is_ok());
    }

    #[test]
    fn status_update_body() {
        let u: OrderStatusUpdate = serde_json::from_str(r#"{"status":"ready"}"#).unwrap();
        assert_eq!(u.status, "ready");
    }

    #[test]
    fn bad_email_rejected() {
        let mut o = order();
        o.customer_email = Some("not-an-email".into());
        assert!(o.validate().is_err());
    }

    #[test]
    fn service_type_wire_names() {
        assert_eq!(serde_json::to_string(&ServiceType::Dinein).unwrap(), "\"dinein\"");
        let s: OrderStatus = serde_json::from_str("\"preparing\"").unwrap();
        assert_eq!(s, OrderStatus::Preparing);
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
