//! Menu Item Model

use serde::{Deserialize, Serialize};

use super::LocalizedText;

/// Which sub-choice an item with variants asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum VariantType {
    /// Rice, quinoa, noodles...
    Base,
    /// Drink flavors
    Flavor,
}

impl VariantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Flavor => "flavor",
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub name: LocalizedText,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub description: LocalizedText,
    /// Standard size price
    pub price: f64,
    /// Small size price (two-tier size model)
    pub price_small: Option<f64>,
    pub image: Option<String>,
    pub is_available: bool,
    pub is_popular: bool,
    pub has_size_options: bool,
    pub is_custom_bowl: bool,
    pub has_variants: bool,
    pub variant_type: Option<VariantType>,
    /// Free-form display text, not relational
    #[cfg_attr(feature = "db", sqlx(json))]
    pub ingredients: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub toppings: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub allergens: Vec<String>,
    pub display_order: i32,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub category_id: i64,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub price: f64,
    pub price_small: Option<f64>,
    pub image: Option<String>,
    pub is_available: Option<bool>,
    pub is_popular: Option<bool>,
    pub has_size_options: Option<bool>,
    pub is_custom_bowl: Option<bool>,
    pub variant_type: Option<VariantType>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub toppings: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    pub display_order: Option<i32>,
}
