//! Ingredient Model
//!
//! Building blocks for custom bowls. Not tied to a specific menu item.

use serde::{Deserialize, Serialize};

use super::LocalizedText;

/// Bowl builder step an ingredient belongs to
///
/// `extra_*` kinds are only offered in the paid "extras" step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum IngredientKind {
    Protein,
    Base,
    Marinade,
    Fresh,
    Sauce,
    Topping,
    ExtraProtein,
    ExtraFresh,
    ExtraSauce,
    ExtraTopping,
}

impl IngredientKind {
    pub fn is_extra(&self) -> bool {
        matches!(
            self,
            Self::ExtraProtein | Self::ExtraFresh | Self::ExtraSauce | Self::ExtraTopping
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Base => "base",
            Self::Marinade => "marinade",
            Self::Fresh => "fresh",
            Self::Sauce => "sauce",
            Self::Topping => "topping",
            Self::ExtraProtein => "extra_protein",
            Self::ExtraFresh => "extra_fresh",
            Self::ExtraSauce => "extra_sauce",
            Self::ExtraTopping => "extra_topping",
        }
    }
}

impl std::fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ingredient entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub id: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub name: LocalizedText,
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    /// Flat price (extras)
    pub price: Option<f64>,
    /// Two-tier price, used only for proteins
    pub price_small: Option<f64>,
    pub price_standard: Option<f64>,
    pub is_available: bool,
    pub display_order: i32,
}

/// Create ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCreate {
    pub name: LocalizedText,
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    pub price: Option<f64>,
    pub price_small: Option<f64>,
    pub price_standard: Option<f64>,
    pub is_available: Option<bool>,
    pub display_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&IngredientKind::ExtraTopping).unwrap();
        assert_eq!(json, "\"extra_topping\"");
        assert_eq!(IngredientKind::ExtraTopping.as_str(), "extra_topping");
    }

    #[test]
    fn ingredient_uses_type_field() {
        let json = r#"{"id":1,"name":{"ru":"Лосось","en":"Salmon"},"type":"protein",
            "price":null,"priceSmall":3.5,"priceStandard":5.0,"isAvailable":true,"displayOrder":0}"#;
        let ing: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ing.kind, IngredientKind::Protein);
        assert!(!ing.kind.is_extra());
        assert_eq!(ing.price_small, Some(3.5));
    }
}
