//! Typed line item customization
//!
//! The bowl builder sends one bounded choice set per step. Shape checks
//! (counts, duplicates) live here; whether the referenced ingredients exist
//! and are available is checked server-side against the live tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{IngredientKind, ItemSize, LocalizedText};

pub const MAX_MARINADE: usize = 1;
pub const MAX_FRESH: usize = 5;
pub const MAX_SAUCE: usize = 3;
pub const MAX_TOPPING: usize = 4;
pub const MAX_EXTRAS: usize = 10;

/// Customization attached to an order line or a price quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ItemCustomization {
    /// Custom bowl assembled step by step
    Bowl(BowlSelection),
    /// Fixed item with a base/flavor sub-choice
    Variant { variant_id: i64 },
}

/// Ingredient ids picked in each bowl builder step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlSelection {
    pub protein: i64,
    pub base: i64,
    pub marinade: Option<i64>,
    #[serde(default)]
    pub fresh: Vec<i64>,
    #[serde(default)]
    pub sauce: Vec<i64>,
    #[serde(default)]
    pub topping: Vec<i64>,
    #[serde(default)]
    pub extras: Vec<i64>,
}

/// Bowl builder step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BowlSlot {
    Protein,
    Base,
    Marinade,
    Fresh,
    Sauce,
    Topping,
    Extra,
}

impl BowlSlot {
    /// Whether an ingredient of `kind` may be picked in this step
    pub fn accepts(&self, kind: IngredientKind) -> bool {
        match self {
            Self::Protein => kind == IngredientKind::Protein,
            Self::Base => kind == IngredientKind::Base,
            Self::Marinade => kind == IngredientKind::Marinade,
            Self::Fresh => kind == IngredientKind::Fresh,
            Self::Sauce => kind == IngredientKind::Sauce,
            Self::Topping => kind == IngredientKind::Topping,
            Self::Extra => kind.is_extra(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Base => "base",
            Self::Marinade => "marinade",
            Self::Fresh => "fresh",
            Self::Sauce => "sauce",
            Self::Topping => "topping",
            Self::Extra => "extras",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BowlShapeError {
    #[error("too many {slot} selections ({count}, max {max})")]
    TooMany {
        slot: &'static str,
        count: usize,
        max: usize,
    },
    #[error("ingredient {id} selected twice in {slot}")]
    Duplicate { slot: &'static str, id: i64 },
}

impl BowlSelection {
    /// Check per-step limits and duplicates
    pub fn validate_shape(&self) -> Result<(), BowlShapeError> {
        let lists: [(BowlSlot, &[i64], usize); 4] = [
            (BowlSlot::Fresh, &self.fresh, MAX_FRESH),
            (BowlSlot::Sauce, &self.sauce, MAX_SAUCE),
            (BowlSlot::Topping, &self.topping, MAX_TOPPING),
            (BowlSlot::Extra, &self.extras, MAX_EXTRAS),
        ];

        for (slot, ids, max) in lists {
            if ids.len() > max {
                return Err(BowlShapeError::TooMany {
                    slot: slot.as_str(),
                    count: ids.len(),
                    max,
                });
            }
            let mut seen = std::collections::HashSet::with_capacity(ids.len());
            for id in ids {
                if !seen.insert(*id) {
                    return Err(BowlShapeError::Duplicate {
                        slot: slot.as_str(),
                        id: *id,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every (step, ingredient id) pair in the selection
    pub fn slots(&self) -> Vec<(BowlSlot, i64)> {
        let mut out = vec![(BowlSlot::Protein, self.protein), (BowlSlot::Base, self.base)];
        out.extend(self.marinade.map(|id| (BowlSlot::Marinade, id)));
        out.extend(self.fresh.iter().map(|id| (BowlSlot::Fresh, *id)));
        out.extend(self.sauce.iter().map(|id| (BowlSlot::Sauce, *id)));
        out.extend(self.topping.iter().map(|id| (BowlSlot::Topping, *id)));
        out.extend(self.extras.iter().map(|id| (BowlSlot::Extra, *id)));
        out
    }
}

/// Price quote request from the bowl builder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlQuoteRequest {
    pub menu_item_id: i64,
    pub size: Option<ItemSize>,
    pub customization: ItemCustomization,
}

/// One priced part of a bowl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    /// `base`, `protein` or `extras`
    pub slot: String,
    /// Menu item id for the base line, ingredient id otherwise
    pub ref_id: i64,
    pub name: LocalizedText,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlQuote {
    pub unit_price: f64,
    pub breakdown: Vec<QuoteLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowl() -> BowlSelection {
        BowlSelection {
            protein: 1,
            base: 2,
            marinade: None,
            fresh: vec![10, 11],
            sauce: vec![20],
            topping: vec![],
            extras: vec![],
        }
    }

    #[test]
    fn parses_tagged_bowl() {
        let json = r#"{"kind":"bowl","protein":1,"base":2,"fresh":[10,11],"sauce":[20]}"#;
        let c: ItemCustomization = serde_json::from_str(json).unwrap();
        assert_eq!(c, ItemCustomization::Bowl(bowl()));
    }

    #[test]
    fn parses_tagged_variant() {
        let c: ItemCustomization =
            serde_json::from_str(r#"{"kind":"variant","variantId":7}"#).unwrap();
        assert_eq!(c, ItemCustomization::Variant { variant_id: 7 });
    }

    #[test]
    fn rejects_missing_protein() {
        let json = r#"{"kind":"bowl","base":2}"#;
        assert!(serde_json::from_str::<ItemCustomization>(json).is_err());
    }

    #[test]
    fn rejects_unknown_kind() {
        let json = r#"{"kind":"pizza"}"#;
        assert!(serde_json::from_str::<ItemCustomization>(json).is_err());
    }

    #[test]
    fn shape_limits() {
        assert!(bowl().validate_shape().is_ok());

        let mut b = bowl();
        b.sauce = vec![20, 21, 22, 23];
        assert_eq!(
            b.validate_shape(),
            Err(BowlShapeError::TooMany {
                slot: "sauce",
                count: 4,
                max: MAX_SAUCE
            })
        );

        let mut b = bowl();
        b.fresh = vec![10, 10];
        assert_eq!(
            b.validate_shape(),
            Err(BowlShapeError::Duplicate { slot: "fresh", id: 10 })
        );
    }

    #[test]
    fn slots_cover_every_pick() {
        let mut b = bowl();
        b.marinade = Some(5);
        b.extras = vec![30];
        let slots = b.slots();
        assert_eq!(slots.len(), 7);
        assert!(slots.contains(&(BowlSlot::Marinade, 5)));
        assert!(slots.contains(&(BowlSlot::Extra, 30)));
    }

    #[test]
    fn extra_slot_accepts_only_extra_kinds() {
        assert!(BowlSlot::Extra.accepts(IngredientKind::ExtraProtein));
        assert!(!BowlSlot::Extra.accepts(IngredientKind::Protein));
        assert!(!BowlSlot::Protein.accepts(IngredientKind::ExtraProtein));
    }
}
