//! Pre-publish integrity gate
//!
//! Runs on the captured content before any live row is touched.

use std::collections::HashSet;

use shared::models::ContentSet;

use super::SnapshotError;

/// Reject content that would leave the live tables inconsistent:
/// no categories, a menu item whose category was not captured, or a
/// variant whose menu item was not captured.
pub fn validate(content: &ContentSet) -> Result<(), SnapshotError> {
    if content.categories.is_empty() {
        return Err(SnapshotError::EmptyCategories);
    }

    let category_ids: HashSet<i64> = content.categories.iter().map(|c| c.id).collect();
    if let Some(item) = content
        .menu_items
        .iter()
        .find(|m| !category_ids.contains(&m.category_id))
    {
        return Err(SnapshotError::DanglingCategory {
            menu_item_id: item.id,
            category_id: item.category_id,
        });
    }

    let menu_item_ids: HashSet<i64> = content.menu_items.iter().map(|m| m.id).collect();
    if let Some(variant) = content
        .variants
        .iter()
        .find(|v| !menu_item_ids.contains(&v.menu_item_id))
    {
        return Err(SnapshotError::DanglingVariant {
            variant_id: variant.id,
            menu_item_id: variant.menu_item_id,
        });
    }

    Ok(())
}
