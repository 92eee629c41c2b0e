//! Live content set
//!
//! Reads every live content table in id order. All reads go through the same
//! connection so a caller holding a transaction sees one consistent state.

use super::{RepoResult, category, gallery, ingredient, menu_item, product_variant, static_content};
use shared::models::ContentSet;
use sqlx::SqliteConnection;

pub async fn load_live(conn: &mut SqliteConnection) -> RepoResult<ContentSet> {
    Ok(ContentSet {
        categories: category::find_all(&mut *conn).await?,
        menu_items: menu_item::find_all(&mut *conn).await?,
        variants: product_variant::find_all(&mut *conn).await?,
        ingredients: ingredient::find_all(&mut *conn).await?,
        gallery: gallery::find_all(&mut *conn).await?,
        static_content: static_content::find_all(&mut *conn).await?,
    })
}
