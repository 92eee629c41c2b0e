//! Snapshot download
//!
//! A ZIP holding `db_dump.sql` (INSERT statements for the captured
//! categories, ingredients, menu items and variants) plus every file under
//! the images and media directories. Convenience export only; publish never
//! reads it.

use std::fmt::Write as _;
use std::io::{Cursor, Write};
use std::path::Path;

use shared::models::{ContentSet, Snapshot};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::FileOptions;

use super::SnapshotError;

/// `snapshot-<id>.zip`
pub fn archive_file_name(snapshot_id: i64) -> String {
    format!("snapshot-{snapshot_id}.zip")
}

/// Build the archive in memory. Blocking (file IO); run off the async runtime.
pub fn build_archive(
    snapshot: &Snapshot,
    content: &ContentSet,
    images_dir: &Path,
    media_dir: &Path,
) -> Result<Vec<u8>, SnapshotError> {
    let dump = sql_dump(snapshot, content)?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        let options: FileOptions<()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("db_dump.sql", options).map_err(archive_err)?;
        zip.write_all(dump.as_bytes()).map_err(archive_err)?;

        for (prefix, dir) in [("images", images_dir), ("media", media_dir)] {
            add_dir(&mut zip, prefix, dir, options)?;
        }

        zip.finish().map_err(archive_err)?;
    }

    Ok(buf.into_inner())
}

fn add_dir<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    prefix: &str,
    dir: &Path,
    options: FileOptions<()>,
) -> Result<(), SnapshotError> {
    zip.add_directory(format!("{prefix}/"), options)
        .map_err(archive_err)?;
    if !dir.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(archive_err)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).map_err(archive_err)?;
        let name: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        zip.start_file(format!("{prefix}/{}", name.join("/")), options)
            .map_err(archive_err)?;
        let data = std::fs::read(entry.path()).map_err(archive_err)?;
        zip.write_all(&data).map_err(archive_err)?;
    }
    Ok(())
}

fn archive_err(e: impl std::fmt::Display) -> SnapshotError {
    SnapshotError::Archive(e.to_string())
}

/// INSERT statements for the relational part of a snapshot
pub fn sql_dump(snapshot: &Snapshot, content: &ContentSet) -> Result<String, SnapshotError> {
    let mut out = String::new();
    // String writes cannot fail
    let _ = writeln!(out, "-- Snapshot {} ({})", snapshot.id, snapshot.name);
    let _ = writeln!(out, "-- checksum {}", snapshot.checksum);
    out.push_str("BEGIN TRANSACTION;\n\n");

    for c in &content.categories {
        let _ = writeln!(
            out,
            "INSERT INTO category (id, name, icon, display_order) VALUES ({}, {}, {}, {});",
            c.id,
            text(&serde_json::to_string(&c.name)?),
            text(&c.icon),
            c.display_order,
        );
    }

    for i in &content.ingredients {
        let _ = writeln!(
            out,
            "INSERT INTO ingredient (id, name, kind, price, price_small, price_standard, \
             is_available, display_order) VALUES ({}, {}, {}, {}, {}, {}, {}, {});",
            i.id,
            text(&serde_json::to_string(&i.name)?),
            text(i.kind.as_str()),
            real(i.price),
            real(i.price_small),
            real(i.price_standard),
            i32::from(i.is_available),
            i.display_order,
        );
    }

    for m in &content.menu_items {
        let _ = writeln!(
            out,
            "INSERT INTO menu_item (id, category_id, name, description, price, price_small, \
             image, is_available, is_popular, has_size_options, is_custom_bowl, has_variants, \
             variant_type, ingredients, toppings, allergens, display_order) VALUES \
             ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {});",
            m.id,
            m.category_id,
            text(&serde_json::to_string(&m.name)?),
            text(&serde_json::to_string(&m.description)?),
            m.price,
            real(m.price_small),
            opt_text(m.image.as_deref()),
            i32::from(m.is_available),
            i32::from(m.is_popular),
            i32::from(m.has_size_options),
            i32::from(m.is_custom_bowl),
            i32::from(m.has_variants),
            opt_text(m.variant_type.as_ref().map(|v| v.as_str())),
            text(&serde_json::to_string(&m.ingredients)?),
            text(&serde_json::to_string(&m.toppings)?),
            text(&serde_json::to_string(&m.allergens)?),
            m.display_order,
        );
    }

    for v in &content.variants {
        let _ = writeln!(
            out,
            "INSERT INTO product_variant (id, menu_item_id, name, variant_type, display_order, \
             is_available) VALUES ({}, {}, {}, {}, {}, {});",
            v.id,
            v.menu_item_id,
            text(&serde_json::to_string(&v.name)?),
            text(v.variant_type.as_str()),
            v.display_order,
            i32::from(v.is_available),
        );
    }

    out.push_str("\nCOMMIT;\n");
    Ok(out)
}

/// SQL string literal
fn text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn opt_text(value: Option<&str>) -> String {
    value.map(text).unwrap_or_else(|| "NULL".into())
}

fn real(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "NULL".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Category, Ingredient, IngredientKind, LocalizedText};
    use std::io::Read;
    use zip::ZipArchive;

    fn snapshot() -> Snapshot {
        Snapshot {
            id: 42,
            name: "Monday Menu".into(),
            description: None,
            created_by: None,
            created_by_name: None,
            created_at: 0,
            content_version: 0,
            checksum: "abc".into(),
        }
    }

    fn content() -> ContentSet {
        ContentSet {
            categories: vec![Category {
                id: 1,
                name: LocalizedText::new("Шеф's", "Chef's"),
                icon: String::new(),
                display_order: 0,
            }],
            ingredients: vec![Ingredient {
                id: 2,
                name: LocalizedText::both("Salmon"),
                kind: IngredientKind::Protein,
                price: None,
                price_small: Some(3.5),
                price_standard: Some(5.0),
                is_available: true,
                display_order: 1,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn dump_escapes_quotes() {
        let sql = sql_dump(&snapshot(), &content()).unwrap();
        assert!(sql.contains("Chef''s"));
        assert!(sql.contains("'protein', NULL, 3.5, 5, 1, 1"));
        assert!(sql.trim_end().ends_with("COMMIT;"));
    }

    #[test]
    fn archive_contains_dump_and_directories() {
        let images = tempfile::tempdir().unwrap();
        let media = tempfile::tempdir().unwrap();
        std::fs::write(images.path().join("poke.jpg"), b"jpg").unwrap();
        std::fs::create_dir(media.path().join("video")).unwrap();
        std::fs::write(media.path().join("video").join("intro.mp4"), b"mp4").unwrap();

        let bytes = build_archive(&snapshot(), &content(), images.path(), media.path()).unwrap();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut dump = String::new();
        zip.by_name("db_dump.sql")
            .unwrap()
            .read_to_string(&mut dump)
            .unwrap();
        assert!(dump.contains("INSERT INTO category"));

        let mut data = Vec::new();
        zip.by_name("images/poke.jpg")
            .unwrap()
            .read_to_end(&mut data)
            .unwrap();
        assert_eq!(data, b"jpg");
        assert!(zip.by_name("media/video/intro.mp4").is_ok());
    }

    #[test]
    fn missing_directories_are_empty_entries() {
        let root = tempfile::tempdir().unwrap();
        let bytes = build_archive(
            &snapshot(),
            &content(),
            &root.path().join("nope"),
            &root.path().join("none"),
        )
        .unwrap();
        let zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<_> = zip.file_names().collect();
        assert!(names.contains(&"images/"));
        assert!(names.contains(&"media/"));
        assert!(names.contains(&"db_dump.sql"));
    }

    #[test]
    fn file_name() {
        assert_eq!(archive_file_name(7), "snapshot-7.zip");
    }
}
