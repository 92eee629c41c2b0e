use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};
use thiserror::Error;

/// Snapshot service errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Invalid(AppError),

    #[error("Snapshot contains no categories")]
    EmptyCategories,

    #[error("Menu item {menu_item_id} references category {category_id}, which is not in the snapshot")]
    DanglingCategory { menu_item_id: i64, category_id: i64 },

    #[error("Variant {variant_id} references menu item {menu_item_id}, which is not in the snapshot")]
    DanglingVariant { variant_id: i64, menu_item_id: i64 },

    #[error("Live content is at version {actual}, expected {expected}")]
    StaleVersion { expected: i64, actual: i64 },

    #[error("Published content does not match snapshot checksum")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for SnapshotError {
    fn from(err: sqlx::Error) -> Self {
        SnapshotError::Repo(err.into())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Repo(err.into())
    }
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        let message = err.to_string();
        match err {
            SnapshotError::NotFound(id) => {
                AppError::with_message(ErrorCode::SnapshotNotFound, message).with_detail("snapshotId", id)
            }
            SnapshotError::Invalid(e) => e,
            SnapshotError::EmptyCategories => {
                AppError::with_message(ErrorCode::SnapshotEmptyCategories, message)
            }
            SnapshotError::DanglingCategory {
                menu_item_id,
                category_id,
            } => AppError::with_message(ErrorCode::SnapshotDanglingReference, message)
                .with_detail("menuItemId", menu_item_id)
                .with_detail("categoryId", category_id),
            SnapshotError::DanglingVariant {
                variant_id,
                menu_item_id,
            } => AppError::with_message(ErrorCode::SnapshotDanglingReference, message)
                .with_detail("variantId", variant_id)
                .with_detail("menuItemId", menu_item_id),
            SnapshotError::StaleVersion { expected, actual } => {
                AppError::with_message(ErrorCode::ContentVersionConflict, message)
                    .with_detail("expectedVersion", expected)
                    .with_detail("contentVersion", actual)
            }
            SnapshotError::ChecksumMismatch { expected, actual } => {
                tracing::error!(%expected, %actual, "Publish checksum mismatch");
                AppError::with_message(ErrorCode::SnapshotChecksumMismatch, message)
            }
            SnapshotError::Archive(msg) => {
                tracing::error!(error = %msg, "Snapshot archive failed");
                AppError::with_message(ErrorCode::ArchiveError, message)
            }
            SnapshotError::Repo(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn integrity_errors_are_bad_request() {
        let cases = [
            SnapshotError::EmptyCategories,
            SnapshotError::DanglingCategory {
                menu_item_id: 1,
                category_id: 2,
            },
            SnapshotError::DanglingVariant {
                variant_id: 1,
                menu_item_id: 2,
            },
        ];
        for err in cases {
            assert_eq!(AppError::from(err).http_status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::from(SnapshotError::NotFound(7)).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(SnapshotError::StaleVersion {
                expected: 1,
                actual: 2
            })
            .http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(SnapshotError::ChecksumMismatch {
                expected: "a".into(),
                actual: "b".into()
            })
            .http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn dangling_message_names_ids() {
        let err = AppError::from(SnapshotError::DanglingCategory {
            menu_item_id: 10,
            category_id: 99,
        });
        assert!(err.message.contains("99"));
        assert_eq!(err.code, ErrorCode::SnapshotDanglingReference);
    }
}
