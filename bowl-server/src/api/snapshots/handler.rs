//! Snapshot API Handlers

use axum::{
    Extension,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use http::{StatusCode, header};
use shared::models::{
    ContentVersion, PublishRequest, PublishResult, Snapshot, SnapshotCreate, SnapshotDetail,
    SnapshotSummary,
};

use crate::auth::AdminIdentity;
use crate::core::ServerState;
use crate::db::repository::content_version as version_repo;
use crate::snapshots::{self, lifecycle};
use crate::utils::json::optional_body;
use crate::utils::{AppResult, Json};

/// GET /api/admin/snapshots - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SnapshotSummary>>> {
    Ok(Json(lifecycle::list(state.pool()).await?))
}

/// POST /api/admin/snapshots - capture live content
pub async fn create(
    State(state): State<ServerState>,
    Extension(admin): Extension<AdminIdentity>,
    Json(payload): Json<SnapshotCreate>,
) -> AppResult<(StatusCode, Json<Snapshot>)> {
    let snapshot = snapshots::capture(state.pool(), payload, &admin).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/admin/snapshots/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SnapshotDetail>> {
    Ok(Json(lifecycle::detail(state.pool(), id).await?))
}

/// DELETE /api/admin/snapshots/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    lifecycle::delete(state.pool(), id).await?;
    tracing::info!(snapshot_id = id, admin_id = admin.id, "Snapshot deleted by admin");
    Ok(Json(true))
}

/// POST /api/admin/snapshots/{id}/restore - validate then publish
///
/// Body is optional and may be empty: `{"expectedVersion": n}` turns a
/// concurrent publish into a 409.
pub async fn restore(
    State(state): State<ServerState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Json<PublishResult>> {
    let request: PublishRequest = optional_body(&body)?;
    let result = snapshots::publish(state.pool(), id, request.expected_version).await?;
    tracing::info!(
        snapshot_id = id,
        admin_id = admin.id,
        content_version = result.content_version,
        "Snapshot restored by admin"
    );
    Ok(Json(result))
}

/// GET /api/admin/snapshots/{id}/download - ZIP with SQL dump and media
pub async fn download(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let (file_name, bytes) = lifecycle::download(
        state.pool(),
        id,
        state.config.images_dir.clone(),
        state.config.media_dir.clone(),
    )
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}

/// GET /api/admin/content/version
pub async fn content_version(State(state): State<ServerState>) -> AppResult<Json<ContentVersion>> {
    Ok(Json(version_repo::get(state.pool()).await?))
}
