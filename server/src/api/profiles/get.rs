use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Profile;
use crate::schema::profiles;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match profiles::table
        .find(id)
        .select(Profile::as_select())
        .first(&mut conn)
    {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(diesel::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Profile not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch profile {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch profile".to_string(),
                }),
            )
                .into_response()
        }
    }
}
