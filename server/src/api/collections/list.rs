use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Collection;
use crate::schema::recipe_collections;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionsResponse {
    pub collections: Vec<Collection>,
}

#[utoipa::path(
    get,
    path = "/api/collections",
    tag = "collections",
    responses(
        (status = 200, description = "Caller's collections, most recently updated first", body = CollectionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_collections(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match recipe_collections::table
        .filter(recipe_collections::user_id.eq(user.id))
        .order(recipe_collections::updated_at.desc())
        .select(Collection::as_select())
        .load(&mut conn)
    {
        Ok(collections) => {
            (StatusCode::OK, Json(CollectionsResponse { collections })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch collections: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch collections".to_string(),
                }),
            )
                .into_response()
        }
    }
}
