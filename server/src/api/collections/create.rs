use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewCollection;
use crate::schema::recipe_collections;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCollectionRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateCollectionResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/collections",
    tag = "collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 201, description = "Collection created", body = CreateCollectionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_collection(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateCollectionRequest>,
) -> impl IntoResponse {
    let name = request.name.trim();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Collection name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let result: QueryResult<Uuid> = diesel::insert_into(recipe_collections::table)
        .values(NewCollection {
            name,
            description: request.description.as_deref(),
            is_public: request.is_public,
            user_id: user.id,
        })
        .returning(recipe_collections::id)
        .get_result(&mut conn);

    match result {
        Ok(id) => (StatusCode::CREATED, Json(CreateCollectionResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to create collection: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create collection".to_string(),
                }),
            )
                .into_response()
        }
    }
}
