use crate::api::{fork_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::{fork_recipe, RecipeOverrides, RecipeStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ForkResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub original_recipe_id: Uuid,
    pub ingredient_count: usize,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/fork",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe to fork")
    ),
    responses(
        (status = 201, description = "Private copy created", body = ForkResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Copy failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn fork(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let store = PgStore::new(pool);

    let source = match store.get_aggregate(id).await {
        Ok(a) if a.recipe.visible_to(Some(user.id)) => a,
        Ok(_) | Err(StoreError::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load recipe {} for fork: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let overrides = RecipeOverrides::for_fork(&source.recipe.title);
    match fork_recipe(&store, &source, user.id, &overrides).await {
        Ok(copy) => (
            StatusCode::CREATED,
            Json(ForkResponse {
                slug: copy.recipe.slug(),
                id: copy.recipe.id,
                title: copy.recipe.title,
                original_recipe_id: source.recipe.id,
                ingredient_count: copy.ingredients.len(),
            }),
        )
            .into_response(),
        Err(e) => fork_error_response(&e),
    }
}
