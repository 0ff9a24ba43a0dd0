use super::owns_collection;
use crate::api::recipes::get::RecipeResponse;
use crate::api::{fork_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::collection_recipes;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use larder_core::{RecipeOverrides, RecipeStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyResponse {
    pub collection_id: Uuid,
    /// The recipe the copy replaced in the collection
    pub replaced_recipe_id: Uuid,
    pub copy: RecipeResponse,
}

#[utoipa::path(
    post,
    path = "/api/collections/{id}/recipes/{recipe_id}/copy",
    tag = "collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID"),
        ("recipe_id" = Uuid, Path, description = "Recipe in the collection to copy")
    ),
    request_body = RecipeOverrides,
    responses(
        (status = 201, description = "Edited copy created and swapped into the collection", body = CopyResponse),
        (status = 400, description = "Invalid overrides", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Collection or membership not found", body = ErrorResponse),
        (status = 500, description = "Copy failed; the message names any copy already written", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_as_copy(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path((id, recipe_id)): Path<(Uuid, Uuid)>,
    Json(overrides): Json<RecipeOverrides>,
) -> impl IntoResponse {
    if let Err(message) = overrides.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    {
        let mut conn = get_conn!(pool);

        let member = owns_collection(&mut conn, id, user.id).and_then(|owned| {
            if !owned {
                return Ok(false);
            }
            collection_recipes::table
                .filter(collection_recipes::collection_id.eq(id))
                .filter(collection_recipes::recipe_id.eq(recipe_id))
                .select(collection_recipes::id)
                .first::<Uuid>(&mut conn)
                .optional()
                .map(|found| found.is_some())
        });

        match member {
            Ok(true) => {}
            Ok(false) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: "Recipe is not in this collection".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                tracing::error!("Failed to check collection {} membership: {}", id, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to copy recipe".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    }

    let store = PgStore::new(pool);

    let source = match store.get_aggregate(recipe_id).await {
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
            tracing::error!("Failed to load recipe {} for copy: {}", recipe_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    match larder_core::edit_as_copy(&store, id, &source, user.id, &overrides).await {
        Ok(copy) => (
            StatusCode::CREATED,
            Json(CopyResponse {
                collection_id: id,
                replaced_recipe_id: recipe_id,
                copy: copy.into(),
            }),
        )
            .into_response(),
        Err(e) => fork_error_response(&e),
    }
}
