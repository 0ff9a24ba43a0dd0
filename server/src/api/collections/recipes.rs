use super::owns_collection;
use crate::api::recipes::list::{RecipeListResponse, RecipeSummary};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RecipeRow;
use crate::schema::{collection_recipes, recipes};
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use larder_core::{RecipeStore, StoreError};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddRecipeRequest {
    pub recipe_id: Uuid,
}

fn collection_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Collection not found".to_string(),
        }),
    )
        .into_response()
}

fn server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// 409 when the recipe is already a member, otherwise 500.
pub fn membership_error_response(e: &StoreError) -> Response {
    match e {
        StoreError::UniqueViolation(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Recipe is already in this collection".to_string(),
            }),
        )
            .into_response(),
        _ => server_error("Failed to add recipe"),
    }
}

#[utoipa::path(
    get,
    path = "/api/collections/{id}/recipes",
    tag = "collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Recipes in the collection, most recently added first", body = RecipeListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Collection not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_collection_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match owns_collection(&mut conn, id, user.id) {
        Ok(true) => {}
        Ok(false) => return collection_not_found(),
        Err(e) => {
            tracing::error!("Failed to look up collection {}: {}", id, e);
            return server_error("Failed to fetch collection");
        }
    }

    match collection_recipes::table
        .inner_join(recipes::table)
        .filter(collection_recipes::collection_id.eq(id))
        .order(collection_recipes::added_at.desc())
        .select(RecipeRow::as_select())
        .load::<RecipeRow>(&mut conn)
    {
        Ok(rows) => (
            StatusCode::OK,
            Json(RecipeListResponse {
                recipes: rows.into_iter().map(RecipeSummary::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch recipes for collection {}: {}", id, e);
            server_error("Failed to fetch collection")
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/collections/{id}/recipes",
    tag = "collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID")
    ),
    request_body = AddRecipeRequest,
    responses(
        (status = 201, description = "Recipe added"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Collection or recipe not found", body = ErrorResponse),
        (status = 409, description = "Recipe already in the collection", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddRecipeRequest>,
) -> impl IntoResponse {
    {
        let mut conn = get_conn!(pool);

        match owns_collection(&mut conn, id, user.id) {
            Ok(true) => {}
            Ok(false) => return collection_not_found(),
            Err(e) => {
                tracing::error!("Failed to look up collection {}: {}", id, e);
                return server_error("Failed to add recipe");
            }
        }

        let visible = recipes::table
            .filter(recipes::id.eq(request.recipe_id))
            .filter(recipes::is_public.eq(true).or(recipes::author_id.eq(user.id)))
            .select(recipes::id)
            .first::<Uuid>(&mut conn)
            .optional();
        match visible {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: "Recipe not found".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                tracing::error!("Failed to look up recipe {}: {}", request.recipe_id, e);
                return server_error("Failed to add recipe");
            }
        }
    }

    let store = PgStore::new(pool);
    match store.add_to_collection(id, request.recipe_id).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => {
            if !matches!(e, StoreError::UniqueViolation(_)) {
                tracing::error!("Failed to add recipe to collection {}: {}", id, e);
            }
            membership_error_response(&e)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/collections/{id}/recipes/{recipe_id}",
    tag = "collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID"),
        ("recipe_id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Collection or membership not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path((id, recipe_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    {
        let mut conn = get_conn!(pool);
        match owns_collection(&mut conn, id, user.id) {
            Ok(true) => {}
            Ok(false) => return collection_not_found(),
            Err(e) => {
                tracing::error!("Failed to look up collection {}: {}", id, e);
                return server_error("Failed to remove recipe");
            }
        }
    }

    let store = PgStore::new(pool);
    match store.remove_from_collection(id, recipe_id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe is not in this collection".to_string(),
            }),
        )
            .into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to remove recipe from collection {}: {}", id, e);
            server_error("Failed to remove recipe")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_membership_is_conflict() {
        let err = StoreError::UniqueViolation(
            "collection_recipes_collection_id_recipe_id_key".to_string(),
        );
        assert_eq!(
            membership_error_response(&err).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_other_membership_failures_are_server_errors() {
        for err in [
            StoreError::Backend("boom".to_string()),
            StoreError::Unavailable("pool timeout".to_string()),
            StoreError::NotFound,
        ] {
            assert_eq!(
                membership_error_response(&err).status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
