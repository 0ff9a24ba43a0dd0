use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::db::DbPool;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use larder_core::{resolve_slug, Ingredient, Recipe, RecipeAggregate, FALLBACK_ROUTE};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub slug: String,
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
}

impl From<RecipeAggregate> for RecipeResponse {
    fn from(aggregate: RecipeAggregate) -> Self {
        RecipeResponse {
            slug: aggregate.recipe.slug(),
            recipe: aggregate.recipe,
            ingredients: aggregate.ingredients,
        }
    }
}

/// 404 body for slugs that don't lead to a viewable recipe.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlugNotFoundResponse {
    pub error: String,
    /// Where the client should send the visitor instead
    pub fallback: String,
}

fn not_found_with_fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(SlugNotFoundResponse {
            error: "Recipe not found".to_string(),
            fallback: FALLBACK_ROUTE.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/recipes/by-slug/{slug}",
    tag = "recipes",
    params(
        ("slug" = String, Path, description = "Recipe slug, e.g. apple-pie-1f0a9b8c")
    ),
    responses(
        (status = 200, description = "Recipe with ingredients", body = RecipeResponse),
        (status = 404, description = "No viewable recipe for this slug", body = SlugNotFoundResponse),
        (status = 500, description = "Lookup failed", body = ErrorResponse)
    )
)]
pub async fn get_recipe_by_slug(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let store = PgStore::new(pool);
    let viewer_id = viewer.map(|v| v.id);

    match resolve_slug(&store, &slug).await {
        Ok(aggregate) if aggregate.recipe.visible_to(viewer_id) => {
            (StatusCode::OK, Json(RecipeResponse::from(aggregate))).into_response()
        }
        // Private recipes look exactly like missing ones
        Ok(_) => not_found_with_fallback(),
        Err(e) if e.falls_back() => {
            tracing::debug!(slug = %slug, reason = %e, "slug did not resolve");
            not_found_with_fallback()
        }
        Err(e) => {
            tracing::error!("Failed to resolve recipe slug {}: {}", slug, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
