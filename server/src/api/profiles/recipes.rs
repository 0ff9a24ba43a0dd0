use crate::api::recipes::list::{RecipeListResponse, RecipeSummary};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RecipeRow;
use crate::schema::{recipe_likes, recipes};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

fn recipe_list(result: QueryResult<Vec<RecipeRow>>, profile_id: Uuid) -> Response {
    match result {
        Ok(rows) => (
            StatusCode::OK,
            Json(RecipeListResponse {
                recipes: rows.into_iter().map(RecipeSummary::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch recipes for profile {}: {}", profile_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}/recipes",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "The author's public recipes, newest first", body = RecipeListResponse)
    )
)]
pub async fn list_profile_recipes(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let result = recipes::table
        .filter(recipes::author_id.eq(id))
        .filter(recipes::is_public.eq(true))
        .order(recipes::created_at.desc())
        .select(RecipeRow::as_select())
        .load(&mut conn);

    recipe_list(result, id)
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}/likes",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Public recipes the profile liked", body = RecipeListResponse)
    )
)]
pub async fn list_profile_likes(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let result = recipe_likes::table
        .inner_join(recipes::table)
        .filter(recipe_likes::user_id.eq(id))
        .filter(recipes::is_public.eq(true))
        .order(recipe_likes::created_at.desc())
        .select(RecipeRow::as_select())
        .load(&mut conn);

    recipe_list(result, id)
}
