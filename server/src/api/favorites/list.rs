use crate::api::recipes::list::{RecipeListResponse, RecipeSummary};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RecipeRow;
use crate::schema::{recipe_likes, recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Recipes the caller liked, most recent like first", body = RecipeListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_favorites(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    // A liked recipe that has since gone private stays hidden unless it's the caller's own
    match recipe_likes::table
        .inner_join(recipes::table)
        .filter(recipe_likes::user_id.eq(user.id))
        .filter(recipes::is_public.eq(true).or(recipes::author_id.eq(user.id)))
        .order(recipe_likes::created_at.desc())
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
            tracing::error!("Failed to fetch favorites: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch favorites".to_string(),
                }),
            )
                .into_response()
        }
    }
}
