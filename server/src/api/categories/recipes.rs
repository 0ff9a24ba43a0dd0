use crate::api::recipes::list::{RecipeListResponse, RecipeSummary};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RecipeRow;
use crate::schema::{categories, recipes};
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
    path = "/api/categories/{name}/recipes",
    tag = "categories",
    params(
        ("name" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Public recipes in the category, newest first", body = RecipeListResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn list_category_recipes(
    State(pool): State<Arc<DbPool>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let category_id: Uuid = match categories::table
        .filter(categories::name.eq(&name))
        .select(categories::id)
        .first(&mut conn)
    {
        Ok(id) => id,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Category not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to look up category {}: {}", name, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    match recipes::table
        .filter(recipes::category_id.eq(category_id))
        .filter(recipes::is_public.eq(true))
        .order(recipes::created_at.desc())
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
            tracing::error!("Failed to fetch recipes for category {}: {}", name, e);
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
