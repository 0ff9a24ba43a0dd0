use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Category;
use crate::schema::categories;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories by name", body = CategoriesResponse)
    )
)]
pub async fn list_categories(State(pool): State<Arc<DbPool>>) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match categories::table
        .order(categories::name.asc())
        .select(Category::as_select())
        .load(&mut conn)
    {
        Ok(categories) => (StatusCode::OK, Json(CategoriesResponse { categories })).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch categories: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch categories".to_string(),
                }),
            )
                .into_response()
        }
    }
}
