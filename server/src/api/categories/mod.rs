pub mod list;
pub mod recipes;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/categories endpoints (mounted at /api/categories)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_categories))
        .route("/{name}/recipes", get(recipes::list_category_recipes))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_categories, recipes::list_category_recipes),
    components(schemas(list::CategoriesResponse, crate::models::Category))
)]
pub struct ApiDoc;
