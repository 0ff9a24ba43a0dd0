pub mod get;
pub mod me;
pub mod recipes;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/profiles endpoints (mounted at /api/profiles)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", post(me::bootstrap_profile))
        .route("/{id}", get(get::get_profile))
        .route("/{id}/recipes", get(recipes::list_profile_recipes))
        .route("/{id}/likes", get(recipes::list_profile_likes))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get::get_profile,
        me::bootstrap_profile,
        recipes::list_profile_recipes,
        recipes::list_profile_likes,
    ),
    components(schemas(crate::models::Profile))
)]
pub struct ApiDoc;
