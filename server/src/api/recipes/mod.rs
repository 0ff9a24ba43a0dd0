pub mod comments;
pub mod create;
pub mod fork;
pub mod get;
pub mod likes;
pub mod list;
pub mod orphans;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes).
/// Reads are public; writes take `AuthUser` and reject anonymous callers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/orphans", get(orphans::list_orphans))
        .route("/by-slug/{slug}", get(get::get_recipe_by_slug))
        .route("/{id}/fork", post(fork::fork))
        .route(
            "/{id}/like",
            post(likes::like_recipe).delete(likes::unlike_recipe),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe_by_slug,
        fork::fork,
        likes::like_recipe,
        likes::unlike_recipe,
        comments::list_comments,
        comments::create_comment,
        orphans::list_orphans,
    ),
    components(schemas(
        list::ListRecipesResponse,
        list::RecipeListResponse,
        list::RecipeSummary,
        list::PaginationMetadata,
        list::CatalogSort,
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        get::RecipeResponse,
        get::SlugNotFoundResponse,
        fork::ForkResponse,
        likes::LikeResponse,
        comments::CommentResponse,
        comments::CommentsResponse,
        comments::CreateCommentRequest,
        comments::CreateCommentResponse,
        orphans::OrphanedCopy,
        orphans::OrphansResponse,
    ))
)]
pub struct ApiDoc;
