pub mod copy;
pub mod create;
pub mod list;
pub mod recipes;

use crate::schema::recipe_collections;
use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use diesel::prelude::*;
use utoipa::OpenApi;
use uuid::Uuid;

/// Returns the router for /api/collections endpoints (mounted at /api/collections)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_collections).post(create::create_collection))
        .route(
            "/{id}/recipes",
            get(recipes::list_collection_recipes).post(recipes::add_recipe),
        )
        .route("/{id}/recipes/{recipe_id}", delete(recipes::remove_recipe))
        .route("/{id}/recipes/{recipe_id}/copy", post(copy::edit_as_copy))
}

/// True when collection `id` exists and belongs to `user_id`.
pub fn owns_collection(conn: &mut PgConnection, id: Uuid, user_id: Uuid) -> QueryResult<bool> {
    recipe_collections::table
        .filter(recipe_collections::id.eq(id))
        .filter(recipe_collections::user_id.eq(user_id))
        .select(recipe_collections::id)
        .first::<Uuid>(conn)
        .optional()
        .map(|found| found.is_some())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_collections,
        create::create_collection,
        recipes::list_collection_recipes,
        recipes::add_recipe,
        recipes::remove_recipe,
        copy::edit_as_copy,
    ),
    components(schemas(
        crate::models::Collection,
        list::CollectionsResponse,
        create::CreateCollectionRequest,
        create::CreateCollectionResponse,
        recipes::AddRecipeRequest,
        copy::CopyResponse,
    ))
)]
pub struct ApiDoc;
