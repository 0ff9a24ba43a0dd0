use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{recipe_ingredients, recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::dsl::{exists, not};
use diesel::prelude::*;
use larder_core::recipe_slug;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// A copy with no ingredient rows, most likely because its ingredient batch
/// never landed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrphanedCopy {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub original_recipe_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrphansResponse {
    pub recipes: Vec<OrphanedCopy>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/orphans",
    tag = "recipes",
    responses(
        (status = 200, description = "Caller's copies with no ingredient rows. Copies that are empty on purpose are listed too: forks of ingredient-less recipes, and edited copies whose ingredient rows were all blank", body = OrphansResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
/// Lists the caller's copies that have no ingredient rows.
///
/// Emptiness is the only signal, so a fork of a recipe with no ingredients, or
/// an edit-as-copy whose ingredient rows were all blank, shows up here even
/// though nothing failed. Check the original before deleting a listed copy.
pub async fn list_orphans(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<(Uuid, String, Option<Uuid>, DateTime<Utc>)> = match recipes::table
        .filter(recipes::author_id.eq(user.id))
        .filter(recipes::original_recipe_id.is_not_null())
        .filter(not(exists(
            recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipes::id)),
        )))
        .order(recipes::created_at.desc())
        .select((
            recipes::id,
            recipes::title,
            recipes::original_recipe_id,
            recipes::created_at,
        ))
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch orphaned copies: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let recipes = rows
        .into_iter()
        .filter_map(|(id, title, origin, created_at)| {
            Some(OrphanedCopy {
                slug: recipe_slug(&title, &id.to_string()),
                id,
                title,
                original_recipe_id: origin?,
                created_at,
            })
        })
        .collect();

    (StatusCode::OK, Json(OrphansResponse { recipes })).into_response()
}
