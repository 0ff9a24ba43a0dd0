use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewLike;
use crate::schema::{recipe_likes, recipes};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LikeResponse {
    pub recipe_id: Uuid,
    pub liked: bool,
    pub like_count: i32,
}

fn like_count(conn: &mut PgConnection, recipe_id: Uuid) -> QueryResult<i32> {
    recipes::table
        .find(recipe_id)
        .select(recipes::like_count)
        .first(conn)
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/like",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Recipe liked", body = LikeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Already liked", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn like_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    // Only recipes the caller can see are likeable
    let visible: bool = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::is_public.eq(true).or(recipes::author_id.eq(user.id)))
        .select(recipes::id)
        .first::<Uuid>(&mut conn)
        .optional()
    {
        Ok(found) => found.is_some(),
        Err(e) => {
            tracing::error!("Failed to look up recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to like recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !visible {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    let result = diesel::insert_into(recipe_likes::table)
        .values(NewLike {
            recipe_id: id,
            user_id: user.id,
        })
        .execute(&mut conn)
        .and_then(|_| like_count(&mut conn, id));

    match result {
        Ok(like_count) => (
            StatusCode::CREATED,
            Json(LikeResponse {
                recipe_id: id,
                liked: true,
                like_count,
            }),
        )
            .into_response(),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "You already like this recipe".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to like recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to like recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/like",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Like removed", body = LikeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No like to remove", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn unlike_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let result = diesel::delete(
        recipe_likes::table
            .filter(recipe_likes::recipe_id.eq(id))
            .filter(recipe_likes::user_id.eq(user.id)),
    )
    .execute(&mut conn);

    match result {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Like not found".to_string(),
            }),
        )
            .into_response(),
        Ok(_) => match like_count(&mut conn, id) {
            Ok(like_count) => (
                StatusCode::OK,
                Json(LikeResponse {
                    recipe_id: id,
                    liked: false,
                    like_count,
                }),
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to read like count for {}: {}", id, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to unlike recipe".to_string(),
                    }),
                )
                    .into_response()
            }
        },
        Err(e) => {
            tracing::error!("Failed to unlike recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to unlike recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
