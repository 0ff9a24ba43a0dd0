use crate::api::ErrorResponse;
use crate::auth::{AuthUser, MaybeAuthUser};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewComment;
use crate::schema::{profiles, recipe_comments, recipes};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub content: String,
    pub parent_comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentsResponse {
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub content: String,
    /// Reply target, if any
    pub parent_comment_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateCommentResponse {
    pub id: Uuid,
}

#[derive(Queryable)]
struct CommentWithAuthor {
    id: Uuid,
    recipe_id: Uuid,
    user_id: Uuid,
    content: String,
    parent_comment_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    username: String,
    full_name: Option<String>,
}

/// True when the recipe exists and `viewer` may see it.
fn recipe_visible(conn: &mut PgConnection, id: Uuid, viewer: Option<Uuid>) -> QueryResult<bool> {
    let found: Option<(bool, Uuid)> = recipes::table
        .find(id)
        .select((recipes::is_public, recipes::author_id))
        .first(conn)
        .optional()?;
    Ok(matches!(found, Some((is_public, author)) if is_public || viewer == Some(author)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/comments",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Comments, newest first", body = CommentsResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_comments(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match recipe_visible(&mut conn, id, viewer.map(|v| v.id)) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to look up recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch comments".to_string(),
                }),
            )
                .into_response();
        }
    }

    let rows: Vec<CommentWithAuthor> = match recipe_comments::table
        .inner_join(profiles::table)
        .filter(recipe_comments::recipe_id.eq(id))
        .order(recipe_comments::created_at.desc())
        .select((
            recipe_comments::id,
            recipe_comments::recipe_id,
            recipe_comments::user_id,
            recipe_comments::content,
            recipe_comments::parent_comment_id,
            recipe_comments::created_at,
            profiles::username,
            profiles::full_name,
        ))
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch comments for {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch comments".to_string(),
                }),
            )
                .into_response();
        }
    };

    let comments = rows
        .into_iter()
        .map(|c| CommentResponse {
            id: c.id,
            recipe_id: c.recipe_id,
            user_id: c.user_id,
            username: c.username,
            full_name: c.full_name,
            content: c.content,
            parent_comment_id: c.parent_comment_id,
            created_at: c.created_at,
        })
        .collect();

    (StatusCode::OK, Json(CommentsResponse { comments })).into_response()
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/comments",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CreateCommentResponse),
        (status = 400, description = "Empty comment", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> impl IntoResponse {
    let content = request.content.trim();
    if content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Comment cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    match recipe_visible(&mut conn, id, Some(user.id)) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to look up recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add comment".to_string(),
                }),
            )
                .into_response();
        }
    }

    let result: QueryResult<Uuid> = diesel::insert_into(recipe_comments::table)
        .values(NewComment {
            recipe_id: id,
            user_id: user.id,
            content,
            parent_comment_id: request.parent_comment_id,
        })
        .returning(recipe_comments::id)
        .get_result(&mut conn);

    match result {
        Ok(comment_id) => (
            StatusCode::CREATED,
            Json(CreateCommentResponse { id: comment_id }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to add comment to {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add comment".to_string(),
                }),
            )
                .into_response()
        }
    }
}
