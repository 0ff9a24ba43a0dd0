use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewProfile, Profile};
use crate::schema::profiles;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use diesel::prelude::*;
use larder_core::{allocate_username, base_username, username_candidates};
use std::collections::HashSet;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/profiles/me",
    tag = "profiles",
    responses(
        (status = 200, description = "Existing profile", body = Profile),
        (status = 201, description = "Profile created", body = Profile),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn bootstrap_profile(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let result: QueryResult<(Profile, bool)> = conn.transaction(|conn| {
        if let Some(existing) = profiles::table
            .find(user.id)
            .select(Profile::as_select())
            .first(conn)
            .optional()?
        {
            return Ok((existing, false));
        }

        let base = base_username(user.email.as_deref());
        let candidates: Vec<String> = username_candidates(&base).collect();
        let taken: HashSet<String> = profiles::table
            .filter(profiles::username.eq_any(&candidates))
            .select(profiles::username)
            .load::<String>(conn)?
            .into_iter()
            .collect();
        let username = allocate_username(&base, &taken, Utc::now().timestamp_millis());

        let profile = diesel::insert_into(profiles::table)
            .values(NewProfile {
                id: user.id,
                username: &username,
                full_name: None,
                avatar_url: None,
            })
            .returning(Profile::as_returning())
            .get_result(conn)?;
        Ok((profile, true))
    });

    match result {
        Ok((profile, true)) => {
            tracing::info!(user_id = %profile.id, username = %profile.username, "profile created");
            (StatusCode::CREATED, Json(profile)).into_response()
        }
        Ok((profile, false)) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            tracing::error!("Failed to bootstrap profile for {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create profile".to_string(),
                }),
            )
                .into_response()
        }
    }
}
