use crate::db::DbPool;
use crate::schema::sessions;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use super::crypto::hash_token;

/// Caller identity resolved from a session token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Sessions are written by the identity provider; this side only reads them.
pub async fn get_identity_from_token(pool: &DbPool, token: &str) -> Option<Identity> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    let (id, email): (Uuid, Option<String>) = sessions::table
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select((sessions::user_id, sessions::email))
        .first(&mut conn)
        .ok()?;

    Some(Identity { id, email })
}
