mod crypto;
mod db;
mod extractor;
mod middleware;

pub use extractor::{AuthUser, MaybeAuthUser};
pub use middleware::require_auth;
