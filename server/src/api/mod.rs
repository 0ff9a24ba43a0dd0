pub mod categories;
pub mod collections;
pub mod favorites;
pub mod profiles;
pub mod public;
pub mod recipes;
pub mod testing;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use larder_core::{ForkError, Ingredient, IngredientInput, RecipeOverrides};
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// 400 for rejected overrides, otherwise 500. Names the copy when one was
/// already written.
pub fn fork_error_response(e: &ForkError) -> Response {
    if let ForkError::Invalid(message) = e {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    tracing::error!(error = %e, copy_id = ?e.created_copy(), "recipe copy failed");
    let error = match e.created_copy() {
        Some(copy_id) => format!("Recipe copy {} was created but not completed", copy_id),
        None => "Failed to copy recipe".to_string(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error }),
    )
        .into_response()
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, Ingredient, IngredientInput, RecipeOverrides)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        categories::ApiDoc::openapi(),
        profiles::ApiDoc::openapi(),
        collections::ApiDoc::openapi(),
        favorites::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_module() {
        let spec = openapi();
        for path in [
            "/api/test/unauthed-ping",
            "/api/test/ping",
            "/api/recipes",
            "/api/recipes/by-slug/{slug}",
            "/api/recipes/{id}/fork",
            "/api/recipes/orphans",
            "/api/categories/{name}/recipes",
            "/api/profiles/me",
            "/api/favorites",
            "/api/collections/{id}/recipes/{recipe_id}/copy",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_fork_error_is_server_error() {
        let copy_id = uuid::Uuid::new_v4();
        let err = ForkError::Ingredients {
            recipe_id: copy_id,
            source: larder_core::StoreError::Backend("boom".to_string()),
        };
        let response = fork_error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_copy_is_bad_request() {
        let response = fork_error_response(&ForkError::Invalid("Title cannot be empty"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
