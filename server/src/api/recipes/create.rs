use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewIngredientRow, NewRecipe, RecipeRow};
use crate::schema::{recipe_ingredients, recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use larder_core::{
    ingredient_batch, validate_recipe_fields, DietaryFlags, Difficulty, IngredientInput, Recipe,
    RecipeDraft,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

fn default_public() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub image_url: Option<String>,
    pub youtube_url: Option<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub dietary: DietaryFlags,
    pub category_id: Option<Uuid>,
    /// Rows with a blank name or amount are dropped
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
}

impl CreateRecipeRequest {
    fn validate(&self) -> Result<(), &'static str> {
        validate_recipe_fields(
            Some(&self.title),
            Some(&self.instructions),
            self.prep_time,
            self.cook_time,
            self.servings,
        )
    }

    fn into_draft(self, author_id: Uuid) -> (RecipeDraft, Vec<IngredientInput>) {
        let draft = RecipeDraft {
            author_id,
            title: self.title,
            description: self.description.filter(|d| !d.trim().is_empty()),
            instructions: self.instructions,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
            youtube_url: self.youtube_url.filter(|u| !u.trim().is_empty()),
            is_public: self.is_public,
            dietary: self.dietary,
            category_id: self.category_id,
            original_recipe_id: None,
        };
        (draft, self.ingredients)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
    pub slug: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(message) = request.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);
    let (draft, inputs) = request.into_draft(user.id);

    // Recipe and ingredients commit together
    let result: Result<Recipe, diesel::result::Error> = conn.transaction(|conn| {
        let row: RecipeRow = diesel::insert_into(recipes::table)
            .values(NewRecipe::from(&draft))
            .returning(RecipeRow::as_returning())
            .get_result(conn)?;

        let batch = ingredient_batch(row.id, &inputs);
        if !batch.is_empty() {
            let rows: Vec<NewIngredientRow> = batch.iter().map(NewIngredientRow::from).collect();
            diesel::insert_into(recipe_ingredients::table)
                .values(&rows)
                .execute(conn)?;
        }

        Ok(row.into())
    });

    match result {
        Ok(recipe) => {
            tracing::info!(recipe_id = %recipe.id, author_id = %user.id, "recipe created");
            (
                StatusCode::CREATED,
                Json(CreateRecipeResponse {
                    slug: recipe.slug(),
                    id: recipe.id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, instructions: &str) -> CreateRecipeRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "instructions": instructions,
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = request("Soup", "Boil");
        assert!(req.is_public);
        assert!(req.ingredients.is_empty());
        assert_eq!(req.dietary, DietaryFlags::default());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert_eq!(request("  ", "Boil").validate(), Err("Title cannot be empty"));
        assert_eq!(
            request("Soup", "\n").validate(),
            Err("Instructions cannot be empty")
        );
        assert_eq!(request("Soup", "Boil").validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut req = request("Soup", "Boil");
        req.servings = Some(0);
        assert_eq!(req.validate(), Err("Servings must be at least 1"));
        req.servings = None;
        req.cook_time = Some(-1);
        assert_eq!(req.validate(), Err("Times cannot be negative"));
    }

    #[test]
    fn test_validate_caps_title_length() {
        let title = "a".repeat(larder_core::MAX_TITLE_LEN);
        assert_eq!(request(&title, "Boil").validate(), Ok(()));
        let title = "a".repeat(larder_core::MAX_TITLE_LEN + 1);
        assert_eq!(
            request(&title, "Boil").validate(),
            Err("Title must be at most 255 characters")
        );
    }

    #[test]
    fn test_draft_is_an_original() {
        let author = Uuid::new_v4();
        let mut req = request("Soup", "Boil");
        req.image_url = Some(" ".to_string());
        let (draft, _) = req.into_draft(author);
        assert_eq!(draft.author_id, author);
        assert!(draft.original_recipe_id.is_none());
        assert!(draft.image_url.is_none());
    }
}
