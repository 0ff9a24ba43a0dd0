use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RecipeRow;
use crate::raw_sql::{contains_pattern, count_over};
use crate::schema::recipes;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use larder_core::{DietaryFlags, Difficulty, Recipe};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

/// Catalog ordering
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSort {
    /// Most recently created first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Most liked first, newest breaking ties
    Popular,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Case-insensitive search over title and description
    pub q: Option<String>,
    pub category_id: Option<Uuid>,
    pub difficulty: Option<Difficulty>,
    pub vegetarian: Option<bool>,
    pub vegan: Option<bool>,
    pub gluten_free: Option<bool>,
    pub dairy_free: Option<bool>,
    pub nut_free: Option<bool>,
    /// Ordering (default: newest)
    #[serde(default)]
    pub sort: CatalogSort,
    /// Number of items to return (default: 50, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

/// Clamp client pagination to sane bounds.
fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        offset.unwrap_or(0).max(0),
    )
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Total number of items available
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Card-sized view of a recipe.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    /// Shareable path segment, e.g. `apple-pie-1f0a9b8c`
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
    pub image_url: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub dietary: DietaryFlags,
    pub category_id: Option<Uuid>,
    pub original_recipe_id: Option<Uuid>,
    pub is_public: bool,
    pub like_count: i32,
    pub fork_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        RecipeSummary {
            slug: recipe.slug(),
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            author_id: recipe.author_id,
            image_url: recipe.image_url,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            dietary: recipe.dietary,
            category_id: recipe.category_id,
            original_recipe_id: recipe.original_recipe_id,
            is_public: recipe.is_public,
            like_count: recipe.like_count,
            fork_count: recipe.fork_count,
            created_at: recipe.created_at,
        }
    }
}

impl From<RecipeRow> for RecipeSummary {
    fn from(row: RecipeRow) -> Self {
        Recipe::from(row).into()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub pagination: PaginationMetadata,
}

/// Unpaginated recipe list used by profile, category and collection views.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Public recipe catalog", body = ListRecipesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let (limit, offset) = page_bounds(params.limit, params.offset);

    let text_pattern = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(contains_pattern);

    let mut conn = get_conn!(pool);

    let mut query = recipes::table
        .filter(recipes::is_public.eq(true))
        .into_boxed();

    if let Some(ref pattern) = text_pattern {
        query = query.filter(
            recipes::title
                .ilike(pattern)
                .or(recipes::description.ilike(pattern)),
        );
    }
    if let Some(category_id) = params.category_id {
        query = query.filter(recipes::category_id.eq(category_id));
    }
    if let Some(difficulty) = params.difficulty {
        query = query.filter(recipes::difficulty.eq(difficulty.as_str()));
    }
    if let Some(v) = params.vegetarian {
        query = query.filter(recipes::is_vegetarian.eq(v));
    }
    if let Some(v) = params.vegan {
        query = query.filter(recipes::is_vegan.eq(v));
    }
    if let Some(v) = params.gluten_free {
        query = query.filter(recipes::is_gluten_free.eq(v));
    }
    if let Some(v) = params.dairy_free {
        query = query.filter(recipes::is_dairy_free.eq(v));
    }
    if let Some(v) = params.nut_free {
        query = query.filter(recipes::is_nut_free.eq(v));
    }

    let query = match params.sort {
        CatalogSort::Newest => query.order(recipes::created_at.desc()),
        CatalogSort::Oldest => query.order(recipes::created_at.asc()),
        CatalogSort::Popular => query.order((recipes::like_count.desc(), recipes::created_at.desc())),
    };

    let results: Vec<(RecipeRow, i64)> = match query
        .select((RecipeRow::as_select(), count_over()))
        .limit(limit)
        .offset(offset)
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch recipe catalog: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let total = results.first().map(|(_, total)| *total).unwrap_or(0);
    let recipes = results
        .into_iter()
        .map(|(row, _)| RecipeSummary::from(row))
        .collect();

    (
        StatusCode::OK,
        Json(ListRecipesResponse {
            recipes,
            pagination: PaginationMetadata {
                total,
                limit,
                offset,
            },
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_defaults() {
        assert_eq!(page_bounds(None, None), (50, 0));
    }

    #[test]
    fn test_page_bounds_clamps() {
        assert_eq!(page_bounds(Some(0), Some(-5)), (1, 0));
        assert_eq!(page_bounds(Some(500), Some(20)), (100, 20));
    }

    #[test]
    fn test_sort_parsing() {
        let sort: CatalogSort = serde_json::from_str("\"popular\"").unwrap();
        assert_eq!(sort, CatalogSort::Popular);
        let sort: CatalogSort = serde_json::from_str("\"oldest\"").unwrap();
        assert_eq!(sort, CatalogSort::Oldest);
        assert!(serde_json::from_str::<CatalogSort>("\"random\"").is_err());
    }

    #[test]
    fn test_params_default_to_newest() {
        let params: ListRecipesParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.sort, CatalogSort::Newest);
        assert!(params.difficulty.is_none());
    }
}
