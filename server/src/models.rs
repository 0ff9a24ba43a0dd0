use chrono::{DateTime, Utc};
use diesel::prelude::*;
use larder_core::{DietaryFlags, Ingredient, NewIngredient, Recipe, RecipeDraft};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub full_name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub image_url: Option<String>,
    pub youtube_url: Option<String>,
    pub is_public: bool,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_nut_free: bool,
    pub category_id: Option<Uuid>,
    pub original_recipe_id: Option<Uuid>,
    pub fork_count: i32,
    pub like_count: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            description: row.description,
            instructions: row.instructions,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
            // The column has a CHECK constraint, so parsing only fails on schema drift
            difficulty: row.difficulty.and_then(|d| d.parse().ok()),
            image_url: row.image_url,
            youtube_url: row.youtube_url,
            is_public: row.is_public,
            dietary: DietaryFlags {
                vegetarian: row.is_vegetarian,
                vegan: row.is_vegan,
                gluten_free: row.is_gluten_free,
                dairy_free: row.is_dairy_free,
                nut_free: row.is_nut_free,
            },
            category_id: row.category_id,
            original_recipe_id: row.original_recipe_id,
            fork_count: row.fork_count,
            like_count: row.like_count,
            view_count: row.view_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub author_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub instructions: &'a str,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<&'static str>,
    pub image_url: Option<&'a str>,
    pub youtube_url: Option<&'a str>,
    pub is_public: bool,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_nut_free: bool,
    pub category_id: Option<Uuid>,
    pub original_recipe_id: Option<Uuid>,
}

impl<'a> From<&'a RecipeDraft> for NewRecipe<'a> {
    fn from(draft: &'a RecipeDraft) -> Self {
        NewRecipe {
            author_id: draft.author_id,
            title: &draft.title,
            description: draft.description.as_deref(),
            instructions: &draft.instructions,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            difficulty: draft.difficulty.map(|d| d.as_str()),
            image_url: draft.image_url.as_deref(),
            youtube_url: draft.youtube_url.as_deref(),
            is_public: draft.is_public,
            is_vegetarian: draft.dietary.vegetarian,
            is_vegan: draft.dietary.vegan,
            is_gluten_free: draft.dietary.gluten_free,
            is_dairy_free: draft.dietary.dairy_free,
            is_nut_free: draft.dietary.nut_free,
            category_id: draft.category_id,
            original_recipe_id: draft.original_recipe_id,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IngredientRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    pub amount: String,
    pub unit: Option<String>,
    pub order_index: i32,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient {
            id: row.id,
            recipe_id: row.recipe_id,
            name: row.name,
            amount: row.amount,
            unit: row.unit,
            order_index: row.order_index,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewIngredientRow<'a> {
    pub recipe_id: Uuid,
    pub name: &'a str,
    pub amount: &'a str,
    pub unit: Option<&'a str>,
    pub order_index: i32,
}

impl<'a> From<&'a NewIngredient> for NewIngredientRow<'a> {
    fn from(row: &'a NewIngredient) -> Self {
        NewIngredientRow {
            recipe_id: row.recipe_id,
            name: &row.name,
            amount: &row.amount,
            unit: row.unit.as_deref(),
            order_index: row.order_index,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_likes)]
pub struct NewLike {
    pub recipe_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_comments)]
pub struct NewComment<'a> {
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub content: &'a str,
    pub parent_comment_id: Option<Uuid>,
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::recipe_collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_collections)]
pub struct NewCollection<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub is_public: bool,
    pub user_id: Uuid,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::collection_recipes)]
pub struct NewCollectionRecipe {
    pub collection_id: Uuid,
    pub recipe_id: Uuid,
}
