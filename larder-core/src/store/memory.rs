//! In-memory store for tests.
//!
//! Behaves like the Postgres store for the operations the core uses, and can be
//! told to fail specific operations to exercise partial-failure paths.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::RwLock;
use uuid::Uuid;

use super::RecipeStore;
use crate::error::StoreError;
use crate::types::{Ingredient, NewIngredient, Recipe, RecipeAggregate, RecipeDraft};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    InsertRecipe,
    InsertIngredients,
    GetAggregate,
    FindBySuffix,
    RemoveFromCollection,
    AddToCollection,
}

#[derive(Debug, Default)]
struct State {
    recipes: Vec<Recipe>,
    ingredients: Vec<Ingredient>,
    memberships: Vec<(Uuid, Uuid)>,
    failing: HashSet<StoreOp>,
    calls: Vec<StoreOp>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future call of `op` fail with a backend error.
    pub fn fail_on(&self, op: StoreOp) {
        self.state.write().unwrap().failing.insert(op);
    }

    /// Store a recipe as-is, keeping its id and counters.
    pub fn seed(&self, aggregate: RecipeAggregate) {
        let mut state = self.state.write().unwrap();
        state.recipes.push(aggregate.recipe);
        state.ingredients.extend(aggregate.ingredients);
    }

    pub fn seed_membership(&self, collection_id: Uuid, recipe_id: Uuid) {
        self.state
            .write()
            .unwrap()
            .memberships
            .push((collection_id, recipe_id));
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.state.read().unwrap().recipes.clone()
    }

    pub fn ingredients_of(&self, recipe_id: Uuid) -> Vec<Ingredient> {
        let state = self.state.read().unwrap();
        let mut rows: Vec<Ingredient> = state
            .ingredients
            .iter()
            .filter(|i| i.recipe_id == recipe_id)
            .cloned()
            .collect();
        rows.sort_by_key(|i| i.order_index);
        rows
    }

    pub fn collection_members(&self, collection_id: Uuid) -> Vec<Uuid> {
        self.state
            .read()
            .unwrap()
            .memberships
            .iter()
            .filter(|(c, _)| *c == collection_id)
            .map(|(_, r)| *r)
            .collect()
    }

    /// Operations called so far, in order.
    pub fn calls(&self) -> Vec<StoreOp> {
        self.state.read().unwrap().calls.clone()
    }

    fn begin(&self, op: StoreOp) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap();
        state.calls.push(op);
        if state.failing.contains(&op) {
            return Err(StoreError::Backend(format!("injected failure: {:?}", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn insert_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, StoreError> {
        self.begin(StoreOp::InsertRecipe)?;

        let now = Utc::now();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            author_id: draft.author_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            instructions: draft.instructions.clone(),
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            difficulty: draft.difficulty,
            image_url: draft.image_url.clone(),
            youtube_url: draft.youtube_url.clone(),
            is_public: draft.is_public,
            dietary: draft.dietary,
            category_id: draft.category_id,
            original_recipe_id: draft.original_recipe_id,
            fork_count: 0,
            like_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.write().unwrap();
        // Mirrors the fork_count trigger in the Postgres schema.
        if let Some(origin) = draft.original_recipe_id {
            if let Some(parent) = state.recipes.iter_mut().find(|r| r.id == origin) {
                parent.fork_count += 1;
            }
        }
        state.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn insert_ingredients(
        &self,
        rows: &[NewIngredient],
    ) -> Result<Vec<Ingredient>, StoreError> {
        self.begin(StoreOp::InsertIngredients)?;

        let mut state = self.state.write().unwrap();
        for row in rows {
            if !state.recipes.iter().any(|r| r.id == row.recipe_id) {
                return Err(StoreError::Backend(format!(
                    "foreign key violation: recipe {} does not exist",
                    row.recipe_id
                )));
            }
        }

        let inserted: Vec<Ingredient> = rows
            .iter()
            .map(|row| Ingredient {
                id: Uuid::new_v4(),
                recipe_id: row.recipe_id,
                name: row.name.clone(),
                amount: row.amount.clone(),
                unit: row.unit.clone(),
                order_index: row.order_index,
            })
            .collect();
        state.ingredients.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn get_aggregate(&self, id: Uuid) -> Result<RecipeAggregate, StoreError> {
        self.begin(StoreOp::GetAggregate)?;

        let recipe = self
            .state
            .read()
            .unwrap()
            .recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        Ok(RecipeAggregate {
            ingredients: self.ingredients_of(id),
            recipe,
        })
    }

    async fn find_by_id_suffix(
        &self,
        suffix: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, StoreError> {
        self.begin(StoreOp::FindBySuffix)?;

        Ok(self
            .state
            .read()
            .unwrap()
            .recipes
            .iter()
            .filter(|r| r.id.to_string().ends_with(suffix))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn remove_from_collection(
        &self,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<u64, StoreError> {
        self.begin(StoreOp::RemoveFromCollection)?;

        let mut state = self.state.write().unwrap();
        let before = state.memberships.len();
        state
            .memberships
            .retain(|m| *m != (collection_id, recipe_id));
        Ok((before - state.memberships.len()) as u64)
    }

    async fn add_to_collection(
        &self,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<(), StoreError> {
        self.begin(StoreOp::AddToCollection)?;

        let mut state = self.state.write().unwrap();
        if state.memberships.contains(&(collection_id, recipe_id)) {
            return Err(StoreError::UniqueViolation(
                "collection_recipes_collection_id_recipe_id_key".to_string(),
            ));
        }
        state.memberships.push((collection_id, recipe_id));
        Ok(())
    }
}
