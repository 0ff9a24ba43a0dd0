//! Record store abstraction.
//!
//! The core never talks to a database directly. Everything it needs from the
//! store goes through [`RecipeStore`], implemented over Postgres by the server
//! and in memory by [`MemoryStore`] for tests.

mod memory;

pub use memory::{MemoryStore, StoreOp};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{Ingredient, NewIngredient, Recipe, RecipeAggregate, RecipeDraft};

/// Store operations used by the fork workflow and slug resolution.
///
/// Each call is atomic on its own; nothing spans calls.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert one recipe and return it with its generated id and zeroed counters.
    async fn insert_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, StoreError>;

    /// Insert ingredient rows as one batch.
    async fn insert_ingredients(&self, rows: &[NewIngredient])
        -> Result<Vec<Ingredient>, StoreError>;

    /// Load a recipe and its ingredients ordered by `order_index`.
    async fn get_aggregate(&self, id: Uuid) -> Result<RecipeAggregate, StoreError>;

    /// Recipes whose id ends with `suffix`, at most `limit` of them.
    async fn find_by_id_suffix(&self, suffix: &str, limit: usize)
        -> Result<Vec<Recipe>, StoreError>;

    /// Delete the membership row; returns how many rows went away.
    async fn remove_from_collection(
        &self,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<u64, StoreError>;

    /// Add a membership row. Fails with [`StoreError::UniqueViolation`] when the
    /// recipe is already in the collection.
    async fn add_to_collection(&self, collection_id: Uuid, recipe_id: Uuid)
        -> Result<(), StoreError>;
}
