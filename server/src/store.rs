//! Postgres implementation of the core record store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use larder_core::{
    Ingredient, NewIngredient, Recipe, RecipeAggregate, RecipeDraft, RecipeStore, StoreError,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::id_matches_suffix;
use crate::models::{IngredientRow, NewCollectionRecipe, NewIngredientRow, NewRecipe, RecipeRow};
use crate::raw_sql::suffix_pattern;
use crate::schema::{collection_recipes, recipe_ingredients, recipes};

pub struct PgStore {
    pool: Arc<DbPool>,
}

impl PgStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

pub fn store_error(e: DieselError) -> StoreError {
    match e {
        DieselError::NotFound => StoreError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::UniqueViolation(info.constraint_name().unwrap_or("unknown").to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

/// Load ingredients for one recipe in display order.
pub fn load_ingredients(
    conn: &mut PgConnection,
    recipe_id: Uuid,
) -> Result<Vec<Ingredient>, DieselError> {
    let rows: Vec<IngredientRow> = recipe_ingredients::table
        .filter(recipe_ingredients::recipe_id.eq(recipe_id))
        .order(recipe_ingredients::order_index.asc())
        .select(IngredientRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Ingredient::from).collect())
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn insert_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;
        let row: RecipeRow = diesel::insert_into(recipes::table)
            .values(NewRecipe::from(draft))
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn insert_ingredients(
        &self,
        rows: &[NewIngredient],
    ) -> Result<Vec<Ingredient>, StoreError> {
        let mut conn = self.conn()?;
        let values: Vec<NewIngredientRow> = rows.iter().map(NewIngredientRow::from).collect();
        let inserted: Vec<IngredientRow> = diesel::insert_into(recipe_ingredients::table)
            .values(&values)
            .returning(IngredientRow::as_returning())
            .get_results(&mut conn)
            .map_err(store_error)?;
        Ok(inserted.into_iter().map(Ingredient::from).collect())
    }

    async fn get_aggregate(&self, id: Uuid) -> Result<RecipeAggregate, StoreError> {
        let mut conn = self.conn()?;
        let recipe: RecipeRow = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .map_err(store_error)?;
        let ingredients = load_ingredients(&mut conn, id).map_err(store_error)?;
        Ok(RecipeAggregate {
            recipe: recipe.into(),
            ingredients,
        })
    }

    async fn find_by_id_suffix(
        &self,
        suffix: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;
        let rows: Vec<RecipeRow> = recipes::table
            .filter(id_matches_suffix!(suffix_pattern(suffix)))
            .select(RecipeRow::as_select())
            .limit(limit as i64)
            .load(&mut conn)
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn remove_from_collection(
        &self,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<u64, StoreError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            collection_recipes::table
                .filter(collection_recipes::collection_id.eq(collection_id))
                .filter(collection_recipes::recipe_id.eq(recipe_id)),
        )
        .execute(&mut conn)
        .map_err(store_error)?;
        Ok(deleted as u64)
    }

    async fn add_to_collection(
        &self,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        diesel::insert_into(collection_recipes::table)
            .values(NewCollectionRecipe {
                collection_id,
                recipe_id,
            })
            .execute(&mut conn)
            .map_err(store_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_maps_to_store_conflict() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value violates unique constraint")),
        );
        assert_eq!(
            store_error(err),
            StoreError::UniqueViolation("unknown".to_string())
        );
    }

    #[test]
    fn test_other_diesel_errors_map_to_backend() {
        assert_eq!(store_error(DieselError::NotFound), StoreError::NotFound);

        let err = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(String::from("insert violates foreign key constraint")),
        );
        assert!(matches!(store_error(err), StoreError::Backend(_)));
    }
}
