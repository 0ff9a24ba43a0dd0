//! Forking and edit-as-copy.
//!
//! A fork is a new, private recipe owned by the actor that points back at the
//! recipe it was copied from. The source aggregate is only read. The store gives
//! no transaction across calls, so the steps run in a fixed order and a failure
//! stops everything after it:
//!
//! 1. insert the recipe (yields the new id)
//! 2. insert the ingredient batch for that id
//! 3. (edit-as-copy only) swap the collection membership from original to copy
//!
//! Rows written before a failure stay in place. Failures after step 1 are
//! logged with the ids needed to find and clean them up later.

use uuid::Uuid;

use crate::error::{ForkError, SwapStep};
use crate::ingredients::ingredient_batch;
use crate::store::RecipeStore;
use crate::types::{RecipeAggregate, RecipeDraft, RecipeOverrides};

/// The recipe row a fork of `source` would insert.
pub fn build_fork_draft(
    source: &RecipeAggregate,
    actor: Uuid,
    overrides: &RecipeOverrides,
) -> RecipeDraft {
    let recipe = &source.recipe;
    RecipeDraft {
        author_id: actor,
        title: overrides
            .title
            .clone()
            .unwrap_or_else(|| recipe.title.clone()),
        description: overrides
            .description
            .clone()
            .or_else(|| recipe.description.clone()),
        instructions: overrides
            .instructions
            .clone()
            .unwrap_or_else(|| recipe.instructions.clone()),
        prep_time: overrides.prep_time.or(recipe.prep_time),
        cook_time: overrides.cook_time.or(recipe.cook_time),
        servings: overrides.servings.or(recipe.servings),
        difficulty: overrides.difficulty.or(recipe.difficulty),
        image_url: recipe.image_url.clone(),
        youtube_url: recipe.youtube_url.clone(),
        is_public: false,
        dietary: recipe.dietary,
        category_id: recipe.category_id,
        original_recipe_id: Some(recipe.id),
    }
}

/// Copy `source` into a new aggregate owned by `actor`.
pub async fn fork_recipe(
    store: &dyn RecipeStore,
    source: &RecipeAggregate,
    actor: Uuid,
    overrides: &RecipeOverrides,
) -> Result<RecipeAggregate, ForkError> {
    overrides.validate().map_err(ForkError::Invalid)?;

    let draft = build_fork_draft(source, actor, overrides);
    let recipe = store
        .insert_recipe(&draft)
        .await
        .map_err(ForkError::Recipe)?;

    let inputs = match &overrides.ingredients {
        Some(list) => list.clone(),
        None => source.ingredient_inputs(),
    };
    let batch = ingredient_batch(recipe.id, &inputs);

    let ingredients = if batch.is_empty() {
        Vec::new()
    } else {
        match store.insert_ingredients(&batch).await {
            Ok(rows) => rows,
            Err(source_err) => {
                tracing::warn!(
                    recipe_id = %recipe.id,
                    origin_id = %source.recipe.id,
                    actor = %actor,
                    error = %source_err,
                    "recipe copy created without ingredients"
                );
                return Err(ForkError::Ingredients {
                    recipe_id: recipe.id,
                    source: source_err,
                });
            }
        }
    };

    tracing::info!(
        recipe_id = %recipe.id,
        origin_id = %source.recipe.id,
        ingredient_count = ingredients.len(),
        "recipe forked"
    );

    Ok(RecipeAggregate {
        recipe,
        ingredients,
    })
}

/// Fork `source` with the user's edits and make the copy take the original's
/// place in `collection_id`.
pub async fn edit_as_copy(
    store: &dyn RecipeStore,
    collection_id: Uuid,
    source: &RecipeAggregate,
    actor: Uuid,
    overrides: &RecipeOverrides,
) -> Result<RecipeAggregate, ForkError> {
    let copy = fork_recipe(store, source, actor, overrides).await?;
    let copy_id = copy.recipe.id;

    if let Err(e) = store
        .remove_from_collection(collection_id, source.recipe.id)
        .await
    {
        return Err(swap_failed(collection_id, source, copy_id, SwapStep::RemoveOriginal, e));
    }

    if let Err(e) = store.add_to_collection(collection_id, copy_id).await {
        return Err(swap_failed(collection_id, source, copy_id, SwapStep::AddCopy, e));
    }

    Ok(copy)
}

fn swap_failed(
    collection_id: Uuid,
    source: &RecipeAggregate,
    copy_id: Uuid,
    step: SwapStep,
    source_err: crate::error::StoreError,
) -> ForkError {
    tracing::warn!(
        collection_id = %collection_id,
        origin_id = %source.recipe.id,
        copy_id = %copy_id,
        step = %step,
        error = %source_err,
        "collection membership swap incomplete"
    );
    ForkError::MembershipSwap {
        copy_id,
        step,
        source: source_err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreOp};
    use crate::testing::sample_aggregate;
    use crate::types::{Difficulty, IngredientInput};

    #[test]
    fn test_draft_resets_ownership_and_visibility() {
        let source = sample_aggregate("Chili", true);
        let actor = Uuid::new_v4();

        let draft = build_fork_draft(&source, actor, &RecipeOverrides::default());

        assert_eq!(draft.author_id, actor);
        assert_eq!(draft.original_recipe_id, Some(source.recipe.id));
        assert!(!draft.is_public);
        assert_eq!(draft.title, "Chili");
        assert_eq!(draft.dietary, source.recipe.dietary);
        assert_eq!(draft.category_id, source.recipe.category_id);
    }

    #[test]
    fn test_draft_applies_overrides() {
        let source = sample_aggregate("Chili", false);
        let overrides = RecipeOverrides {
            title: Some("Weeknight Chili".to_string()),
            servings: Some(2),
            difficulty: Some(Difficulty::Easy),
            ..Default::default()
        };

        let draft = build_fork_draft(&source, Uuid::new_v4(), &overrides);

        assert_eq!(draft.title, "Weeknight Chili");
        assert_eq!(draft.servings, Some(2));
        assert_eq!(draft.difficulty, Some(Difficulty::Easy));
        assert_eq!(draft.instructions, source.recipe.instructions);
        assert_eq!(draft.prep_time, source.recipe.prep_time);
    }

    #[tokio::test]
    async fn test_fork_produces_private_zeroed_copy() {
        let store = MemoryStore::new();
        let mut source = sample_aggregate("Chili", true);
        source.recipe.like_count = 12;
        source.recipe.fork_count = 3;
        source.recipe.view_count = 400;
        store.seed(source.clone());
        let actor = Uuid::new_v4();

        let copy = fork_recipe(&store, &source, actor, &RecipeOverrides::default())
            .await
            .unwrap();

        assert_ne!(copy.recipe.id, source.recipe.id);
        assert_eq!(copy.recipe.original_recipe_id, Some(source.recipe.id));
        assert_eq!(copy.recipe.author_id, actor);
        assert!(!copy.recipe.is_public);
        assert_eq!(copy.recipe.like_count, 0);
        assert_eq!(copy.recipe.fork_count, 0);
        assert_eq!(copy.recipe.view_count, 0);
        assert_eq!(copy.ingredients.len(), source.ingredients.len());
        assert!(copy.ingredients.iter().all(|i| i.recipe_id == copy.recipe.id));
    }

    #[tokio::test]
    async fn test_fork_drops_blank_ingredients() {
        let store = MemoryStore::new();
        let source = sample_aggregate("Cake", true);
        store.seed(source.clone());
        let overrides = RecipeOverrides {
            ingredients: Some(vec![
                IngredientInput::new("", "2", Some("cup")),
                IngredientInput::new("flour", "", Some("g")),
                IngredientInput::new("sugar", "1", Some("cup")),
            ]),
            ..Default::default()
        };

        let copy = fork_recipe(&store, &source, Uuid::new_v4(), &overrides)
            .await
            .unwrap();

        assert_eq!(copy.ingredients.len(), 1);
        assert_eq!(copy.ingredients[0].name, "sugar");
        assert_eq!(copy.ingredients[0].order_index, 0);
    }

    #[tokio::test]
    async fn test_invalid_overrides_write_nothing() {
        let store = MemoryStore::new();
        let source = sample_aggregate("Chili", true);
        store.seed(source.clone());
        let overrides = RecipeOverrides {
            title: Some("   ".to_string()),
            instructions: Some(String::new()),
            servings: Some(-3),
            ..Default::default()
        };

        let err = fork_recipe(&store, &source, Uuid::new_v4(), &overrides)
            .await
            .unwrap_err();

        assert!(matches!(err, ForkError::Invalid("Title cannot be empty")));
        assert_eq!(err.created_copy(), None);
        assert!(store.calls().is_empty());
        assert_eq!(store.recipes().len(), 1);
    }

    #[tokio::test]
    async fn test_recipe_failure_skips_ingredients() {
        let store = MemoryStore::new();
        let source = sample_aggregate("Chili", true);
        store.fail_on(StoreOp::InsertRecipe);

        let err = fork_recipe(&store, &source, Uuid::new_v4(), &RecipeOverrides::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ForkError::Recipe(_)));
        assert_eq!(err.created_copy(), None);
        assert_eq!(store.calls(), vec![StoreOp::InsertRecipe]);
    }

    #[tokio::test]
    async fn test_ingredient_failure_leaves_copy() {
        let store = MemoryStore::new();
        let source = sample_aggregate("Chili", true);
        store.seed(source.clone());
        store.fail_on(StoreOp::InsertIngredients);

        let err = fork_recipe(&store, &source, Uuid::new_v4(), &RecipeOverrides::default())
            .await
            .unwrap_err();

        let copy_id = err.created_copy().expect("copy should exist");
        assert!(matches!(err, ForkError::Ingredients { .. }));
        assert!(store.recipes().iter().any(|r| r.id == copy_id));
        assert!(store.ingredients_of(copy_id).is_empty());
    }

    #[tokio::test]
    async fn test_no_ingredient_call_for_empty_batch() {
        let store = MemoryStore::new();
        let mut source = sample_aggregate("Water", true);
        source.ingredients.clear();
        store.seed(source.clone());

        let copy = fork_recipe(&store, &source, Uuid::new_v4(), &RecipeOverrides::default())
            .await
            .unwrap();

        assert!(copy.ingredients.is_empty());
        assert_eq!(store.calls(), vec![StoreOp::InsertRecipe]);
    }
}
