//! End-to-end tests for forking and edit-as-copy against the in-memory store.

use chrono::Utc;
use larder_core::{
    edit_as_copy, fork_recipe, recipe_slug, resolve_slug, DietaryFlags, ForkError, Ingredient,
    IngredientInput, MemoryStore, Recipe, RecipeAggregate, RecipeOverrides, RecipeStore,
    StoreError, StoreOp, SwapStep, FORK_TITLE_SUFFIX, MAX_TITLE_LEN,
};
use uuid::Uuid;

fn recipe(title: &str, is_public: bool, ingredients: &[(&str, &str, Option<&str>)]) -> RecipeAggregate {
    let id = Uuid::new_v4();
    let now = Utc::now();
    RecipeAggregate {
        recipe: Recipe {
            id,
            author_id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            instructions: "Mix\nBake".to_string(),
            prep_time: Some(20),
            cook_time: Some(50),
            servings: Some(8),
            difficulty: None,
            image_url: Some("https://img.example/pie.jpg".to_string()),
            youtube_url: None,
            is_public,
            dietary: DietaryFlags::default(),
            category_id: None,
            original_recipe_id: None,
            fork_count: 7,
            like_count: 31,
            view_count: 1200,
            created_at: now,
            updated_at: now,
        },
        ingredients: ingredients
            .iter()
            .enumerate()
            .map(|(i, (name, amount, unit))| Ingredient {
                id: Uuid::new_v4(),
                recipe_id: id,
                name: name.to_string(),
                amount: amount.to_string(),
                unit: unit.map(str::to_string),
                order_index: i as i32,
            })
            .collect(),
    }
}

#[tokio::test]
async fn fork_leaves_source_untouched() {
    let store = MemoryStore::new();
    let source = recipe(
        "Apple Pie",
        true,
        &[("apples", "6", None), ("sugar", "1", Some("cup"))],
    );
    store.seed(source.clone());
    let stored_row = |store: &MemoryStore| {
        store
            .recipes()
            .into_iter()
            .find(|r| r.id == source.recipe.id)
            .unwrap()
    };
    let before = stored_row(&store);

    let copy = fork_recipe(
        &store,
        &source,
        Uuid::new_v4(),
        &RecipeOverrides::for_fork(&source.recipe.title),
    )
    .await
    .unwrap();

    // Only the trigger-maintained counter moves
    let mut after = stored_row(&store);
    assert_eq!(after.fork_count, before.fork_count + 1);
    after.fork_count = before.fork_count;
    assert_eq!(after, before);
    assert_eq!(copy.recipe.title, "Apple Pie (Forked)");
    assert_eq!(store.ingredients_of(source.recipe.id), source.ingredients);
}

#[tokio::test]
async fn fork_of_longest_title_fits_column() {
    let store = MemoryStore::new();
    let source = recipe(&"p".repeat(250), true, &[("flour", "2", Some("cup"))]);
    store.seed(source.clone());

    let copy = fork_recipe(
        &store,
        &source,
        Uuid::new_v4(),
        &RecipeOverrides::for_fork(&source.recipe.title),
    )
    .await
    .unwrap();

    assert!(copy.recipe.title.chars().count() <= MAX_TITLE_LEN);
    assert!(copy.recipe.title.ends_with(FORK_TITLE_SUFFIX));
}

#[tokio::test]
async fn duplicate_membership_is_a_unique_violation() {
    let store = MemoryStore::new();
    let collection = Uuid::new_v4();
    let source = recipe("Stew", true, &[("beef", "1", Some("kg"))]);
    store.seed(source.clone());

    store
        .add_to_collection(collection, source.recipe.id)
        .await
        .unwrap();
    let err = store
        .add_to_collection(collection, source.recipe.id)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::UniqueViolation(_)));
    assert_eq!(store.collection_members(collection), vec![source.recipe.id]);
}

#[tokio::test]
async fn malformed_source_ingredients_are_dropped() {
    let store = MemoryStore::new();
    let source = recipe(
        "Cake",
        true,
        &[("", "2", Some("cup")), ("flour", "", Some("g")), ("sugar", "1", Some("cup"))],
    );
    store.seed(source.clone());

    let copy = fork_recipe(&store, &source, Uuid::new_v4(), &RecipeOverrides::default())
        .await
        .unwrap();

    assert_eq!(copy.ingredients.len(), 1);
    assert_eq!(copy.ingredients[0].name, "sugar");
    assert_eq!(copy.ingredients[0].order_index, 0);
}

#[tokio::test]
async fn fork_of_fork_points_at_immediate_parent() {
    let store = MemoryStore::new();
    let root = recipe("Bread", true, &[("flour", "500", Some("g"))]);
    store.seed(root.clone());

    let child = fork_recipe(&store, &root, Uuid::new_v4(), &RecipeOverrides::default())
        .await
        .unwrap();
    let grandchild = fork_recipe(&store, &child, Uuid::new_v4(), &RecipeOverrides::default())
        .await
        .unwrap();

    assert_eq!(child.recipe.original_recipe_id, Some(root.recipe.id));
    assert_eq!(grandchild.recipe.original_recipe_id, Some(child.recipe.id));
}

#[tokio::test]
async fn forked_copy_resolves_by_its_own_slug() {
    let store = MemoryStore::new();
    let source = recipe("Grandma's Apple Pie!!", true, &[("apples", "6", None)]);
    store.seed(source.clone());

    let found = resolve_slug(&store, &source.recipe.slug()).await.unwrap();
    let copy = fork_recipe(&store, &found, Uuid::new_v4(), &RecipeOverrides::default())
        .await
        .unwrap();

    let slug = recipe_slug(&copy.recipe.title, &copy.recipe.id.to_string());
    assert!(slug.starts_with("grandma-s-apple-pie--"));
    let resolved = resolve_slug(&store, &slug).await.unwrap();
    assert_eq!(resolved.recipe.id, copy.recipe.id);
    assert_eq!(resolved.recipe.original_recipe_id, Some(source.recipe.id));
}

#[tokio::test]
async fn edit_as_copy_swaps_collection_membership() {
    let store = MemoryStore::new();
    let collection = Uuid::new_v4();
    let source = recipe("Stew", true, &[("beef", "1", Some("kg"))]);
    store.seed(source.clone());
    store.seed_membership(collection, source.recipe.id);

    let overrides = RecipeOverrides {
        title: Some("My Stew".to_string()),
        ingredients: Some(vec![
            IngredientInput::new("beef", "800", Some("g")),
            IngredientInput::new("carrots", "3", None),
        ]),
        ..Default::default()
    };
    let copy = edit_as_copy(&store, collection, &source, Uuid::new_v4(), &overrides)
        .await
        .unwrap();

    assert_eq!(copy.recipe.title, "My Stew");
    assert!(!copy.recipe.is_public);
    assert_eq!(copy.ingredients.len(), 2);
    assert_eq!(copy.ingredients[1].order_index, 1);
    assert_eq!(store.collection_members(collection), vec![copy.recipe.id]);
}

#[tokio::test]
async fn failed_membership_add_reports_copy() {
    let store = MemoryStore::new();
    let collection = Uuid::new_v4();
    let source = recipe("Stew", true, &[("beef", "1", Some("kg"))]);
    store.seed(source.clone());
    store.seed_membership(collection, source.recipe.id);
    store.fail_on(StoreOp::AddToCollection);

    let err = edit_as_copy(
        &store,
        collection,
        &source,
        Uuid::new_v4(),
        &RecipeOverrides::default(),
    )
    .await
    .unwrap_err();

    match err {
        ForkError::MembershipSwap { copy_id, step, .. } => {
            assert_eq!(step, SwapStep::AddCopy);
            assert_eq!(store.ingredients_of(copy_id).len(), 1);
        }
        other => panic!("expected membership swap failure, got {:?}", other),
    }
    // The known gap: the collection now references neither recipe.
    assert!(store.collection_members(collection).is_empty());
}

#[tokio::test]
async fn failed_membership_remove_stops_before_add() {
    let store = MemoryStore::new();
    let collection = Uuid::new_v4();
    let source = recipe("Stew", true, &[("beef", "1", Some("kg"))]);
    store.seed(source.clone());
    store.seed_membership(collection, source.recipe.id);
    store.fail_on(StoreOp::RemoveFromCollection);

    let err = edit_as_copy(
        &store,
        collection,
        &source,
        Uuid::new_v4(),
        &RecipeOverrides::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ForkError::MembershipSwap {
            step: SwapStep::RemoveOriginal,
            ..
        }
    ));
    assert!(!store.calls().contains(&StoreOp::AddToCollection));
    assert_eq!(store.collection_members(collection), vec![source.recipe.id]);
}
