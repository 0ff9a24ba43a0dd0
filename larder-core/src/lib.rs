pub mod error;
pub mod fork;
pub mod ingredients;
pub mod resolve;
pub mod slug;
pub mod store;
pub mod types;
pub mod username;

#[cfg(test)]
mod testing;

pub use error::{ForkError, ResolveError, StoreError, SwapStep};
pub use fork::{build_fork_draft, edit_as_copy, fork_recipe};
pub use ingredients::ingredient_batch;
pub use resolve::{resolve_slug, FALLBACK_ROUTE};
pub use slug::{id_suffix, parse_recipe_slug, recipe_slug, ParsedSlug, ID_SUFFIX_LEN};
pub use store::{MemoryStore, RecipeStore, StoreOp};
pub use types::{
    DietaryFlags, Difficulty, Ingredient, IngredientInput, NewIngredient, Recipe,
    RecipeAggregate, RecipeDraft, RecipeOverrides, FORK_TITLE_SUFFIX, MAX_TITLE_LEN,
    validate_recipe_fields,
};
pub use username::{allocate_username, base_username, username_candidates};
