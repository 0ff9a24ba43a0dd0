//! Slug to recipe resolution.
//!
//! Slugs only carry the last eight characters of the id, so resolving one is a
//! suffix lookup. A suffix shared by several recipes is refused rather than
//! guessed.

use crate::error::ResolveError;
use crate::slug::parse_recipe_slug;
use crate::store::RecipeStore;
use crate::types::RecipeAggregate;

/// Where visitors go when a slug doesn't resolve.
pub const FALLBACK_ROUTE: &str = "/recipes";

/// Load the recipe a slug points at.
pub async fn resolve_slug(
    store: &dyn RecipeStore,
    slug: &str,
) -> Result<RecipeAggregate, ResolveError> {
    let parsed = parse_recipe_slug(slug).ok_or(ResolveError::Malformed)?;

    // Two is enough to tell "unique" from "ambiguous".
    let matches = store.find_by_id_suffix(&parsed.id_suffix, 2).await?;

    match matches.as_slice() {
        [] => Err(ResolveError::NotFound),
        [recipe] => Ok(store.get_aggregate(recipe.id).await?),
        _ => {
            tracing::warn!(
                slug = %slug,
                suffix = %parsed.id_suffix,
                "slug id suffix matches more than one recipe"
            );
            Err(ResolveError::Ambiguous {
                suffix: parsed.id_suffix,
                matches: matches.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::{MemoryStore, StoreOp};
    use crate::testing::sample_aggregate;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_resolves_own_slug() {
        let store = MemoryStore::new();
        let aggregate = sample_aggregate("Pad Thai", true);
        store.seed(aggregate.clone());

        let resolved = resolve_slug(&store, &aggregate.recipe.slug()).await.unwrap();

        assert_eq!(resolved, aggregate);
    }

    #[tokio::test]
    async fn test_empty_slug_is_malformed() {
        let store = MemoryStore::new();
        let err = resolve_slug(&store, "").await.unwrap_err();
        assert!(matches!(err, ResolveError::Malformed));
        assert!(err.falls_back());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_suffix_is_not_found() {
        let store = MemoryStore::new();
        store.seed(sample_aggregate("Pad Thai", true));

        let err = resolve_slug(&store, "pad-thai-zzzzzzzz").await.unwrap_err();

        assert!(matches!(err, ResolveError::NotFound));
        assert!(err.falls_back());
    }

    #[tokio::test]
    async fn test_shared_suffix_is_ambiguous() {
        let store = MemoryStore::new();
        let mut first = sample_aggregate("Soup", true);
        let mut second = sample_aggregate("Soup", true);
        first.recipe.id = Uuid::parse_str("11111111-1111-4111-8111-0000deadbeef").unwrap();
        second.recipe.id = Uuid::parse_str("22222222-2222-4222-8222-0000deadbeef").unwrap();
        store.seed(first);
        store.seed(second);

        let err = resolve_slug(&store, "soup-deadbeef").await.unwrap_err();

        match &err {
            ResolveError::Ambiguous { suffix, matches } => {
                assert_eq!(suffix, "deadbeef");
                assert_eq!(*matches, 2);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
        assert!(err.falls_back());
        assert!(!store.calls().contains(&StoreOp::GetAggregate));
    }

    #[tokio::test]
    async fn test_store_failure_does_not_fall_back() {
        let store = MemoryStore::new();
        store.fail_on(StoreOp::FindBySuffix);

        let err = resolve_slug(&store, "soup-deadbeef").await.unwrap_err();

        assert!(matches!(err, ResolveError::Store(StoreError::Backend(_))));
        assert!(!err.falls_back());
    }
}
