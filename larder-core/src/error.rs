use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a [`crate::store::RecipeStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store error: {0}")]
    Backend(String),
}

/// Which half of the collection membership swap failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStep {
    RemoveOriginal,
    AddCopy,
}

impl fmt::Display for SwapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapStep::RemoveOriginal => f.write_str("remove original"),
            SwapStep::AddCopy => f.write_str("add copy"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ForkError {
    /// The overrides failed validation; nothing was written.
    #[error("Invalid recipe copy: {0}")]
    Invalid(&'static str),

    #[error("Failed to create recipe copy: {0}")]
    Recipe(#[source] StoreError),

    /// The copy exists but has no ingredient rows.
    #[error("Recipe copy {recipe_id} created but ingredients failed: {source}")]
    Ingredients {
        recipe_id: Uuid,
        #[source]
        source: StoreError,
    },

    /// The copy and its ingredients exist; the collection may reference the
    /// original, the copy, both or neither.
    #[error("Recipe copy {copy_id} created but collection update failed ({step}): {source}")]
    MembershipSwap {
        copy_id: Uuid,
        step: SwapStep,
        #[source]
        source: StoreError,
    },
}

impl ForkError {
    /// Id of the copy when it was persisted before the failure.
    pub fn created_copy(&self) -> Option<Uuid> {
        match self {
            ForkError::Invalid(_) | ForkError::Recipe(_) => None,
            ForkError::Ingredients { recipe_id, .. } => Some(*recipe_id),
            ForkError::MembershipSwap { copy_id, .. } => Some(*copy_id),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Malformed recipe slug")]
    Malformed,

    #[error("No recipe matches the slug")]
    NotFound,

    #[error("{matches} recipes match id suffix {suffix}")]
    Ambiguous { suffix: String, matches: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// True when the caller should send the visitor back to the listing
    /// instead of reporting an error.
    pub fn falls_back(&self) -> bool {
        match self {
            ResolveError::Malformed | ResolveError::NotFound | ResolveError::Ambiguous { .. } => {
                true
            }
            ResolveError::Store(StoreError::NotFound) => true,
            ResolveError::Store(_) => false,
        }
    }
}
