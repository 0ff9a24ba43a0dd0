use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::slug::recipe_slug;

/// How hard a recipe is to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// Dietary labels. Each flag is independent; nothing checks that a vegan
/// recipe is also marked vegetarian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DietaryFlags {
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub dairy_free: bool,
    #[serde(default)]
    pub nut_free: bool,
}

/// A stored recipe row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Newline-delimited steps
    pub instructions: String,
    /// Minutes
    pub prep_time: Option<i32>,
    /// Minutes
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub image_url: Option<String>,
    pub youtube_url: Option<String>,
    pub is_public: bool,
    pub dietary: DietaryFlags,
    pub category_id: Option<Uuid>,
    /// Immediate fork parent, if this recipe is a copy
    pub original_recipe_id: Option<Uuid>,
    pub fork_count: i32,
    pub like_count: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// URL path segment for this recipe.
    pub fn slug(&self) -> String {
        recipe_slug(&self.title, &self.id.to_string())
    }

    /// Whether `viewer` may see this recipe.
    pub fn visible_to(&self, viewer: Option<Uuid>) -> bool {
        self.is_public || viewer == Some(self.author_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    /// Free text ("1 1/2", "a pinch"), never parsed
    pub amount: String,
    pub unit: Option<String>,
    pub order_index: i32,
}

/// A recipe together with its ingredients in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeAggregate {
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeAggregate {
    /// Ingredients as editable input rows, preserving display order.
    pub fn ingredient_inputs(&self) -> Vec<IngredientInput> {
        self.ingredients
            .iter()
            .map(|i| IngredientInput {
                name: i.name.clone(),
                amount: i.amount.clone(),
                unit: i.unit.clone(),
            })
            .collect()
    }
}

/// An ingredient as entered by a user, before it belongs to a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientInput {
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub unit: Option<String>,
}

impl IngredientInput {
    pub fn new(name: &str, amount: &str, unit: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            amount: amount.to_string(),
            unit: unit.map(str::to_string),
        }
    }
}

/// An ingredient row ready for batch insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub recipe_id: Uuid,
    pub name: String,
    pub amount: String,
    pub unit: Option<String>,
    pub order_index: i32,
}

/// Fields for a recipe insert. Counters are absent: the store starts them at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub image_url: Option<String>,
    pub youtube_url: Option<String>,
    pub is_public: bool,
    pub dietary: DietaryFlags,
    pub category_id: Option<Uuid>,
    pub original_recipe_id: Option<Uuid>,
}

/// Field changes applied on top of a source recipe when copying it.
/// `None` keeps the source value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeOverrides {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub prep_time: Option<i32>,
    #[serde(default)]
    pub cook_time: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientInput>>,
}

pub const FORK_TITLE_SUFFIX: &str = " (Forked)";

/// Longest title `recipes.title` holds, counted in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Checks shared by recipe creation and copy overrides. `None` skips a field.
pub fn validate_recipe_fields(
    title: Option<&str>,
    instructions: Option<&str>,
    prep_time: Option<i32>,
    cook_time: Option<i32>,
    servings: Option<i32>,
) -> Result<(), &'static str> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err("Title cannot be empty");
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err("Title must be at most 255 characters");
        }
    }
    if instructions.is_some_and(|i| i.trim().is_empty()) {
        return Err("Instructions cannot be empty");
    }
    if prep_time.is_some_and(|t| t < 0) || cook_time.is_some_and(|t| t < 0) {
        return Err("Times cannot be negative");
    }
    if servings.is_some_and(|s| s < 1) {
        return Err("Servings must be at least 1");
    }
    Ok(())
}

impl RecipeOverrides {
    /// Overrides used by the plain "fork" action: only the title changes.
    /// Long titles are cut on a char boundary so the suffix still fits.
    pub fn for_fork(source_title: &str) -> Self {
        let keep = MAX_TITLE_LEN - FORK_TITLE_SUFFIX.chars().count();
        let base: String = source_title.chars().take(keep).collect();
        Self {
            title: Some(format!("{}{}", base, FORK_TITLE_SUFFIX)),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        validate_recipe_fields(
            self.title.as_deref(),
            self.instructions.as_deref(),
            self.prep_time,
            self.cook_time,
            self.servings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trips_through_str() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.as_str().parse::<Difficulty>(), Ok(d));
        }
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn test_for_fork_appends_suffix() {
        let overrides = RecipeOverrides::for_fork("Chili");
        assert_eq!(overrides.title.as_deref(), Some("Chili (Forked)"));
        assert!(overrides.ingredients.is_none());
        assert!(overrides.description.is_none());
    }

    #[test]
    fn test_for_fork_fits_long_titles() {
        let source = "a".repeat(250);
        let title = RecipeOverrides::for_fork(&source).title.unwrap();
        assert_eq!(title.chars().count(), MAX_TITLE_LEN);
        assert!(title.ends_with(FORK_TITLE_SUFFIX));

        // Multi-byte characters are cut whole
        let source = "é".repeat(MAX_TITLE_LEN);
        let overrides = RecipeOverrides::for_fork(&source);
        assert_eq!(overrides.title.as_ref().unwrap().chars().count(), MAX_TITLE_LEN);
        assert_eq!(overrides.validate(), Ok(()));
    }

    #[test]
    fn test_overrides_validate_like_create() {
        let overrides = RecipeOverrides {
            title: Some("   ".to_string()),
            instructions: Some(String::new()),
            servings: Some(-3),
            ..Default::default()
        };
        assert_eq!(overrides.validate(), Err("Title cannot be empty"));

        let overrides = RecipeOverrides {
            instructions: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(overrides.validate(), Err("Instructions cannot be empty"));

        let overrides = RecipeOverrides {
            prep_time: Some(-5),
            ..Default::default()
        };
        assert_eq!(overrides.validate(), Err("Times cannot be negative"));

        let overrides = RecipeOverrides {
            servings: Some(-3),
            ..Default::default()
        };
        assert_eq!(overrides.validate(), Err("Servings must be at least 1"));

        let overrides = RecipeOverrides {
            title: Some("x".repeat(MAX_TITLE_LEN + 1)),
            ..Default::default()
        };
        assert_eq!(
            overrides.validate(),
            Err("Title must be at most 255 characters")
        );

        assert_eq!(RecipeOverrides::default().validate(), Ok(()));
    }
}
