use chrono::Utc;
use uuid::Uuid;

use crate::types::{DietaryFlags, Difficulty, Ingredient, Recipe, RecipeAggregate};

pub fn sample_aggregate(title: &str, is_public: bool) -> RecipeAggregate {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let ingredients = [("beans", "2", Some("cans")), ("onion", "1", None)]
        .into_iter()
        .enumerate()
        .map(|(i, (name, amount, unit))| Ingredient {
            id: Uuid::new_v4(),
            recipe_id: id,
            name: name.to_string(),
            amount: amount.to_string(),
            unit: unit.map(str::to_string),
            order_index: i as i32,
        })
        .collect();

    RecipeAggregate {
        recipe: Recipe {
            id,
            author_id: Uuid::new_v4(),
            title: title.to_string(),
            description: Some("A weeknight staple".to_string()),
            instructions: "Chop\nSimmer\nServe".to_string(),
            prep_time: Some(10),
            cook_time: Some(45),
            servings: Some(4),
            difficulty: Some(Difficulty::Medium),
            image_url: None,
            youtube_url: None,
            is_public,
            dietary: DietaryFlags {
                vegetarian: true,
                ..Default::default()
            },
            category_id: Some(Uuid::new_v4()),
            original_recipe_id: None,
            fork_count: 0,
            like_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        },
        ingredients,
    }
}
