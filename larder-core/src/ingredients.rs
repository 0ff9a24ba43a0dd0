use uuid::Uuid;

use crate::types::{IngredientInput, NewIngredient};

/// Turn user-entered ingredients into insert rows for `recipe_id`.
///
/// Rows with a blank name or amount are dropped and the survivors are numbered
/// from zero in list order.
pub fn ingredient_batch(recipe_id: Uuid, inputs: &[IngredientInput]) -> Vec<NewIngredient> {
    inputs
        .iter()
        .filter(|i| !i.name.trim().is_empty() && !i.amount.trim().is_empty())
        .enumerate()
        .map(|(index, i)| NewIngredient {
            recipe_id,
            name: i.name.clone(),
            amount: i.amount.clone(),
            unit: i.unit.clone().filter(|u| !u.trim().is_empty()),
            order_index: index as i32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_blank_rows_and_renumbers() {
        let recipe_id = Uuid::new_v4();
        let inputs = vec![
            IngredientInput::new("", "2", Some("cup")),
            IngredientInput::new("flour", "", Some("g")),
            IngredientInput::new("sugar", "1", Some("cup")),
            IngredientInput::new("   ", "3", None),
            IngredientInput::new("salt", " \t", None),
            IngredientInput::new("eggs", "2", None),
        ];

        let batch = ingredient_batch(recipe_id, &inputs);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].name, "sugar");
        assert_eq!(batch[0].order_index, 0);
        assert_eq!(batch[1].name, "eggs");
        assert_eq!(batch[1].order_index, 1);
        assert!(batch.iter().all(|i| i.recipe_id == recipe_id));
    }

    #[test]
    fn test_blank_unit_becomes_none() {
        let batch = ingredient_batch(
            Uuid::new_v4(),
            &[IngredientInput::new("butter", "2", Some(""))],
        );
        assert_eq!(batch[0].unit, None);
    }

    #[test]
    fn test_keeps_text_as_entered() {
        let batch = ingredient_batch(
            Uuid::new_v4(),
            &[IngredientInput::new(" Olive oil ", "1 1/2", Some("tbsp"))],
        );
        assert_eq!(batch[0].name, " Olive oil ");
        assert_eq!(batch[0].amount, "1 1/2");
        assert_eq!(batch[0].unit.as_deref(), Some("tbsp"));
    }

    #[test]
    fn test_empty_input() {
        assert!(ingredient_batch(Uuid::new_v4(), &[]).is_empty());
    }
}
