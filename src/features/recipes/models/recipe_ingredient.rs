use sqlx::FromRow;
use uuid::Uuid;

/// Join row between a recipe and an ingredient, with the ingredient's fields inlined
#[derive(Debug, Clone, FromRow)]
pub struct RecipeIngredient {
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub unit_of_measure: String,
    pub quantity: Option<f64>,
}

impl RecipeIngredient {
    /// "200 grams of cheese", or just "cheese" when no quantity is recorded
    pub fn description(&self) -> String {
        match self.quantity {
            Some(quantity) if quantity != 0.0 => format!(
                "{} {} of {}",
                quantity, self.unit_of_measure, self.ingredient_name
            ),
            _ => self.ingredient_name.clone(),
        }
    }
}
