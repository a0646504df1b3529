//! Stock images picked from keywords in the recipe name

/// Keyword table; the first keyword found in the lowercased name wins
const RECIPE_IMAGES: &[(&str, &str)] = &[
    ("pizza", "media/recipes/pizza.png.jpg"),
    ("margherita", "media/recipes/pizza.png.jpg"),
    ("pepperoni", "media/recipes/pizza.png.jpg"),
    ("italian", "media/recipes/pizza.png.jpg"),
    ("steak", "media/recipes/steak-frite.png.jpg"),
    ("beef", "media/recipes/steak-frite.png.jpg"),
    ("meat", "media/recipes/steak-frite.png.jpg"),
    ("frite", "media/recipes/steak-frite.png.jpg"),
    ("french", "media/recipes/steak-frite.png.jpg"),
    ("egg", "media/recipes/eggs-benedict.png.jpg"),
    ("benedict", "media/recipes/eggs-benedict.png.jpg"),
    ("breakfast", "media/recipes/eggs-benedict.png.jpg"),
    ("brunch", "media/recipes/eggs-benedict.png.jpg"),
    ("hollandaise", "media/recipes/eggs-benedict.png.jpg"),
    ("coffee", "media/recipes/coffee_image.png.jpg"),
    ("espresso", "media/recipes/coffee_image.png.jpg"),
    ("cappuccino", "media/recipes/coffee_image.png.jpg"),
    ("latte", "media/recipes/coffee_image.png.jpg"),
    ("mocha", "media/recipes/coffee_image.png.jpg"),
    ("americano", "media/recipes/coffee_image.png.jpg"),
    ("tea", "media/recipes/tea_image.png.jpg"),
    ("chai", "media/recipes/tea_image.png.jpg"),
    ("herbal", "media/recipes/tea_image.png.jpg"),
    ("matcha", "media/recipes/tea_image.png.jpg"),
];

pub const DEFAULT_RECIPE_IMAGE: &str = "media/recipes/welcome-image.png.jpg";

pub fn image_for_recipe(name: &str) -> &'static str {
    let name = name.to_lowercase();
    RECIPE_IMAGES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, image)| *image)
        .unwrap_or(DEFAULT_RECIPE_IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(
            image_for_recipe("Margherita PIZZA"),
            "media/recipes/pizza.png.jpg"
        );
        assert_eq!(
            image_for_recipe("Grilled Steak"),
            "media/recipes/steak-frite.png.jpg"
        );
    }

    #[test]
    fn test_first_keyword_in_table_order_wins() {
        // "egg" is listed before "coffee"
        assert_eq!(
            image_for_recipe("Coffee and eggs"),
            "media/recipes/eggs-benedict.png.jpg"
        );
    }

    #[test]
    fn test_default_image() {
        assert_eq!(image_for_recipe("Cheese Pasta"), DEFAULT_RECIPE_IMAGE);
    }
}
