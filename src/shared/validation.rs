use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for unit of measure fields
    /// Letters, spaces, dots and hyphens; must start with a letter
    /// - Valid: "grams", "fl oz", "tbsp.", "half-cup"
    /// - Invalid: "", "2 cups", " grams", "g/ml"
    pub static ref UNIT_OF_MEASURE_REGEX: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z .\-]*$").unwrap();

    /// Regex for `#rrggbb` colors used in chart configuration
    pub static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}
