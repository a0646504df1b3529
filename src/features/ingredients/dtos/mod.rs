mod ingredient_dto;

pub use ingredient_dto::*;
