//! Recipe domain module
//!
//! Wire types for recipes and the slug derivation used to key them.

mod model;
mod slug;

pub use model::{Ingredient, Recipe};
pub use slug::slugify;
