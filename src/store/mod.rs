//! Recipe store module
//!
//! The capability set the dispatcher depends on, plus the in-memory
//! implementation used at runtime.

mod memory;

pub use memory::MemStore;

use std::collections::HashMap;

use crate::error::StoreResult;
use crate::recipe::Recipe;

/// Keyed recipe storage, shared by every request task
pub trait RecipeStore: Send + Sync {
    /// Insert `recipe` under `id`, failing with `AlreadyExists` if taken
    fn add(&self, id: &str, recipe: Recipe) -> StoreResult<()>;

    fn get(&self, id: &str) -> StoreResult<Recipe>;

    /// Owned snapshot of every entry at the time of the call
    fn list(&self) -> StoreResult<HashMap<String, Recipe>>;

    /// Replace the whole value under `id`, failing with `NotFound` if absent
    fn update(&self, id: &str, recipe: Recipe) -> StoreResult<()>;

    fn remove(&self, id: &str) -> StoreResult<()>;

    fn len(&self) -> StoreResult<usize>;
}
