// In-memory recipe store
// A single reader-writer lock guards the whole mapping

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::RecipeStore;
use crate::error::{StoreError, StoreResult};
use crate::recipe::Recipe;

#[derive(Debug, Default)]
pub struct MemStore {
    recipes: RwLock<HashMap<String, Recipe>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Recipe>>> {
        self.recipes.read().map_err(poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Recipe>>> {
        self.recipes.write().map_err(poisoned)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Internal("recipe map lock poisoned".to_string())
}

impl RecipeStore for MemStore {
    fn add(&self, id: &str, recipe: Recipe) -> StoreResult<()> {
        match self.write()?.entry(id.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(recipe);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> StoreResult<Recipe> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> StoreResult<HashMap<String, Recipe>> {
        Ok(self.read()?.clone())
    }

    fn update(&self, id: &str, recipe: Recipe) -> StoreResult<()> {
        let mut recipes = self.write()?;
        let current = recipes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *current = recipe;
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        self.write()?
            .remove(id)
            .map(drop)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}
