// Recipe operation handlers
// One function per route action; each maps a store outcome to a response

use hyper::StatusCode;
use serde_json::json;

use crate::error::ApiError;
use crate::http::{self, HttpResponse};
use crate::recipe::{slugify, Recipe};
use crate::store::RecipeStore;

/// Decode a request body; only a JSON object is a recipe
fn decode(body: &[u8]) -> Result<Recipe, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ApiError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// POST /receitas
pub fn create_recipe(store: &dyn RecipeStore, body: &[u8]) -> Result<HttpResponse, ApiError> {
    let recipe = decode(body)?;
    let id = slugify(&recipe.name);
    if id.is_empty() {
        return Err(ApiError::InvalidName(recipe.name));
    }

    store.add(&id, recipe)?;
    tracing::debug!(%id, "recipe created");
    Ok(http::build_success_response())
}

/// GET /receitas
pub fn list_recipes(store: &dyn RecipeStore) -> Result<HttpResponse, ApiError> {
    let recipes = store.list()?;
    Ok(http::json_response(StatusCode::OK, &recipes))
}

/// GET /receitas/{id}
pub fn get_recipe(store: &dyn RecipeStore, id: &str) -> Result<HttpResponse, ApiError> {
    let recipe = store.get(id)?;
    Ok(http::json_response(StatusCode::OK, &recipe))
}

/// PUT /receitas/{id}
pub fn update_recipe(
    store: &dyn RecipeStore,
    id: &str,
    body: &[u8],
) -> Result<HttpResponse, ApiError> {
    let recipe = decode(body)?;
    store.update(id, recipe)?;
    tracing::debug!(%id, "recipe updated");
    Ok(http::build_success_response())
}

/// DELETE /receitas/{id}
pub fn delete_recipe(store: &dyn RecipeStore, id: &str) -> Result<HttpResponse, ApiError> {
    store.remove(id)?;
    tracing::debug!(%id, "recipe removed");
    Ok(http::build_success_response())
}

/// Readiness probe; fails when the store cannot be read
pub fn readiness(store: &dyn RecipeStore) -> Result<HttpResponse, ApiError> {
    let recipes = store.len()?;
    Ok(http::json_response(
        StatusCode::OK,
        &json!({ "status": "ok", "recipes": recipes }),
    ))
}
