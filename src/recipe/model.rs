// Recipe model types
// Field names and omit-if-empty behaviour are part of the HTTP wire format

use serde::{Deserialize, Deserializer, Serialize};

/// A recipe as stored and served by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Kept in the order the client sent them
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// `null` reads as the empty value, same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: &[&str]) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.iter().map(|&i| Ingredient::new(i)).collect(),
        }
    }
}

#[cfg(test)]
impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_omitted() {
        let json = serde_json::to_string(&Recipe::default()).unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&Recipe::new("Torrada", &[])).unwrap();
        assert_eq!(json, r#"{"name":"Torrada"}"#);
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let recipe: Recipe = serde_json::from_str(r#"{"ingredients":[{}]}"#).unwrap();
        assert!(recipe.name.is_empty());
        assert_eq!(recipe.ingredients, vec![Ingredient::default()]);
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let recipe: Recipe = serde_json::from_str(r#"{"name":null,"ingredients":null}"#).unwrap();
        assert_eq!(recipe, Recipe::default());

        let recipe: Recipe =
            serde_json::from_str(r#"{"name":"Bolo","ingredients":[{"name":null}]}"#).unwrap();
        assert_eq!(recipe.ingredients, vec![Ingredient::default()]);
    }

    #[test]
    fn test_ingredient_order_preserved() {
        let input = r#"{"name":"Misto","ingredients":[{"name":"queijo"},{"name":"presunto"},{"name":"manteiga"}]}"#;
        let recipe: Recipe = serde_json::from_str(input).unwrap();
        let names: Vec<_> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["queijo", "presunto", "manteiga"]);
        assert_eq!(serde_json::to_string(&recipe).unwrap(), input);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let recipe: Recipe = serde_json::from_str(r#"{"name":"Bolo","serves":4}"#).unwrap();
        assert_eq!(recipe, Recipe::new("Bolo", &[]));
    }
}
