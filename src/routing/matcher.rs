//! Route matching module
//!
//! Every route is a `(method, anchored regex) -> action` entry. Patterns
//! with a capture group yield the recipe identifier.

use hyper::Method;
use regex::Regex;

use crate::config::HealthConfig;

/// Collection path, with any number of trailing slashes
const COLLECTION_PATTERN: &str = r"^/receitas/*$";
/// Item path; the identifier must follow the slug grammar
const ITEM_PATTERN: &str = r"^/receitas/([a-z0-9]+(?:-[a-z0-9]+)*)$";
const HOME_PATTERN: &str = r"^/$";

/// What to do with a matched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    Home,
    Liveness,
    Readiness,
    CreateRecipe,
    ListRecipes,
    GetRecipe,
    UpdateRecipe,
    DeleteRecipe,
}

/// Outcome of resolving a request against the table
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch<'p> {
    Matched {
        action: RouteAction,
        id: Option<&'p str>,
    },
    /// `OPTIONS` on a known path
    Options { allow: Vec<Method> },
    /// Known path, unsupported method
    MethodNotAllowed { allow: Vec<Method> },
    NotFound,
}

struct Route {
    method: Method,
    pattern: Regex,
    action: RouteAction,
}

pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile the route table; health probes are included when enabled
    pub fn new(health: &HealthConfig) -> Result<Self, regex::Error> {
        let collection = Regex::new(COLLECTION_PATTERN)?;
        let item = Regex::new(ITEM_PATTERN)?;

        let mut routes = vec![
            route(Method::GET, Regex::new(HOME_PATTERN)?, RouteAction::Home),
            route(Method::POST, collection.clone(), RouteAction::CreateRecipe),
            route(Method::GET, collection, RouteAction::ListRecipes),
            route(Method::GET, item.clone(), RouteAction::GetRecipe),
            route(Method::PUT, item.clone(), RouteAction::UpdateRecipe),
            route(Method::DELETE, item, RouteAction::DeleteRecipe),
        ];

        if health.enabled {
            routes.push(route(
                Method::GET,
                exact(&health.liveness_path)?,
                RouteAction::Liveness,
            ));
            routes.push(route(
                Method::GET,
                exact(&health.readiness_path)?,
                RouteAction::Readiness,
            ));
        }

        Ok(Self { routes })
    }

    /// Find the action for `method` and `path`
    ///
    /// Entries are checked in table order; the first one matching both method
    /// and path wins. `HEAD` resolves like `GET`.
    pub fn resolve<'p>(&self, method: &Method, path: &'p str) -> RouteMatch<'p> {
        let lookup = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };
        let mut allow = Vec::new();

        for route in &self.routes {
            let Some(captures) = route.pattern.captures(path) else {
                continue;
            };
            if route.method == *lookup {
                return RouteMatch::Matched {
                    action: route.action,
                    id: captures.get(1).map(|m| m.as_str()),
                };
            }
            if !allow.contains(&route.method) {
                allow.push(route.method.clone());
                if route.method == Method::GET {
                    allow.push(Method::HEAD);
                }
            }
        }

        if allow.is_empty() {
            return RouteMatch::NotFound;
        }
        allow.push(Method::OPTIONS);
        if *method == Method::OPTIONS {
            RouteMatch::Options { allow }
        } else {
            RouteMatch::MethodNotAllowed { allow }
        }
    }
}

fn route(method: Method, pattern: Regex, action: RouteAction) -> Route {
    Route {
        method,
        pattern,
        action,
    }
}

fn exact(path: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^{}$", regex::escape(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(&HealthConfig::default()).unwrap()
    }

    fn matched(action: RouteAction, id: Option<&str>) -> RouteMatch<'_> {
        RouteMatch::Matched { action, id }
    }

    #[test]
    fn test_collection_routes() {
        let t = table();
        assert_eq!(
            t.resolve(&Method::POST, "/receitas"),
            matched(RouteAction::CreateRecipe, None)
        );
        assert_eq!(
            t.resolve(&Method::GET, "/receitas"),
            matched(RouteAction::ListRecipes, None)
        );
    }

    #[test]
    fn test_collection_trailing_slashes() {
        let t = table();
        assert_eq!(
            t.resolve(&Method::POST, "/receitas/"),
            matched(RouteAction::CreateRecipe, None)
        );
        assert_eq!(
            t.resolve(&Method::GET, "/receitas//"),
            matched(RouteAction::ListRecipes, None)
        );
    }

    #[test]
    fn test_item_routes_extract_id() {
        let t = table();
        let path = "/receitas/torrada-de-queijo-e-presunto";
        let id = Some("torrada-de-queijo-e-presunto");
        assert_eq!(t.resolve(&Method::GET, path), matched(RouteAction::GetRecipe, id));
        assert_eq!(t.resolve(&Method::PUT, path), matched(RouteAction::UpdateRecipe, id));
        assert_eq!(
            t.resolve(&Method::DELETE, path),
            matched(RouteAction::DeleteRecipe, id)
        );
    }

    #[test]
    fn test_single_word_id() {
        assert_eq!(
            table().resolve(&Method::GET, "/receitas/bolo"),
            matched(RouteAction::GetRecipe, Some("bolo"))
        );
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        let t = table();
        for path in [
            "/receitas/Bolo",
            "/receitas/bolo--de-milho",
            "/receitas/-bolo",
            "/receitas/bolo-",
            "/receitas/bolo_de_milho",
            "/receitas/bolo/extra",
        ] {
            assert_eq!(t.resolve(&Method::GET, path), RouteMatch::NotFound, "{path}");
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(table().resolve(&Method::GET, "/recipes"), RouteMatch::NotFound);
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let t = table();
        assert_eq!(
            t.resolve(&Method::DELETE, "/receitas"),
            RouteMatch::MethodNotAllowed {
                allow: vec![Method::POST, Method::GET, Method::HEAD, Method::OPTIONS]
            }
        );
        assert_eq!(
            t.resolve(&Method::POST, "/receitas/bolo"),
            RouteMatch::MethodNotAllowed {
                allow: vec![
                    Method::GET,
                    Method::HEAD,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS
                ]
            }
        );
    }

    #[test]
    fn test_options_on_known_path() {
        assert_eq!(
            table().resolve(&Method::OPTIONS, "/"),
            RouteMatch::Options {
                allow: vec![Method::GET, Method::HEAD, Method::OPTIONS]
            }
        );
        assert_eq!(table().resolve(&Method::OPTIONS, "/nada"), RouteMatch::NotFound);
    }

    #[test]
    fn test_head_resolves_like_get() {
        let t = table();
        assert_eq!(
            t.resolve(&Method::HEAD, "/receitas/bolo"),
            matched(RouteAction::GetRecipe, Some("bolo"))
        );
        assert_eq!(
            t.resolve(&Method::HEAD, "/receitas"),
            matched(RouteAction::ListRecipes, None)
        );
        assert_eq!(t.resolve(&Method::HEAD, "/nada"), RouteMatch::NotFound);
    }

    #[test]
    fn test_health_routes() {
        let t = table();
        assert_eq!(
            t.resolve(&Method::GET, "/healthz"),
            matched(RouteAction::Liveness, None)
        );
        assert_eq!(
            t.resolve(&Method::GET, "/readyz"),
            matched(RouteAction::Readiness, None)
        );

        let disabled = HealthConfig {
            enabled: false,
            ..HealthConfig::default()
        };
        let t = RouteTable::new(&disabled).unwrap();
        assert_eq!(t.resolve(&Method::GET, "/healthz"), RouteMatch::NotFound);
    }
}
