//! Request dispatcher
//!
//! Resolves `(method, path)` through the route table, runs the matching
//! store operation and turns the outcome into a response. Apart from the
//! injected store the dispatcher holds no mutable state, so one instance is
//! shared by every connection task.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Body;
use hyper::header::{HeaderValue, CONTENT_LENGTH};
use hyper::{Method, StatusCode};

use super::handlers;
use crate::config::Config;
use crate::error::ApiError;
use crate::http::{self, HttpResponse};
use crate::logger;
use crate::routing::{RouteAction, RouteMatch, RouteTable};
use crate::store::RecipeStore;

const WELCOME: &str = "Bem-vindo à página inicial!";

pub struct Dispatcher {
    store: Arc<dyn RecipeStore>,
    routes: RouteTable,
    enable_cors: bool,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn RecipeStore>, config: &Config) -> Result<Self, regex::Error> {
        Ok(Self {
            store,
            routes: RouteTable::new(&config.health)?,
            enable_cors: config.http.enable_cors,
        })
    }

    pub fn store(&self) -> &dyn RecipeStore {
        self.store.as_ref()
    }

    /// Handle one request whose body has already been read
    pub fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> HttpResponse {
        let response = match self.routes.resolve(method, path) {
            RouteMatch::Matched { action, id } => self
                .run(action, id.unwrap_or_default(), body)
                .unwrap_or_else(|err| error_to_response(&err)),
            RouteMatch::Options { allow } => http::build_options_response(&allow, self.enable_cors),
            RouteMatch::MethodNotAllowed { allow } => http::build_405_response(&allow),
            RouteMatch::NotFound => http::build_404_response(),
        };

        if *method == Method::HEAD {
            strip_body(response)
        } else {
            response
        }
    }

    fn run(&self, action: RouteAction, id: &str, body: &[u8]) -> Result<HttpResponse, ApiError> {
        let store = self.store();
        match action {
            RouteAction::Home => Ok(http::build_text_response(StatusCode::OK, WELCOME)),
            RouteAction::Liveness => Ok(http::build_health_response()),
            RouteAction::Readiness => handlers::readiness(store),
            RouteAction::CreateRecipe => handlers::create_recipe(store, body),
            RouteAction::ListRecipes => handlers::list_recipes(store),
            RouteAction::GetRecipe => handlers::get_recipe(store, id),
            RouteAction::UpdateRecipe => handlers::update_recipe(store, id, body),
            RouteAction::DeleteRecipe => handlers::delete_recipe(store, id),
        }
    }
}

/// Drop the body of a `HEAD` answer, keeping the length the `GET` would send
fn strip_body(mut response: HttpResponse) -> HttpResponse {
    if let Some(len) = response.body().size_hint().exact() {
        response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(len));
    }
    *response.body_mut() = Full::default();
    response
}

/// Map an error onto its status with an `{"error": ...}` body
pub fn error_to_response(err: &ApiError) -> HttpResponse {
    let status = err.status();
    if status.is_server_error() {
        logger::log_error(&format!("Request failed: {err}"));
    }
    http::error_response(status, &err.to_string())
}
