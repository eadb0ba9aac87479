// Application state module
// Everything a connection task needs, shared behind one Arc

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::types::Config;
use crate::api::Dispatcher;
use crate::store::RecipeStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    /// Build state around an already constructed store
    pub fn new(config: Config, store: Arc<dyn RecipeStore>) -> Result<Self, regex::Error> {
        let dispatcher = Dispatcher::new(store, &config)?;
        Ok(Self {
            config,
            dispatcher,
            active_connections: AtomicUsize::new(0),
        })
    }
}
