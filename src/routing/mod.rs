//! Routing module
//!
//! Maps a request method and path onto an action through an explicit table
//! of compiled path patterns. Knows nothing about the HTTP server in use.

mod matcher;

pub use matcher::{RouteAction, RouteMatch, RouteTable};
