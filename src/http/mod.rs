//! HTTP protocol layer module
//!
//! Provides response builders shared by the API dispatcher and the server.

pub mod response;

// Re-export commonly used types
pub use response::{
    apply_common_headers, build_404_response, build_405_response, build_413_response,
    build_health_response, build_options_response, build_success_response, build_text_response,
    error_response, json_response, HttpResponse,
};
