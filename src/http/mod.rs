//! HTTP protocol layer module
//!
//! Provides HTTP response building, decoupled from specific business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_options_response,
    build_text_response,
};
