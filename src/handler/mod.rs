// Handler module entry point
// Request dispatch and the endpoint implementations

pub mod endpoints;
mod error;
mod router;

pub use error::HandlerError;
pub use router::handle_request;
