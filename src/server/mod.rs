// Server module entry point
// Listener creation, connection handling, and signal-driven shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// Re-export commonly used items
pub use listener::create_reusable_listener;
pub use signal::install_shutdown_handler;
