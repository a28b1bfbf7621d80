// Application state module
// Holds the per-process state shared by all request handlers

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::types::Config;

/// Application state
///
/// Constructed once in `main` and shared behind an `Arc`. The greeting
/// name is fixed for the process lifetime; the request counter is the
/// only mutable piece and lives behind an atomic so the multi-threaded
/// runtime needs no lock.
pub struct AppState {
    pub config: Config,
    /// Sender name substituted into greeting and factorial responses
    pub greeting_name: String,
    /// Next greeting sequence number, starts at 1
    request_seq: AtomicU64,

    // Cached config value for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, greeting_name: String) -> Self {
        Self {
            config: config.clone(),
            greeting_name,
            request_seq: AtomicU64::new(1),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }

    /// Claim the next greeting sequence number.
    ///
    /// Each caller observes a distinct value; values are handed out in
    /// fetch-and-add order starting at 1.
    pub fn next_request_seq(&self) -> u64 {
        self.request_seq.fetch_add(1, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        GreetingConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    };

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                workers: None,
            },
            greeting: GreetingConfig {
                name: "anonymous".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_format: "combined".to_string(),
                show_headers: false,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                default_content_type: "text/plain; charset=utf-8".to_string(),
                server_name: "hello-server/0.1".to_string(),
                enable_cors: false,
            },
        }
    }

    #[test]
    fn request_seq_starts_at_one_and_increments() {
        let state = AppState::new(&test_config(), "demo".to_string());
        assert_eq!(state.next_request_seq(), 1);
        assert_eq!(state.next_request_seq(), 2);
        assert_eq!(state.next_request_seq(), 3);
    }

    #[test]
    fn greeting_name_is_fixed() {
        let state = AppState::new(&test_config(), "demo".to_string());
        assert_eq!(state.greeting_name, "demo");
    }
}
