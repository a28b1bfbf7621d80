//! Routing module
//!
//! Holds the fixed route table and dispatch lookup. Routes are matched
//! in registration order; the first matching pattern wins.

pub mod matcher;

pub use matcher::{Params, Pattern};

/// Endpoints served by this application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Greeting,
    Ping,
    Factorial,
    RandomSort,
}

/// A single route table entry
pub struct Route {
    pub pattern: Pattern,
    pub endpoint: Endpoint,
}

/// Build the application route table
pub fn route_table() -> Vec<Route> {
    vec![
        Route {
            pattern: Pattern::parse("/"),
            endpoint: Endpoint::Greeting,
        },
        Route {
            pattern: Pattern::parse("/ping"),
            endpoint: Endpoint::Ping,
        },
        Route {
            pattern: Pattern::parse("/factorial/:n"),
            endpoint: Endpoint::Factorial,
        },
        Route {
            pattern: Pattern::parse("/sort/:count/:length"),
            endpoint: Endpoint::RandomSort,
        },
    ]
}

/// Find the first route matching the given path
pub fn match_route(path: &str, routes: &[Route]) -> Option<(Endpoint, Params)> {
    routes
        .iter()
        .find_map(|route| route.pattern.match_path(path).map(|p| (route.endpoint, p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_dispatches_all_endpoints() {
        let routes = route_table();

        let (endpoint, params) = match_route("/", &routes).unwrap();
        assert_eq!(endpoint, Endpoint::Greeting);
        assert!(params.is_empty());

        let (endpoint, _) = match_route("/ping", &routes).unwrap();
        assert_eq!(endpoint, Endpoint::Ping);

        let (endpoint, params) = match_route("/factorial/10", &routes).unwrap();
        assert_eq!(endpoint, Endpoint::Factorial);
        assert_eq!(params.get("n"), Some("10"));

        let (endpoint, params) = match_route("/sort/5/8", &routes).unwrap();
        assert_eq!(endpoint, Endpoint::RandomSort);
        assert_eq!(params.get("count"), Some("5"));
        assert_eq!(params.get("length"), Some("8"));
    }

    #[test]
    fn unknown_paths_do_not_match() {
        let routes = route_table();
        assert!(match_route("/missing", &routes).is_none());
        assert!(match_route("/factorial", &routes).is_none());
        assert!(match_route("/sort/5", &routes).is_none());
    }
}
