//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! table lookup, endpoint dispatch, and access logging.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::endpoints;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Endpoint, Params};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let is_head = method == Method::HEAD;

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        logger::log_request(&method, &uri, req.version());
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    // 1. Check HTTP method
    let response = if let Some(resp) = check_http_method(&method, state.config.http.enable_cors) {
        resp
    } else {
        // 2. Route table lookup and dispatch
        dispatch(uri.path(), is_head, &state)
    };

    // 3. Access log
    if access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_length(&response);
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    if *method == Method::GET || *method == Method::HEAD {
        None
    } else if *method == Method::OPTIONS {
        Some(http::build_options_response(enable_cors))
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        Some(http::build_405_response())
    }
}

/// Match the path against the route table and invoke the endpoint
fn dispatch(path: &str, is_head: bool, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let routes = routing::route_table();
    let Some((endpoint, params)) = routing::match_route(path, &routes) else {
        return http::build_404_response();
    };

    match invoke_endpoint(endpoint, &params, state) {
        Ok(body) => http::build_text_response(body, is_head, &state.config.http),
        Err(err) => {
            logger::log_warning(&format!("{path}: {err}"));
            http::build_400_response(&err.to_string())
        }
    }
}

/// Produce the response body for a matched endpoint
fn invoke_endpoint(
    endpoint: Endpoint,
    params: &Params,
    state: &Arc<AppState>,
) -> Result<String, super::HandlerError> {
    match endpoint {
        Endpoint::Greeting => Ok(endpoints::greeting(state)),
        Endpoint::Ping => Ok(endpoints::ping().to_string()),
        Endpoint::Factorial => endpoints::factorial_reply(&state.greeting_name, params),
        Endpoint::RandomSort => endpoints::random_sort_reply(params),
    }
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

fn body_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_state() -> Arc<AppState> {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        Arc::new(AppState::new(&cfg, "demo".to_string()))
    }

    #[test]
    fn dispatch_serves_all_routes() {
        let state = test_state();

        let resp = dispatch("/ping", false, &state);
        assert_eq!(resp.status(), 200);

        let resp = dispatch("/factorial/6", false, &state);
        assert_eq!(resp.status(), 200);

        let resp = dispatch("/sort/5/8", false, &state);
        assert_eq!(resp.status(), 200);

        let resp = dispatch("/", false, &state);
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn dispatch_survives_huge_factorial_input() {
        let state = test_state();
        assert_eq!(dispatch("/factorial/300000", false, &state).status(), 200);
    }

    #[test]
    fn dispatch_unknown_path_is_404() {
        let state = test_state();
        assert_eq!(dispatch("/nope", false, &state).status(), 404);
    }

    #[test]
    fn dispatch_invalid_param_is_400() {
        let state = test_state();
        assert_eq!(dispatch("/factorial/banana", false, &state).status(), 400);
        assert_eq!(dispatch("/factorial/-1", false, &state).status(), 400);
        assert_eq!(dispatch("/sort/-5/8", false, &state).status(), 400);
    }

    #[test]
    fn access_log_sees_error_body_sizes() {
        assert_eq!(body_length(&http::build_404_response()), 13);
        assert_eq!(body_length(&http::build_405_response()), 22);
    }

    #[test]
    fn non_get_methods_are_rejected() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());
        assert_eq!(
            check_http_method(&Method::OPTIONS, false).unwrap().status(),
            204
        );
        assert_eq!(
            check_http_method(&Method::POST, false).unwrap().status(),
            405
        );
    }
}
