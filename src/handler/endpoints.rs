// Endpoint handlers module
// Business logic for the four application endpoints

use std::str::FromStr;

use rand::distr::Alphanumeric;
use rand::Rng;

use super::error::HandlerError;
use crate::config::AppState;
use crate::logger;
use crate::routing::Params;

/// Handle `GET /`.
///
/// Claims the next request sequence number, formats the greeting, and
/// echoes the same line to stdout (the original server logged every
/// greeting it sent).
pub fn greeting(state: &AppState) -> String {
    let seq = state.next_request_seq();
    let message = greeting_message(&state.greeting_name, seq);
    logger::log_greeting(&message);
    message
}

/// Format the greeting body for a given sender name and sequence number
pub fn greeting_message(name: &str, seq: u64) -> String {
    format!("Hello World! From {name}. This is request #{seq}")
}

/// Handle `GET /ping`
pub const fn ping() -> &'static str {
    "pong!"
}

/// Handle `GET /factorial/:n`
pub fn factorial_reply(name: &str, params: &Params) -> Result<String, HandlerError> {
    let n: u64 = parse_param(params, "n")?;
    let result = factorial(n);
    Ok(format!("{name}: The factorial of {n} is {result}"))
}

/// Factorial: `factorial(0) = 1`, `factorial(k) = k * factorial(k - 1)`.
///
/// Computed as an iterative wrapping product. Recursing would put the
/// request's whole operand on the thread stack and abort the process
/// for large `n`; the fold gives identical results since wrapping
/// multiplication is associative and commutative. Large inputs wrap
/// rather than panic.
fn factorial(n: u64) -> u128 {
    (1..=n).fold(1_u128, |acc, k| acc.wrapping_mul(u128::from(k)))
}

/// Handle `GET /sort/:count/:length`.
///
/// Generates and sorts the strings, then reports only the counts. The
/// sorted collection is deliberately dropped: the original server never
/// used it in the response, and that observable contract is kept.
pub fn random_sort_reply(params: &Params) -> Result<String, HandlerError> {
    let count: usize = parse_param(params, "count")?;
    let length: usize = parse_param(params, "length")?;

    let mut strings = generate_random_strings(count, length);
    strings.sort();

    Ok(format!(
        "Generated and sorted {count} strings of length {length}"
    ))
}

/// Generate `count` random strings of `length` alphanumeric characters
/// (A-Z, a-z, 0-9), each character drawn independently and uniformly
pub fn generate_random_strings(count: usize, length: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            rand::rng()
                .sample_iter(Alphanumeric)
                .take(length)
                .map(char::from)
                .collect()
        })
        .collect()
}

/// Parse a captured path parameter into the requested integer type
fn parse_param<T: FromStr>(params: &Params, name: &'static str) -> Result<T, HandlerError> {
    let raw = params
        .get(name)
        .ok_or(HandlerError::MissingParam { name })?;
    raw.parse().map_err(|_| HandlerError::InvalidParam {
        name,
        value: raw.to_string(),
    })
}
