//! Strict parsers shared by the rule checks and the payload builders, so a
//! value that passed validation always converts the same way.

use uuid::Uuid;

/// Hyphenated UUID only; braced, URN and simple forms are rejected.
pub fn is_uuid(raw: &str) -> bool {
    raw.len() == 36 && Uuid::try_parse(raw).is_ok()
}

pub fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_int(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}

/// Accepts `true`, `false`, `1` and `0`. JSON booleans and numbers reach
/// this function through their string form.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
