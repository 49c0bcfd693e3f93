use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{FieldError, RequestRules, RuleSet};
use crate::error::WebError;

/// Extracts path parameters and the JSON body together, runs `T::rules()`
/// over the merged fields and deserializes the normalized result into `T`.
///
/// Path and body failures are reported in a single 422 response.
#[derive(Debug)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: RequestRules + DeserializeOwned,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;

        let path: Map<String, Value> = params
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();

        let rules = T::rules();
        let mut input = match parse_body(&bytes) {
            Ok(body) => body,
            Err(rejection) => {
                let failures = path_failures(&rules, path);
                if failures.is_empty() {
                    return Err(rejection);
                }
                return Err(WebError::Validation(failures));
            }
        };
        input.extend(path);

        rules.apply(&mut input).map_err(WebError::Validation)?;

        let value = serde_json::from_value(Value::Object(input)).map_err(|e| {
            tracing::warn!("Validated payload failed to deserialize: {}", e);
            WebError::BadRequest("Invalid request payload".to_string())
        })?;

        Ok(Validated(value))
    }
}

/// Failures of the rules that cover path parameters, checked on their own.
/// A bad id is reported even when the body cannot be read.
fn path_failures(rules: &RuleSet, mut path: Map<String, Value>) -> Vec<FieldError> {
    let names: Vec<String> = path.keys().cloned().collect();

    rules
        .apply(&mut path)
        .err()
        .unwrap_or_default()
        .into_iter()
        .filter(|failure| names.contains(&failure.field))
        .collect()
}

/// An absent body is treated as an empty object.
fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, WebError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(WebError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(e) => {
            tracing::debug!("Rejected malformed JSON body: {}", e);
            Err(WebError::BadRequest(
                "Malformed JSON in request body".to_string(),
            ))
        }
    }
}
