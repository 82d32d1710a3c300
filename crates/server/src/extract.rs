use std::collections::HashMap;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, RawPathParams, Request};
use common::validation::{FieldError, Location, RequestBags, RequestSchema};
use serde_json::{Map, Value};

use crate::errors::ApiError;

/// Extractor that gathers path params, query string and JSON body into
/// [`RequestBags`], runs `T::rules()` and builds `T`. Any failure, including
/// malformed JSON, is a 400 validation envelope.
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: RequestSchema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let mut bags = RequestBags::default();
        if let Ok(raw) = RawPathParams::from_request_parts(&mut parts, state).await {
            for (key, value) in raw.iter() {
                bags.params.insert(key.to_string(), Value::String(value.to_string()));
            }
        }

        let Query(query) = Query::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map_err(|e| single(Location::Query, "query", format!("Invalid query string: {e}")))?;
        bags.query = query.into_iter().map(|(k, v)| (k, Value::String(v))).collect();

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| single(Location::Body, "body", format!("Unable to read request body: {e}")))?;
        bags.body = parse_body(&bytes)?;

        T::rules().validate(&mut bags)?;
        Ok(Validated(T::from_bags(bags)?))
    }
}

fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(single(Location::Body, "body", "Request body must be a JSON object.")),
        Err(e) => Err(single(Location::Body, "body", format!("Malformed JSON: {e}"))),
    }
}

fn single(location: Location, param: &str, msg: impl Into<String>) -> ApiError {
    ApiError::Validation(vec![FieldError::new(param, msg, Value::Null, location)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_an_empty_bag() {
        assert!(parse_body(b"").unwrap().is_empty());
        assert!(parse_body(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn non_object_and_broken_json_are_rejected() {
        assert!(matches!(parse_body(b"[1,2]"), Err(ApiError::Validation(_))));
        match parse_body(b"{\"Name\": ") {
            Err(ApiError::Validation(errs)) => assert_eq!(errs[0].param, "body"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
