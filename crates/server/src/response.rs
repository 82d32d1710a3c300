use axum::Json;
use common::types::Envelope;

use crate::errors::ApiError;

pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

pub fn ok<T>(message: &str, data: T) -> ApiResult<T> {
    Ok(Json(Envelope::ok(message, data)))
}

/// `Some` becomes a 200 envelope, `None` a 404 with `missing` as message.
pub fn found<T>(value: Option<T>, message: &str, missing: &str) -> ApiResult<T> {
    match value {
        Some(v) => ok(message, v),
        None => Err(ApiError::not_found(missing)),
    }
}

/// Deletes return no `data`.
pub fn deleted(affected: bool, message: &str, missing: &str) -> ApiResult<()> {
    if affected {
        Ok(Json(Envelope::message_only(message)))
    } else {
        Err(ApiError::not_found(missing))
    }
}
