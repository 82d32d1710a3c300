use axum::extract::{Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::types::Envelope;
use service::auth::domain::AuthSession;
use tracing::warn;

use crate::errors::ApiError;
use crate::extract::Validated;
use crate::state::ServerState;
use crate::validators::login::Login;

pub const AUTH_COOKIE: &str = "auth_token";

/// Paths reachable without a token.
const PUBLIC_PATHS: [&str; 4] = ["/health", "/register", "/login", "/logout"];

#[utoipa::path(post, path = "/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Token issued, auth_token cookie set"), (status = 401, description = "Invalid email or password")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Validated(Login(input)): Validated<Login>,
) -> Result<(CookieJar, Json<Envelope<AuthSession>>), ApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(Envelope::ok("Login successful", session))))
}

#[utoipa::path(post, path = "/logout", tag = "auth",
    responses((status = 200, description = "auth_token cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Envelope<()>>) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Json(Envelope::message_only("Logged out successfully.")))
}

fn is_public(method: &Method, path: &str) -> bool {
    method == Method::OPTIONS
        || PUBLIC_PATHS.contains(&path)
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
}

/// Token from `Authorization: Bearer`, falling back to the `auth_token` cookie.
fn request_token(req: &Request) -> Result<Option<String>, ApiError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let value = value.to_str().unwrap_or_default();
        return match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
            _ => Err(ApiError::Unauthorized("Authorization header must be 'Bearer <token>'.".into())),
        };
    }
    Ok(CookieJar::from_headers(req.headers()).get(AUTH_COOKIE).map(|c| c.value().to_string()))
}

/// Rejects requests without a valid token when `auth.require_token` is on.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.require_token || is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();
    let Some(token) = request_token(&req)? else {
        warn!(%path, "missing bearer token");
        return Err(ApiError::Unauthorized("Authentication required.".into()));
    };
    if state.auth.verify_token(&token).is_err() {
        warn!(%path, "invalid or expired token");
        return Err(ApiError::Unauthorized("Invalid or expired token.".into()));
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths() {
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::GET, "/docs/index.html"));
        assert!(is_public(&Method::OPTIONS, "/customer/1"));
        assert!(!is_public(&Method::GET, "/getAllCustomers"));
    }

    #[test]
    fn token_from_header_or_cookie() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(request_token(&req).unwrap().as_deref(), Some("abc"));

        let req = Request::builder()
            .header(header::COOKIE, "theme=dark; auth_token=xyz")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(request_token(&req).unwrap().as_deref(), Some("xyz"));

        let req = Request::builder()
            .header(header::AUTHORIZATION, "Basic Zm9v")
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(request_token(&req).is_err());
    }
}
