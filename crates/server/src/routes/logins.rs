use axum::extract::State;
use service::login::domain::LoginRecord;

use crate::extract::Validated;
use crate::response::{ok, ApiResult};
use crate::state::ServerState;
use crate::validators::login::FilterLogins;
use crate::validators::PageQuery;

#[utoipa::path(get, path = "/getAllLogins", tag = "login",
    params(crate::openapi::PageParams),
    responses((status = 200, description = "Login attempts, newest first")))]
pub async fn get_all_logins(
    State(state): State<ServerState>,
    Validated(PageQuery(page)): Validated<PageQuery>,
) -> ApiResult<Vec<LoginRecord>> {
    ok("success", state.logins.get_all_logins(page).await?)
}

#[utoipa::path(post, path = "/filterLogins", tag = "login",
    request_body = crate::openapi::LoginFilterRequest,
    responses((status = 200, description = "Matching login attempts")))]
pub async fn filter_logins(
    State(state): State<ServerState>,
    Validated(req): Validated<FilterLogins>,
) -> ApiResult<Vec<LoginRecord>> {
    ok("Filtered logins", state.logins.filter_logins(req.filter, req.page).await?)
}
