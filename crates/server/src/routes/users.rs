use axum::extract::State;
use service::user::domain::User;
use tracing::info;

use crate::extract::Validated;
use crate::response::{deleted, found, ok, ApiResult};
use crate::state::ServerState;
use crate::validators::user::{FilterUsers, PatchUser, RegisterUser, UpdateUser, UserEmailParam, UserIdParam};
use crate::validators::PageQuery;

const NOT_FOUND: &str = "User not found.";

#[utoipa::path(post, path = "/register", tag = "user",
    request_body = crate::openapi::RegisterRequest,
    responses((status = 200, description = "User registered"), (status = 400, description = "Validation failed or email taken")))]
pub async fn register(
    State(state): State<ServerState>,
    Validated(RegisterUser(input)): Validated<RegisterUser>,
) -> ApiResult<User> {
    let user = state.users.register(input).await?;
    info!(user_id = %user.id, "user registered");
    ok("User registered successfully", user)
}

#[utoipa::path(get, path = "/user/email/{email}", tag = "user",
    params(("email" = String, Path, description = "Email address")),
    responses((status = 200, description = "User"), (status = 404, description = "User not found")))]
pub async fn get_user_by_email(
    State(state): State<ServerState>,
    Validated(UserEmailParam(email)): Validated<UserEmailParam>,
) -> ApiResult<User> {
    found(state.users.get_user_by_email(&email).await?, "success", NOT_FOUND)
}

#[utoipa::path(get, path = "/getAllUsers", tag = "user",
    params(crate::openapi::PageParams),
    responses((status = 200, description = "One page of active users")))]
pub async fn get_all_users(
    State(state): State<ServerState>,
    Validated(PageQuery(page)): Validated<PageQuery>,
) -> ApiResult<Vec<User>> {
    ok("success", state.users.get_all_users(page).await?)
}

#[utoipa::path(post, path = "/user", tag = "user",
    request_body = crate::openapi::UserFilterRequest,
    responses((status = 200, description = "Matching active users")))]
pub async fn filter_users(
    State(state): State<ServerState>,
    Validated(req): Validated<FilterUsers>,
) -> ApiResult<Vec<User>> {
    ok("Filtered users", state.users.filter_users(req.filter, req.page).await?)
}

#[utoipa::path(put, path = "/user/{userId}", tag = "user",
    params(("userId" = uuid::Uuid, Path, description = "User id")),
    request_body = crate::openapi::UserRequest,
    responses((status = 200, description = "User updated"), (status = 404, description = "User not found")))]
pub async fn update_user(
    State(state): State<ServerState>,
    Validated(req): Validated<UpdateUser>,
) -> ApiResult<User> {
    found(state.users.update_user_by_id(req.id, req.profile).await?, "User updated successfully.", NOT_FOUND)
}

#[utoipa::path(patch, path = "/user/{userId}", tag = "user",
    params(("userId" = uuid::Uuid, Path, description = "User id")),
    request_body = crate::openapi::UserPatchRequest,
    responses((status = 200, description = "User patched"), (status = 404, description = "User not found")))]
pub async fn patch_user(
    State(state): State<ServerState>,
    Validated(req): Validated<PatchUser>,
) -> ApiResult<User> {
    found(state.users.patch_user_by_id(req.id, req.patch).await?, "User partially updated successfully.", NOT_FOUND)
}

#[utoipa::path(delete, path = "/user/{userId}", tag = "user",
    params(("userId" = uuid::Uuid, Path, description = "User id")),
    responses((status = 200, description = "User soft-deleted"), (status = 404, description = "User not found")))]
pub async fn delete_user(
    State(state): State<ServerState>,
    Validated(UserIdParam(id)): Validated<UserIdParam>,
) -> ApiResult<()> {
    deleted(state.users.soft_delete_user(id).await?, "User deleted successfully.", NOT_FOUND)
}
