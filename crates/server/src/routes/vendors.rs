use axum::extract::State;
use service::vendor::domain::Vendor;
use tracing::info;

use crate::extract::Validated;
use crate::response::{deleted, found, ok, ApiResult};
use crate::state::ServerState;
use crate::validators::vendor::{CreateVendor, FilterVendors, PatchVendor, UpdateVendor, VendorIdParam};
use crate::validators::PageQuery;

const NOT_FOUND: &str = "Shop not found.";

#[utoipa::path(get, path = "/getAllShops", tag = "vendor",
    params(crate::openapi::PageParams),
    responses((status = 200, description = "One page of active shops")))]
pub async fn get_all_vendors(
    State(state): State<ServerState>,
    Validated(PageQuery(page)): Validated<PageQuery>,
) -> ApiResult<Vec<Vendor>> {
    ok("success", state.vendors.get_all_vendors(page).await?)
}

#[utoipa::path(get, path = "/vendor/{vendorId}", tag = "vendor",
    params(("vendorId" = uuid::Uuid, Path, description = "Shop id")),
    responses((status = 200, description = "Shop"), (status = 404, description = "Shop not found")))]
pub async fn get_vendor_by_id(
    State(state): State<ServerState>,
    Validated(VendorIdParam(id)): Validated<VendorIdParam>,
) -> ApiResult<Vendor> {
    found(state.vendors.get_vendor_by_id(id).await?, "success", NOT_FOUND)
}

#[utoipa::path(post, path = "/addVendor", tag = "vendor",
    request_body = crate::openapi::VendorRequest,
    responses((status = 200, description = "Shop added"), (status = 400, description = "Validation failed")))]
pub async fn add_vendor(
    State(state): State<ServerState>,
    Validated(CreateVendor(input)): Validated<CreateVendor>,
) -> ApiResult<Vendor> {
    let vendor = state.vendors.add_vendor(input).await?;
    info!(shop_id = %vendor.shop_id, "shop added");
    ok("Shop added successfully", vendor)
}

#[utoipa::path(post, path = "/filterVendor", tag = "vendor",
    request_body = crate::openapi::VendorFilterRequest,
    responses((status = 200, description = "Matching active shops")))]
pub async fn filter_vendors(
    State(state): State<ServerState>,
    Validated(req): Validated<FilterVendors>,
) -> ApiResult<Vec<Vendor>> {
    ok("Filtered shops", state.vendors.filter_vendors(req.filter, req.page).await?)
}

#[utoipa::path(put, path = "/vendor/{vendorId}", tag = "vendor",
    params(("vendorId" = uuid::Uuid, Path, description = "Shop id")),
    request_body = crate::openapi::VendorRequest,
    responses((status = 200, description = "Shop updated"), (status = 404, description = "Shop not found")))]
pub async fn update_vendor(
    State(state): State<ServerState>,
    Validated(req): Validated<UpdateVendor>,
) -> ApiResult<Vendor> {
    found(state.vendors.update_vendor_by_id(req.id, req.input).await?, "Shop updated successfully.", NOT_FOUND)
}

#[utoipa::path(patch, path = "/vendor/{vendorId}", tag = "vendor",
    params(("vendorId" = uuid::Uuid, Path, description = "Shop id")),
    request_body = crate::openapi::VendorPatchRequest,
    responses((status = 200, description = "Shop patched"), (status = 404, description = "Shop not found")))]
pub async fn patch_vendor(
    State(state): State<ServerState>,
    Validated(req): Validated<PatchVendor>,
) -> ApiResult<Vendor> {
    found(state.vendors.patch_vendor_by_id(req.id, req.patch).await?, "Shop partially updated successfully.", NOT_FOUND)
}

#[utoipa::path(delete, path = "/vendor/{vendorId}", tag = "vendor",
    params(("vendorId" = uuid::Uuid, Path, description = "Shop id")),
    responses((status = 200, description = "Shop soft-deleted"), (status = 404, description = "Shop not found")))]
pub async fn soft_delete_vendor(
    State(state): State<ServerState>,
    Validated(VendorIdParam(id)): Validated<VendorIdParam>,
) -> ApiResult<()> {
    deleted(state.vendors.soft_delete_vendor(id).await?, "Shop soft-deleted successfully.", NOT_FOUND)
}
