use axum::extract::State;
use service::customer::domain::{Customer, CustomerSummary};
use tracing::info;

use crate::extract::Validated;
use crate::response::{deleted, found, ok, ApiResult};
use crate::state::ServerState;
use crate::validators::customer::{CreateCustomer, CustomerIdParam, FilterCustomers, PatchCustomer, UpdateCustomer};
use crate::validators::PageQuery;

const NOT_FOUND: &str = "Customer not found.";

#[utoipa::path(get, path = "/customer/{customerId}", tag = "customer",
    params(("customerId" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Customer"), (status = 400, description = "Invalid id"), (status = 404, description = "Customer not found")))]
pub async fn get_customer_by_id(
    State(state): State<ServerState>,
    Validated(CustomerIdParam(id)): Validated<CustomerIdParam>,
) -> ApiResult<Customer> {
    found(state.customers.get_customer_by_id(id).await?, "success", NOT_FOUND)
}

#[utoipa::path(get, path = "/getAllCustomers", tag = "customer",
    params(crate::openapi::PageParams),
    responses((status = 200, description = "One page of active customers")))]
pub async fn get_all_customers(
    State(state): State<ServerState>,
    Validated(PageQuery(page)): Validated<PageQuery>,
) -> ApiResult<Vec<CustomerSummary>> {
    ok("success", state.customers.get_all_customers(page).await?)
}

#[utoipa::path(post, path = "/customer", tag = "customer",
    request_body = crate::openapi::CustomerRequest,
    responses((status = 200, description = "Customer added"), (status = 400, description = "Validation failed")))]
pub async fn add_customer(
    State(state): State<ServerState>,
    Validated(CreateCustomer(input)): Validated<CreateCustomer>,
) -> ApiResult<Customer> {
    let customer = state.customers.add_new_customer(input).await?;
    info!(customer_id = customer.customer_id, "customer added");
    ok("Customer added successfully", customer)
}

#[utoipa::path(post, path = "/customer/filter", tag = "customer",
    request_body = crate::openapi::CustomerFilterRequest,
    responses((status = 200, description = "Matching active customers")))]
pub async fn filter_customers(
    State(state): State<ServerState>,
    Validated(req): Validated<FilterCustomers>,
) -> ApiResult<Vec<CustomerSummary>> {
    ok("Filtered customers", state.customers.filter_customers(req.filter, req.page).await?)
}

#[utoipa::path(put, path = "/customer/{customerId}", tag = "customer",
    params(("customerId" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerRequest,
    responses((status = 200, description = "Customer updated"), (status = 404, description = "Customer not found")))]
pub async fn update_customer(
    State(state): State<ServerState>,
    Validated(req): Validated<UpdateCustomer>,
) -> ApiResult<Customer> {
    found(state.customers.update_customer_by_id(req.id, req.input).await?, "Customer updated successfully.", NOT_FOUND)
}

#[utoipa::path(patch, path = "/customer/{customerId}", tag = "customer",
    params(("customerId" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerPatchRequest,
    responses((status = 200, description = "Customer patched"), (status = 404, description = "Customer not found")))]
pub async fn patch_customer(
    State(state): State<ServerState>,
    Validated(req): Validated<PatchCustomer>,
) -> ApiResult<Customer> {
    found(
        state.customers.patch_customer_by_id(req.id, req.patch).await?,
        "Customer partially updated successfully.",
        NOT_FOUND,
    )
}

/// Removes the row.
#[utoipa::path(delete, path = "/customer/{customerId}", tag = "customer",
    params(("customerId" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Customer deleted"), (status = 404, description = "Customer not found")))]
pub async fn delete_customer(
    State(state): State<ServerState>,
    Validated(CustomerIdParam(id)): Validated<CustomerIdParam>,
) -> ApiResult<()> {
    deleted(state.customers.delete_customer(id).await?, "Customer deleted successfully.", NOT_FOUND)
}

#[utoipa::path(delete, path = "/customer/{customerId}/soft", tag = "customer",
    params(("customerId" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Customer soft-deleted"), (status = 404, description = "Customer not found")))]
pub async fn soft_delete_customer(
    State(state): State<ServerState>,
    Validated(CustomerIdParam(id)): Validated<CustomerIdParam>,
) -> ApiResult<()> {
    deleted(state.customers.soft_delete_customer(id).await?, "Customer soft-deleted successfully.", NOT_FOUND)
}
