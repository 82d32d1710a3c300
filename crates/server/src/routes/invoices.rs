use axum::extract::State;
use service::invoice::domain::{Invoice, InvoiceDetails};
use tracing::info;

use crate::extract::Validated;
use crate::response::{deleted, found, ok, ApiResult};
use crate::state::ServerState;
use crate::validators::invoice::{CreateInvoice, InvoiceIdParam, PatchInvoiceItems};
use crate::validators::PageQuery;

const NOT_FOUND: &str = "Invoice not found.";

#[utoipa::path(get, path = "/getAllInvoices", tag = "invoice",
    params(crate::openapi::PageParams),
    responses((status = 200, description = "One page of active invoices")))]
pub async fn get_all_invoices(
    State(state): State<ServerState>,
    Validated(PageQuery(page)): Validated<PageQuery>,
) -> ApiResult<Vec<Invoice>> {
    ok("success", state.invoices.get_all_invoices(page).await?)
}

#[utoipa::path(get, path = "/invoice/{invoiceId}", tag = "invoice",
    params(("invoiceId" = uuid::Uuid, Path, description = "Invoice id")),
    responses((status = 200, description = "Invoice with its items"), (status = 404, description = "Invoice not found")))]
pub async fn get_invoice_by_id(
    State(state): State<ServerState>,
    Validated(InvoiceIdParam(id)): Validated<InvoiceIdParam>,
) -> ApiResult<InvoiceDetails> {
    found(state.invoices.get_invoice_by_id(id).await?, "success", NOT_FOUND)
}

#[utoipa::path(post, path = "/invoice", tag = "invoice",
    request_body = crate::openapi::InvoiceRequest,
    responses((status = 200, description = "Invoice created"), (status = 400, description = "Validation failed")))]
pub async fn add_invoice(
    State(state): State<ServerState>,
    Validated(CreateInvoice(input)): Validated<CreateInvoice>,
) -> ApiResult<InvoiceDetails> {
    let details = state.invoices.add_invoice(input).await?;
    info!(invoice_id = %details.invoice.invoice_id, number = %details.invoice.invoice_number, "invoice created");
    ok("Invoice created successfully", details)
}

#[utoipa::path(patch, path = "/invoice/{invoiceId}", tag = "invoice",
    params(("invoiceId" = uuid::Uuid, Path, description = "Invoice id")),
    request_body = crate::openapi::InvoicePatchRequest,
    responses((status = 200, description = "Items updated, amount recomputed"), (status = 404, description = "Invoice not found")))]
pub async fn patch_invoice(
    State(state): State<ServerState>,
    Validated(req): Validated<PatchInvoiceItems>,
) -> ApiResult<InvoiceDetails> {
    found(state.invoices.patch_invoice_items(req.id, req.changes).await?, "Invoice updated successfully.", NOT_FOUND)
}

#[utoipa::path(delete, path = "/invoice/{invoiceId}", tag = "invoice",
    params(("invoiceId" = uuid::Uuid, Path, description = "Invoice id")),
    responses((status = 200, description = "Invoice soft-deleted"), (status = 404, description = "Invoice not found")))]
pub async fn soft_delete_invoice(
    State(state): State<ServerState>,
    Validated(InvoiceIdParam(id)): Validated<InvoiceIdParam>,
) -> ApiResult<()> {
    deleted(state.invoices.soft_delete_invoice(id).await?, "Invoice soft-deleted successfully.", NOT_FOUND)
}
