//! Request shapes for the OpenAPI document. The handlers read requests through
//! validators; these types only describe them.

use serde::Deserialize;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `?limit=&pageNumber=`; limit defaults to 10 (max 100), pages start at 1.
#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PageParams {
    pub limit: Option<u64>,
    pub page_number: Option<u64>,
}

#[derive(Deserialize, ToSchema)]
pub struct CustomerRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "OwnerName")]
    pub owner_name: Option<String>,
    /// `+91` optional, then 10 digits.
    #[serde(rename = "MobileNo")]
    pub mobile_no: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// 10 to 500 characters.
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "GSTNo")]
    #[schema(example = "22AAAAA0000A1Z5")]
    pub gst_no: String,
    pub logo: Option<String>,
    #[serde(rename = "customerTypeId")]
    pub customer_type_id: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct CustomerPatchRequest {
    #[serde(rename = "MobileNo")]
    pub mobile_no: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilterRequest {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "OwnerName")]
    pub owner_name: Option<String>,
    #[serde(rename = "MobileNo")]
    pub mobile_no: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "GSTNo")]
    pub gst_no: Option<String>,
    pub customer_type_id: Option<i32>,
    pub limit: Option<u64>,
    pub page_number: Option<u64>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorRequest {
    pub shop_name: String,
    pub shop_owner_name: Option<String>,
    pub shop_mobile_number: String,
    pub shop_email_id: String,
    pub shop_address: String,
    #[serde(rename = "shopGSTNo")]
    pub shop_gst_no: Option<String>,
    pub shop_type_id: Option<i32>,
    pub shop_country_id: Option<i32>,
    pub shop_state_id: Option<i32>,
    pub logo: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorPatchRequest {
    pub shop_mobile_number: Option<String>,
    pub shop_email_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorFilterRequest {
    pub shop_name: Option<String>,
    pub shop_type_id: Option<i32>,
    pub shop_country_id: Option<i32>,
    pub shop_state_id: Option<i32>,
    pub limit: Option<u64>,
    pub page_number: Option<u64>,
}

/// Decimal fields take a JSON number or a numeric string.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemRequest {
    pub product_id: i32,
    pub product_name: String,
    #[schema(example = "2")]
    pub quantity: String,
    #[schema(example = "100.25")]
    pub price: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    /// Generated as `INV-<yyyymmdd>-<8 hex>` when absent.
    pub invoice_number: Option<String>,
    pub shop_id: Uuid,
    pub customer_id: i32,
    #[schema(example = "250.50")]
    pub amount: String,
    pub discount: Option<String>,
    pub tax_amount: Option<String>,
    pub payment_mode: String,
    /// ISO-8601 date or datetime.
    pub due_date: Option<String>,
    pub items: Vec<InvoiceItemRequest>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemChangeRequest {
    pub invoice_item_id: Uuid,
    pub quantity: String,
    pub price: String,
}

#[derive(Deserialize, ToSchema)]
pub struct InvoicePatchRequest {
    pub items: Vec<InvoiceItemChangeRequest>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub mobile_number: Option<String>,
    /// At least 8 characters.
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub email: String,
    pub name: String,
    pub mobile_number: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatchRequest {
    pub name: Option<String>,
    pub mobile_number: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub limit: Option<u64>,
    pub page_number: Option<u64>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginFilterRequest {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub success: Option<bool>,
    pub limit: Option<u64>,
    pub page_number: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::get_customer_by_id,
        crate::routes::customers::get_all_customers,
        crate::routes::customers::add_customer,
        crate::routes::customers::filter_customers,
        crate::routes::customers::update_customer,
        crate::routes::customers::patch_customer,
        crate::routes::customers::delete_customer,
        crate::routes::customers::soft_delete_customer,
        crate::routes::vendors::get_all_vendors,
        crate::routes::vendors::get_vendor_by_id,
        crate::routes::vendors::add_vendor,
        crate::routes::vendors::filter_vendors,
        crate::routes::vendors::update_vendor,
        crate::routes::vendors::patch_vendor,
        crate::routes::vendors::soft_delete_vendor,
        crate::routes::invoices::get_all_invoices,
        crate::routes::invoices::get_invoice_by_id,
        crate::routes::invoices::add_invoice,
        crate::routes::invoices::patch_invoice,
        crate::routes::invoices::soft_delete_invoice,
        crate::routes::users::register,
        crate::routes::users::get_user_by_email,
        crate::routes::users::get_all_users,
        crate::routes::users::filter_users,
        crate::routes::users::update_user,
        crate::routes::users::patch_user,
        crate::routes::users::delete_user,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::logins::get_all_logins,
        crate::routes::logins::filter_logins,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerRequest,
            CustomerPatchRequest,
            CustomerFilterRequest,
            VendorRequest,
            VendorPatchRequest,
            VendorFilterRequest,
            InvoiceItemRequest,
            InvoiceRequest,
            InvoiceItemChangeRequest,
            InvoicePatchRequest,
            RegisterRequest,
            UserRequest,
            UserPatchRequest,
            UserFilterRequest,
            LoginRequest,
            LoginFilterRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "customer"),
        (name = "vendor"),
        (name = "invoice"),
        (name = "user"),
        (name = "auth"),
        (name = "login")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in ["/customer/{customerId}", "/getAllShops", "/invoice", "/register", "/login", "/filterLogins"] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
