pub mod auth;
pub mod customers;
pub mod invoices;
pub mod logins;
pub mod users;
pub mod vendors;

use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/getAllCustomers", get(customers::get_all_customers))
        .route("/customer", post(customers::add_customer))
        .route("/customer/filter", post(customers::filter_customers))
        .route(
            "/customer/:customerId",
            get(customers::get_customer_by_id)
                .put(customers::update_customer)
                .patch(customers::patch_customer)
                .delete(customers::delete_customer),
        )
        .route("/customer/:customerId/soft", delete(customers::soft_delete_customer))
}

fn vendor_routes() -> Router<ServerState> {
    Router::new()
        .route("/getAllShops", get(vendors::get_all_vendors))
        .route("/addVendor", post(vendors::add_vendor))
        .route("/filterVendor", post(vendors::filter_vendors))
        .route(
            "/vendor/:vendorId",
            get(vendors::get_vendor_by_id)
                .put(vendors::update_vendor)
                .patch(vendors::patch_vendor)
                .delete(vendors::soft_delete_vendor),
        )
}

fn invoice_routes() -> Router<ServerState> {
    Router::new()
        .route("/getAllInvoices", get(invoices::get_all_invoices))
        .route("/invoice", post(invoices::add_invoice))
        .route(
            "/invoice/:invoiceId",
            get(invoices::get_invoice_by_id)
                .patch(invoices::patch_invoice)
                .delete(invoices::soft_delete_invoice),
        )
}

fn user_routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/getAllUsers", get(users::get_all_users))
        .route("/user", post(users::filter_users))
        .route("/user/email/:email", get(users::get_user_by_email))
        .route(
            "/user/:userId",
            axum::routing::put(users::update_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
}

fn login_routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/getAllLogins", get(logins::get_all_logins))
        .route("/filterLogins", post(logins::filter_logins))
}

/// Build the full application router: resources, health, docs, token guard and HTTP tracing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(customer_routes())
        .merge(vendor_routes())
        .merge(invoice_routes())
        .merge(user_routes())
        .merge(login_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
