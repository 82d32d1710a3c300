mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};

use support::{app, empty_request, json_request, send};

fn acme() -> Value {
    json!({
        "Name": "Acme Traders",
        "OwnerName": "R. Mehta",
        "MobileNo": "9876543210",
        "Email": "accounts@acme.in",
        "Address": "12 Market Road, Pune",
        "GSTNo": "22AAAAA0000A1Z5",
        "logo": "https://cdn.acme.in/logo.png"
    })
}

#[tokio::test]
async fn add_then_fetch_customer() {
    let app = app();
    let (status, body) = send(&app, json_request("POST", "/customer", &acme())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Customer added successfully");
    let id = body["data"]["customerId"].as_i64().unwrap();
    assert_eq!(body["data"]["customerGSTNo"], "22AAAAA0000A1Z5");

    let (status, body) = send(&app, empty_request("GET", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["customerMobileNumber"], "9876543210");

    let (status, body) = send(&app, empty_request("GET", "/getAllCustomers?limit=5&pageNumber=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_payload_reports_every_field() {
    let mut payload = acme();
    payload["MobileNo"] = json!("12345");
    payload["GSTNo"] = json!("22AAAAA0000A1Z");
    payload["Address"] = json!("short");
    let (status, body) = send(&app(), json_request("POST", "/customer", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INPUT_VALIDATION_ERROR");
    let params: Vec<&str> = body["errors"].as_array().unwrap().iter().map(|e| e["param"].as_str().unwrap()).collect();
    assert_eq!(params, ["MobileNo", "Address", "GSTNo"]);
    assert_eq!(body["errors"][0]["location"], "body");
}

#[tokio::test]
async fn duplicate_mobile_is_a_field_error() {
    let app = app();
    send(&app, json_request("POST", "/customer", &acme())).await;
    let mut second = acme();
    second["Email"] = json!("other@acme.in");
    let (status, body) = send(&app, json_request("POST", "/customer", &second)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "customerMobileNumber");
    assert_eq!(body["errors"][0]["value"], "9876543210");
}

#[tokio::test]
async fn non_numeric_id_and_missing_customer() {
    let app = app();
    let (status, body) = send(&app, empty_request("GET", "/customer/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "customerId");
    assert_eq!(body["errors"][0]["location"], "params");

    let (status, body) = send(&app, empty_request("GET", "/customer/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Customer not found.");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/customer")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"Name\": "))
        .unwrap();
    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "body");
}

#[tokio::test]
async fn patch_then_soft_delete() {
    let app = app();
    let (_, body) = send(&app, json_request("POST", "/customer", &acme())).await;
    let id = body["data"]["customerId"].as_i64().unwrap();

    let (status, body) =
        send(&app, json_request("PATCH", &format!("/customer/{id}"), &json!({"Email": "billing@acme.in"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer partially updated successfully.");
    assert_eq!(body["data"]["customerEmailId"], "billing@acme.in");
    assert_eq!(body["data"]["customerMobileNumber"], "9876543210");

    let (status, body) = send(&app, empty_request("DELETE", &format!("/customer/{id}/soft"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());

    let (status, _) = send(&app, empty_request("GET", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, empty_request("DELETE", &format!("/customer/{id}/soft"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn filter_uses_body_paging() {
    let app = app();
    send(&app, json_request("POST", "/customer", &acme())).await;
    let (status, body) =
        send(&app, json_request("POST", "/customer/filter", &json!({"Name": "Acme", "limit": 10}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Filtered customers");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn huge_page_number_is_rejected_not_overflowed() {
    let (status, body) =
        send(&app(), empty_request("GET", "/getAllCustomers?limit=100&pageNumber=9223372036854775807")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "pageNumber");
    assert_eq!(body["errors"][0]["location"], "query");

    let (status, body) =
        send(&app(), json_request("POST", "/customer/filter", &json!({"limit": 100, "pageNumber": 1000000}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn put_replaces_customer_and_missing_id_is_404() {
    let app = app();
    let (_, body) = send(&app, json_request("POST", "/customer", &acme())).await;
    let id = body["data"]["customerId"].as_i64().unwrap();

    let mut changed = acme();
    changed["Name"] = json!("Acme Wholesale");
    changed["customerTypeId"] = json!(2);
    let (status, body) = send(&app, json_request("PUT", &format!("/customer/{id}"), &changed)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Customer updated successfully.");
    assert_eq!(body["data"]["customerName"], "Acme Wholesale");

    let (status, body) = send(&app, json_request("PUT", "/customer/404", &changed)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Customer not found.");

    let (status, _) = send(&app, json_request("PATCH", "/customer/404", &json!({"Email": "x@acme.in"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_customer_type_is_a_field_error() {
    let mut payload = acme();
    payload["customerTypeId"] = json!(99);
    let (status, body) = send(&app(), json_request("POST", "/customer", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INPUT_VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["param"], "customerTypeId");
}

#[tokio::test]
async fn hard_delete_removes_row_then_404() {
    let app = app();
    let (_, body) = send(&app, json_request("POST", "/customer", &acme())).await;
    let id = body["data"]["customerId"].as_i64().unwrap();

    let (status, body) = send(&app, empty_request("DELETE", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer deleted successfully.");
    assert!(body.get("data").is_none());

    let (status, _) = send(&app, empty_request("GET", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, empty_request("DELETE", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    // gone for good, so the soft path finds nothing either
    let (status, _) = send(&app, empty_request("DELETE", &format!("/customer/{id}/soft"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn soft_deleted_customer_is_hidden_but_can_still_be_purged() {
    let app = app();
    let (_, body) = send(&app, json_request("POST", "/customer", &acme())).await;
    let id = body["data"]["customerId"].as_i64().unwrap();

    let (status, _) = send(&app, empty_request("DELETE", &format!("/customer/{id}/soft"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, empty_request("GET", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, json_request("PUT", &format!("/customer/{id}"), &acme())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request("DELETE", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, empty_request("DELETE", &format!("/customer/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
