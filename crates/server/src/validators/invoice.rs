use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use common::validation::{FieldError, FieldRule, RequestBags, RequestSchema, RuleSet};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use service::invoice::domain::{InvoiceItemChange, NewInvoice, NewInvoiceItem};
use uuid::Uuid;

use super::{path_param, uuid_id};

const ID: &str = "invoiceId";

fn id_rules() -> RuleSet { uuid_id(ID, "Invoice ID must be a valid UUID") }

fn parse_decimal(v: &Value) -> Option<Decimal> {
    let text = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)).ok()
}

fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let v = Value::deserialize(d)?;
    parse_decimal(&v).ok_or_else(|| D::Error::custom(format!("{v} is not a number")))
}

fn optional_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_decimal(&v).map(Some).ok_or_else(|| D::Error::custom(format!("{v} is not a number"))),
    }
}

/// RFC 3339, or a naive datetime / date read as UTC.
fn parse_due_date(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))?;
    Some(naive.and_utc().fixed_offset())
}

fn due_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
    match Option::<String>::deserialize(d)? {
        None => Ok(None),
        Some(s) => parse_due_date(&s).map(Some).ok_or_else(|| D::Error::custom(format!("invalid date {s}"))),
    }
}

pub fn invoice_fields() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::body("amount").default_message("Amount must be a numeric value.").trim().not_empty().numeric(),
        FieldRule::body("paymentMode").default_message("Payment mode is required.").trim().not_empty().string(),
        FieldRule::body("shopId").default_message("Shop ID must be a valid UUID.").trim().uuid(),
        FieldRule::body("customerId")
            .default_message("Customer ID must be a numeric value.")
            .trim()
            .not_empty()
            .int()
            .to_int(),
        FieldRule::body("invoiceNumber")
            .optional()
            .trim()
            .string()
            .with_message("Invoice number must be a string."),
        FieldRule::body("dueDate").optional().trim().iso8601().with_message("Due date must be a valid date."),
        FieldRule::body("discount").optional().trim().numeric().with_message("Discount must be a numeric value."),
        FieldRule::body("taxAmount").optional().trim().numeric().with_message("Tax amount must be a numeric value."),
        FieldRule::body("items").array(true).with_message("Items must be an array."),
        FieldRule::body("items.*.productId")
            .default_message("Product ID must be a numeric value.")
            .trim()
            .int()
            .to_int(),
        FieldRule::body("items.*.productName")
            .default_message("Product name must be a string.")
            .trim()
            .not_empty()
            .string(),
        FieldRule::body("items.*.quantity").default_message("Quantity must be a numeric value.").trim().numeric(),
        FieldRule::body("items.*.price").default_message("Price must be a numeric value.").trim().numeric(),
        FieldRule::body("items.*.total").optional().trim().numeric().with_message("Total must be a numeric value."),
    ])
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemBody {
    product_id: i32,
    product_name: String,
    #[serde(deserialize_with = "decimal")]
    quantity: Decimal,
    #[serde(deserialize_with = "decimal")]
    price: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceBody {
    #[serde(default)]
    invoice_number: Option<String>,
    shop_id: Uuid,
    customer_id: i32,
    #[serde(deserialize_with = "decimal")]
    amount: Decimal,
    #[serde(default, deserialize_with = "optional_decimal")]
    discount: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    tax_amount: Option<Decimal>,
    payment_mode: String,
    #[serde(default, deserialize_with = "due_date")]
    due_date: Option<DateTime<FixedOffset>>,
    items: Vec<ItemBody>,
}

impl From<InvoiceBody> for NewInvoice {
    fn from(b: InvoiceBody) -> Self {
        NewInvoice {
            invoice_number: b.invoice_number,
            shop_id: b.shop_id,
            customer_id: b.customer_id,
            amount: b.amount,
            discount: b.discount.unwrap_or_default(),
            tax_amount: b.tax_amount.unwrap_or_default(),
            payment_mode: b.payment_mode,
            due_date: b.due_date,
            items: b
                .items
                .into_iter()
                .map(|i| NewInvoiceItem {
                    product_id: i.product_id,
                    product_name: i.product_name,
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect(),
        }
    }
}

pub struct InvoiceIdParam(pub Uuid);

impl RequestSchema for InvoiceIdParam {
    fn rules() -> RuleSet { id_rules() }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(path_param(&bags, ID)?))
    }
}

pub struct CreateInvoice(pub NewInvoice);

impl RequestSchema for CreateInvoice {
    fn rules() -> RuleSet { invoice_fields() }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(bags.body_as::<InvoiceBody>()?.into()))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemChangeBody {
    invoice_item_id: Uuid,
    #[serde(deserialize_with = "decimal")]
    quantity: Decimal,
    #[serde(deserialize_with = "decimal")]
    price: Decimal,
}

#[derive(Deserialize)]
struct PatchBody {
    items: Vec<ItemChangeBody>,
}

/// New quantity and price for existing line items.
pub struct PatchInvoiceItems {
    pub id: Uuid,
    pub changes: Vec<InvoiceItemChange>,
}

impl RequestSchema for PatchInvoiceItems {
    fn rules() -> RuleSet {
        id_rules().then(RuleSet::new(vec![
            FieldRule::body("items").array(true).with_message("Items must be an array."),
            FieldRule::body("items.*.invoiceItemId")
                .default_message("Invoice item ID must be a valid UUID.")
                .trim()
                .uuid(),
            FieldRule::body("items.*.quantity").default_message("Quantity must be a numeric value.").trim().numeric(),
            FieldRule::body("items.*.price").default_message("Price must be a numeric value.").trim().numeric(),
        ]))
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let body: PatchBody = bags.body_as()?;
        Ok(Self {
            id: path_param(&bags, ID)?,
            changes: body
                .items
                .into_iter()
                .map(|i| InvoiceItemChange { invoice_item_id: i.invoice_item_id, quantity: i.quantity, price: i.price })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bags(body: Value) -> RequestBags {
        match body {
            Value::Object(m) => RequestBags::with_body(m),
            _ => unreachable!(),
        }
    }

    fn dec(s: &str) -> Decimal { Decimal::from_str(s).unwrap() }

    fn sample() -> Value {
        json!({
            "amount": "250.50",
            "paymentMode": "UPI",
            "shopId": "6f2b1c3e-8a41-4c55-9d0e-1a2b3c4d5e6f",
            "customerId": "7",
            "dueDate": "2026-11-30",
            "items": [
                {"productId": 1, "productName": "Rice 5kg", "quantity": 2, "price": "100.25"},
                {"productId": "2", "productName": "Salt", "quantity": "1", "price": 50}
            ]
        })
    }

    #[test]
    fn create_invoice_parses_numbers_from_strings_and_numbers() {
        let mut b = bags(sample());
        CreateInvoice::rules().validate(&mut b).unwrap();
        let CreateInvoice(inv) = CreateInvoice::from_bags(b).unwrap();
        assert_eq!(inv.customer_id, 7);
        assert_eq!(inv.amount, dec("250.50"));
        assert_eq!(inv.discount, Decimal::ZERO);
        assert_eq!(inv.items.len(), 2);
        assert_eq!(inv.items[1].product_id, 2);
        assert_eq!(inv.items[0].price, dec("100.25"));
        assert_eq!(inv.due_date.map(|d| d.to_rfc3339()).as_deref(), Some("2026-11-30T00:00:00+00:00"));
    }

    #[test]
    fn item_errors_carry_indexed_params() {
        let mut body = sample();
        body["items"][1]["quantity"] = json!("two");
        body["items"][0]["productName"] = json!("  ");
        let errs = CreateInvoice::rules().validate(&mut bags(body)).unwrap_err();
        let params: Vec<_> = errs.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, ["items[0].productName", "items[1].quantity"]);
        assert_eq!(errs[1].msg, "Quantity must be a numeric value.");
    }

    #[test]
    fn empty_items_and_bad_shop_are_rejected() {
        let mut body = sample();
        body["items"] = json!([]);
        body["shopId"] = json!("12");
        let errs = CreateInvoice::rules().validate(&mut bags(body)).unwrap_err();
        assert!(errs.iter().any(|e| e.param == "shopId"));
        assert!(errs.iter().any(|e| e.param == "items" && e.msg == "Items must be an array."));
    }

    #[test]
    fn patch_requires_item_ids() {
        let mut b = bags(json!({"items": [{"quantity": 3, "price": 10}]}));
        b.params.insert(ID.into(), json!("6f2b1c3e-8a41-4c55-9d0e-1a2b3c4d5e6f"));
        let errs = PatchInvoiceItems::rules().validate(&mut b).unwrap_err();
        assert_eq!(errs[0].param, "items[0].invoiceItemId");
    }

    #[test]
    fn due_date_formats() {
        assert!(parse_due_date("2026-01-02T10:00:00+05:30").is_some());
        assert!(parse_due_date("2026-01-02T10:00:00").is_some());
        assert!(parse_due_date("02/01/2026").is_none());
    }
}
