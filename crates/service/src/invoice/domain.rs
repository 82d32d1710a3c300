use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    /// Generated when absent.
    pub invoice_number: Option<String>,
    pub shop_id: Uuid,
    pub customer_id: i32,
    pub amount: Decimal,
    pub discount: Decimal,
    pub tax_amount: Decimal,
    pub payment_mode: String,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub items: Vec<NewInvoiceItem>,
}

/// New quantity and price for one existing line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemChange {
    pub invoice_item_id: Uuid,
    pub quantity: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub invoice_item_id: Uuid,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub shop_id: Uuid,
    pub customer_id: i32,
    pub amount: Decimal,
    pub discount: Decimal,
    pub tax_amount: Decimal,
    pub payment_mode: String,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub invoice_status: bool,
    pub created_at: DateTime<FixedOffset>,
}

/// Invoice header with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetails {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
}

/// `INV-<yyyymmdd>-<8 hex>`
pub fn generate_invoice_number(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("INV-{}-{}", now.format("%Y%m%d"), suffix)
}

impl From<models::invoice::Model> for Invoice {
    fn from(m: models::invoice::Model) -> Self {
        Self {
            invoice_id: m.invoice_id,
            invoice_number: m.invoice_number,
            shop_id: m.shop_id,
            customer_id: m.customer_id,
            amount: m.amount,
            discount: m.discount,
            tax_amount: m.tax_amount,
            payment_mode: m.payment_mode,
            due_date: m.due_date,
            invoice_status: m.invoice_status,
            created_at: m.created_at,
        }
    }
}

impl From<models::invoice_item::Model> for InvoiceItem {
    fn from(m: models::invoice_item::Model) -> Self {
        Self {
            invoice_item_id: m.invoice_item_id,
            product_id: m.product_id,
            product_name: m.product_name,
            quantity: m.quantity,
            price: m.price,
            total: m.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn invoice_number_has_date_and_hex_suffix() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let n = generate_invoice_number(now);
        assert!(n.starts_with("INV-20240501-"));
        let suffix = &n["INV-20240501-".len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
