use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::pagination::Pagination;
use common::validation::FieldError;
use models::errors::ModelError;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{generate_invoice_number, Invoice, InvoiceDetails, InvoiceItem, InvoiceItemChange, NewInvoice};
use super::repository::InvoiceRepository;
use crate::customer::repository::CustomerRepository;
use crate::errors::{db, ServiceError};
use crate::vendor::repository::VendorRepository;

/// Invoices reference an active shop and an active customer.
#[derive(Clone)]
pub struct InvoiceService {
    invoices: Arc<dyn InvoiceRepository>,
    vendors: Arc<dyn VendorRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        vendors: Arc<dyn VendorRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self { invoices, vendors, customers }
    }

    /// Create an invoice. Line totals and the invoice amount are computed
    /// here; a client `amount` that disagrees with them is rejected.
    #[instrument(skip(self, input), fields(shop_id = %input.shop_id, customer_id = input.customer_id))]
    pub async fn add_invoice(&self, input: NewInvoice) -> Result<InvoiceDetails, ServiceError> {
        let mut errors = Vec::new();
        if self.vendors.find_active_by_id(input.shop_id).await.map_err(db("load vendor"))?.is_none() {
            errors.push(FieldError::body(
                "shopId",
                format!("No active shop found with id {}.", input.shop_id),
                Value::from(input.shop_id.to_string()),
            ));
        }
        if self.customers.find_active_by_id(input.customer_id).await.map_err(db("load customer"))?.is_none() {
            errors.push(FieldError::body(
                "customerId",
                format!("No active customer found with id {}.", input.customer_id),
                Value::from(input.customer_id),
            ));
        }
        let totals: Vec<Option<Decimal>> = input
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| line_total(&mut errors, i, item.quantity, item.price))
            .collect();
        check_money(&mut errors, "discount", input.discount);
        check_money(&mut errors, "taxAmount", input.tax_amount);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let totals: Vec<Decimal> = totals.into_iter().flatten().collect();
        let amount = invoice_amount(&totals, input.discount, input.tax_amount)?;
        if input.amount != amount {
            return Err(ServiceError::invalid(
                "amount",
                format!("Amount must equal the item totals minus discount plus tax ({amount})."),
                input.amount.to_string(),
            ));
        }

        let now: DateTime<Utc> = Utc::now();
        let invoice_number = input
            .invoice_number
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| generate_invoice_number(now));
        let invoice_id = Uuid::new_v4();
        let items = input
            .items
            .into_iter()
            .zip(totals)
            .map(|(i, total)| InvoiceItem {
                invoice_item_id: Uuid::new_v4(),
                product_id: i.product_id,
                product_name: i.product_name,
                total,
                quantity: i.quantity,
                price: i.price,
            })
            .collect();
        let draft = InvoiceDetails {
            invoice: Invoice {
                invoice_id,
                invoice_number: invoice_number.clone(),
                shop_id: input.shop_id,
                customer_id: input.customer_id,
                amount,
                discount: input.discount,
                tax_amount: input.tax_amount,
                payment_mode: input.payment_mode,
                due_date: input.due_date,
                invoice_status: true,
                created_at: now.into(),
            },
            items,
        };

        let created = self.invoices.insert(&draft).await.map_err(|e| match e {
            ModelError::Conflict { field: "invoice_number" } => ServiceError::invalid(
                "invoiceNumber",
                format!("The invoice number {invoice_number} already exists."),
                invoice_number.clone(),
            ),
            other => ServiceError::from_model("add invoice", other),
        })?;
        info!(%invoice_id, invoice_number = %created.invoice.invoice_number, %amount, "invoice_added");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_all_invoices(&self, page: Pagination) -> Result<Vec<Invoice>, ServiceError> {
        let page = page.normalized();
        self.invoices.list(page.offset(), page.limit).await.map_err(db("list invoices"))
    }

    #[instrument(skip(self))]
    pub async fn get_invoice_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceDetails>, ServiceError> {
        self.invoices.find_active_by_id(invoice_id).await.map_err(db("load invoice"))
    }

    /// Apply new quantity/price to existing items and recompute the invoice
    /// amount from the resulting items. Each item may appear once per patch.
    #[instrument(skip(self, changes), fields(changes = changes.len()))]
    pub async fn patch_invoice_items(
        &self,
        invoice_id: Uuid,
        changes: Vec<InvoiceItemChange>,
    ) -> Result<Option<InvoiceDetails>, ServiceError> {
        let Some(current) = self.invoices.find_active_by_id(invoice_id).await.map_err(db("load invoice"))? else {
            return Ok(None);
        };

        let mut errors = Vec::new();
        let mut working = current.items.clone();
        let mut updated: Vec<InvoiceItem> = Vec::with_capacity(changes.len());
        for (i, change) in changes.iter().enumerate() {
            if updated.iter().any(|u| u.invoice_item_id == change.invoice_item_id) {
                errors.push(FieldError::body(
                    format!("items[{i}].invoiceItemId"),
                    format!("Invoice item {} appears more than once.", change.invoice_item_id),
                    Value::from(change.invoice_item_id.to_string()),
                ));
                continue;
            }
            let Some(item) = working.iter_mut().find(|it| it.invoice_item_id == change.invoice_item_id) else {
                errors.push(FieldError::body(
                    format!("items[{i}].invoiceItemId"),
                    format!("Invoice item {} does not belong to this invoice.", change.invoice_item_id),
                    Value::from(change.invoice_item_id.to_string()),
                ));
                continue;
            };
            let Some(total) = line_total(&mut errors, i, change.quantity, change.price) else {
                continue;
            };
            item.quantity = change.quantity;
            item.price = change.price;
            item.total = total;
            updated.push(item.clone());
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let totals: Vec<Decimal> = working.iter().map(|it| it.total).collect();
        let amount = invoice_amount(&totals, current.invoice.discount, current.invoice.tax_amount)?;
        let patched = self
            .invoices
            .update_items(invoice_id, &updated, amount)
            .await
            .map_err(db("patch invoice items"))?;
        if patched.is_some() {
            info!(%invoice_id, %amount, "invoice_items_patched");
        }
        Ok(patched)
    }

    #[instrument(skip(self))]
    pub async fn soft_delete_invoice(&self, invoice_id: Uuid) -> Result<bool, ServiceError> {
        let affected = self.invoices.soft_delete(invoice_id).await.map_err(db("soft delete invoice"))?;
        if affected > 0 {
            info!(%invoice_id, "invoice_soft_deleted");
        }
        Ok(affected > 0)
    }
}

/// Largest value a `decimal(14,2)` column holds.
fn max_money() -> Decimal { Decimal::new(99_999_999_999_999, 2) }

/// Largest value a `decimal(14,3)` quantity column holds.
fn max_quantity() -> Decimal { Decimal::new(99_999_999_999_999, 3) }

/// Validate one line and return its total; `None` after pushing errors.
fn line_total(errors: &mut Vec<FieldError>, index: usize, quantity: Decimal, price: Decimal) -> Option<Decimal> {
    let before = errors.len();
    if quantity < Decimal::ZERO {
        errors.push(FieldError::body(
            format!("items[{index}].quantity"),
            "Quantity must not be negative.",
            Value::String(quantity.to_string()),
        ));
    } else if quantity > max_quantity() {
        errors.push(FieldError::body(
            format!("items[{index}].quantity"),
            "Quantity is too large.",
            Value::String(quantity.to_string()),
        ));
    }
    if price < Decimal::ZERO {
        errors.push(FieldError::body(
            format!("items[{index}].price"),
            "Price must not be negative.",
            Value::String(price.to_string()),
        ));
    } else if price > max_money() {
        errors.push(FieldError::body(
            format!("items[{index}].price"),
            "Price is too large.",
            Value::String(price.to_string()),
        ));
    }
    if errors.len() > before {
        return None;
    }
    match quantity.checked_mul(price).filter(|t| *t <= max_money()) {
        Some(total) => Some(total),
        None => {
            errors.push(FieldError::body(
                format!("items[{index}].quantity"),
                "Line total is too large.",
                Value::String(quantity.to_string()),
            ));
            None
        }
    }
}

fn check_money(errors: &mut Vec<FieldError>, param: &str, value: Decimal) {
    if value < Decimal::ZERO || value > max_money() {
        errors.push(FieldError::body(
            param,
            format!("{param} must be between 0 and {}.", max_money()),
            Value::String(value.to_string()),
        ));
    }
}

/// `Σ totals - discount + tax`, kept inside the column range.
fn invoice_amount(totals: &[Decimal], discount: Decimal, tax: Decimal) -> Result<Decimal, ServiceError> {
    let amount = totals
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(*t))
        .and_then(|sum| sum.checked_sub(discount))
        .and_then(|sum| sum.checked_add(tax));
    match amount {
        Some(a) if a >= Decimal::ZERO && a <= max_money() => Ok(a),
        Some(a) if a < Decimal::ZERO => Err(ServiceError::invalid(
            "discount",
            "Discount must not exceed the item totals plus tax.",
            discount.to_string(),
        )),
        _ => Err(ServiceError::invalid(
            "amount",
            format!("Invoice amount must not exceed {}.", max_money()),
            Value::Null,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::domain::NewCustomer;
    use crate::customer::CustomerService;
    use crate::customer::repository::mock::MockCustomerRepository;
    use crate::invoice::domain::NewInvoiceItem;
    use crate::invoice::repository::mock::MockInvoiceRepository;
    use crate::vendor::domain::NewVendor;
    use crate::vendor::repository::mock::MockVendorRepository;

    struct Fixture {
        svc: InvoiceService,
        customers: CustomerService,
        shop_id: Uuid,
        customer_id: i32,
    }

    async fn fixture() -> Fixture {
        let vendors = Arc::new(MockVendorRepository::default());
        let invoices = Arc::new(MockInvoiceRepository::default());
        let customers = Arc::new(MockCustomerRepository::default().with_invoices(invoices.clone()));
        let shop = vendors
            .insert(&NewVendor {
                shop_name: "Sharma General Store".into(),
                shop_owner_name: None,
                shop_mobile_number: "9876543210".into(),
                shop_email_id: "s@shop.in".into(),
                shop_address: "7 Station Road, Nashik".into(),
                shop_gst_no: None,
                shop_type_id: None,
                shop_country_id: None,
                shop_state_id: None,
                logo: None,
            })
            .await
            .unwrap();
        let customer = customers
            .insert(&NewCustomer {
                name: "Acme Traders".into(),
                owner_name: None,
                mobile_number: "9876543211".into(),
                email_id: "acme@example.com".into(),
                address: "12 Market Road, Pune".into(),
                gst_no: "22AAAAA0000A1Z5".into(),
                logo: None,
                customer_type_id: None,
            })
            .await
            .unwrap();
        Fixture {
            svc: InvoiceService::new(invoices, vendors, customers.clone()),
            customers: CustomerService::new(customers),
            shop_id: shop.shop_id,
            customer_id: customer.customer_id,
        }
    }

    fn dec(s: &str) -> Decimal { s.parse().unwrap() }

    fn new_invoice(f: &Fixture, number: Option<&str>) -> NewInvoice {
        NewInvoice {
            invoice_number: number.map(Into::into),
            shop_id: f.shop_id,
            customer_id: f.customer_id,
            // 200 + 50 + 45 tax
            amount: dec("295.00"),
            discount: dec("0"),
            tax_amount: dec("45.00"),
            payment_mode: "UPI".into(),
            due_date: None,
            items: vec![
                NewInvoiceItem { product_id: 1, product_name: "Rice 5kg".into(), quantity: dec("2"), price: dec("100.00") },
                NewInvoiceItem { product_id: 2, product_name: "Salt".into(), quantity: dec("1"), price: dec("50.00") },
            ],
        }
    }

    #[tokio::test]
    async fn add_generates_number_and_line_totals() {
        let f = fixture().await;
        let created = f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        assert!(created.invoice.invoice_number.starts_with("INV-"));
        assert_eq!(created.items.len(), 2);
        assert_eq!(created.items[0].total, dec("200.00"));
        assert_eq!(created.invoice.amount, dec("295.00"));
        assert!(f.svc.get_invoice_by_id(created.invoice.invoice_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_shop_and_customer_are_reported_together() {
        let f = fixture().await;
        let mut input = new_invoice(&f, None);
        input.shop_id = Uuid::new_v4();
        input.customer_id = 999;
        let err = f.svc.add_invoice(input).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                let params: Vec<_> = errors.iter().map(|e| e.param.as_str()).collect();
                assert_eq!(params, vec!["shopId", "customerId"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_invoice_number_is_rejected() {
        let f = fixture().await;
        f.svc.add_invoice(new_invoice(&f, Some("INV-1"))).await.unwrap();
        let err = f.svc.add_invoice(new_invoice(&f, Some("INV-1"))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e[0].param == "invoiceNumber"));
    }

    #[tokio::test]
    async fn patch_items_adjusts_amount_by_difference() {
        let f = fixture().await;
        let created = f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        let rice = created.items[0].invoice_item_id;

        let patched = f
            .svc
            .patch_invoice_items(
                created.invoice.invoice_id,
                vec![InvoiceItemChange { invoice_item_id: rice, quantity: dec("3"), price: dec("100.00") }],
            )
            .await
            .unwrap()
            .unwrap();
        // 300 + 50 + 45 tax
        assert_eq!(patched.invoice.amount, dec("395.00"));
        assert_eq!(patched.items[0].total, dec("300.00"));
        assert_eq!(patched.items[1].total, dec("50.00"));
    }

    #[tokio::test]
    async fn patch_rejects_foreign_item_and_negative_price() {
        let f = fixture().await;
        let created = f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        let err = f
            .svc
            .patch_invoice_items(
                created.invoice.invoice_id,
                vec![
                    InvoiceItemChange { invoice_item_id: Uuid::new_v4(), quantity: dec("1"), price: dec("1") },
                    InvoiceItemChange { invoice_item_id: created.items[1].invoice_item_id, quantity: dec("1"), price: dec("-5") },
                ],
            )
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors[0].param, "items[0].invoiceItemId");
                assert_eq!(errors[1].param, "items[1].price");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn amount_that_disagrees_with_items_is_rejected() {
        let f = fixture().await;
        let mut input = new_invoice(&f, None);
        input.amount = dec("250.00");
        match f.svc.add_invoice(input).await.unwrap_err() {
            ServiceError::Validation(errors) => {
                assert_eq!(errors[0].param, "amount");
                assert!(errors[0].msg.contains("295"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(f.svc.get_all_invoices(Pagination::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn discount_reduces_computed_amount() {
        let f = fixture().await;
        let mut input = new_invoice(&f, None);
        input.discount = dec("20.00");
        input.amount = dec("275.00");
        let created = f.svc.add_invoice(input).await.unwrap();
        assert_eq!(created.invoice.amount, dec("275.00"));
    }

    #[tokio::test]
    async fn oversized_line_is_a_field_error() {
        let f = fixture().await;
        let mut input = new_invoice(&f, None);
        input.items[0].quantity = dec("79228162514264337593543950335");
        input.items[0].price = dec("2");
        match f.svc.add_invoice(input).await.unwrap_err() {
            ServiceError::Validation(errors) => assert_eq!(errors[0].param, "items[0].quantity"),
            other => panic!("unexpected {other:?}"),
        }

        let mut input = new_invoice(&f, None);
        input.items[1].quantity = dec("99999999999");
        input.items[1].price = dec("99999999999");
        match f.svc.add_invoice(input).await.unwrap_err() {
            ServiceError::Validation(errors) => {
                assert_eq!(errors[0].param, "items[1].quantity");
                assert_eq!(errors[0].msg, "Line total is too large.");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn patch_with_oversized_price_is_rejected() {
        let f = fixture().await;
        let created = f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        let err = f
            .svc
            .patch_invoice_items(
                created.invoice.invoice_id,
                vec![InvoiceItemChange {
                    invoice_item_id: created.items[0].invoice_item_id,
                    quantity: dec("2"),
                    price: dec("79228162514264337593543950335"),
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e[0].param == "items[0].price"));
    }

    #[tokio::test]
    async fn repeated_item_in_one_patch_is_rejected() {
        let f = fixture().await;
        let created = f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        let rice = created.items[0].invoice_item_id;
        let err = f
            .svc
            .patch_invoice_items(
                created.invoice.invoice_id,
                vec![
                    InvoiceItemChange { invoice_item_id: rice, quantity: dec("3"), price: dec("100.00") },
                    InvoiceItemChange { invoice_item_id: rice, quantity: dec("4"), price: dec("100.00") },
                ],
            )
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].param, "items[1].invoiceItemId");
            }
            other => panic!("unexpected {other:?}"),
        }
        let stored = f.svc.get_invoice_by_id(created.invoice.invoice_id).await.unwrap().unwrap();
        assert_eq!(stored.invoice.amount, dec("295.00"));
        assert_eq!(stored.items[0].total, dec("200.00"));
    }

    #[tokio::test]
    async fn patched_amount_matches_item_totals() {
        let f = fixture().await;
        let created = f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        let patched = f
            .svc
            .patch_invoice_items(
                created.invoice.invoice_id,
                vec![
                    InvoiceItemChange { invoice_item_id: created.items[1].invoice_item_id, quantity: dec("2"), price: dec("40.00") },
                    InvoiceItemChange { invoice_item_id: created.items[0].invoice_item_id, quantity: dec("4"), price: dec("100.00") },
                ],
            )
            .await
            .unwrap()
            .unwrap();
        let items: Decimal = patched.items.iter().map(|i| i.total).sum();
        assert_eq!(items, dec("480.00"));
        assert_eq!(patched.invoice.amount, items + patched.invoice.tax_amount - patched.invoice.discount);
    }

    #[tokio::test]
    async fn invoiced_customer_cannot_be_hard_deleted() {
        let f = fixture().await;
        f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        match f.customers.delete_customer(f.customer_id).await.unwrap_err() {
            ServiceError::Validation(errors) => {
                assert_eq!(errors[0].param, "customerId");
                assert_eq!(errors[0].location, common::validation::Location::Params);
            }
            other => panic!("unexpected {other:?}"),
        }
        // soft delete stays available
        assert!(f.customers.soft_delete_customer(f.customer_id).await.unwrap());
    }

    #[tokio::test]
    async fn soft_deleted_invoice_disappears() {
        let f = fixture().await;
        let created = f.svc.add_invoice(new_invoice(&f, None)).await.unwrap();
        let id = created.invoice.invoice_id;
        assert!(f.svc.soft_delete_invoice(id).await.unwrap());
        assert!(!f.svc.soft_delete_invoice(id).await.unwrap());
        assert!(f.svc.get_invoice_by_id(id).await.unwrap().is_none());
        assert!(f.svc.get_all_invoices(Pagination::default()).await.unwrap().is_empty());
        assert!(f.svc.patch_invoice_items(id, vec![]).await.unwrap().is_none());
    }
}
