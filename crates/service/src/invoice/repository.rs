use async_trait::async_trait;
use models::errors::ModelError;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::domain::{Invoice, InvoiceDetails, InvoiceItem};

/// Persistence for invoices. Reads only see active invoices.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert header and items together; a taken invoice number is a conflict.
    async fn insert(&self, invoice: &InvoiceDetails) -> Result<InvoiceDetails, ModelError>;
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Invoice>, ModelError>;
    async fn find_active_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceDetails>, ModelError>;
    /// Persist changed line items and the new invoice amount; `None` when the invoice is gone.
    async fn update_items(&self, invoice_id: Uuid, items: &[InvoiceItem], amount: Decimal) -> Result<Option<InvoiceDetails>, ModelError>;
    async fn soft_delete(&self, invoice_id: Uuid) -> Result<u64, ModelError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockInvoiceRepository {
        rows: Mutex<Vec<InvoiceDetails>>,
    }

    impl MockInvoiceRepository {
        /// Whether any invoice, soft-deleted ones included, points at the customer.
        pub async fn references_customer(&self, customer_id: i32) -> bool {
            self.rows.lock().await.iter().any(|r| r.invoice.customer_id == customer_id)
        }
    }

    #[async_trait]
    impl InvoiceRepository for MockInvoiceRepository {
        async fn insert(&self, invoice: &InvoiceDetails) -> Result<InvoiceDetails, ModelError> {
            let mut rows = self.rows.lock().await;
            if rows.iter().any(|r| r.invoice.invoice_number == invoice.invoice.invoice_number) {
                return Err(ModelError::Conflict { field: "invoice_number" });
            }
            rows.push(invoice.clone());
            Ok(invoice.clone())
        }

        async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Invoice>, ModelError> {
            let rows = self.rows.lock().await;
            Ok(rows
                .iter()
                .filter(|r| r.invoice.invoice_status)
                .skip(offset as usize)
                .take(limit as usize)
                .map(|r| r.invoice.clone())
                .collect())
        }

        async fn find_active_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceDetails>, ModelError> {
            let rows = self.rows.lock().await;
            Ok(rows
                .iter()
                .find(|r| r.invoice.invoice_status && r.invoice.invoice_id == invoice_id)
                .cloned())
        }

        async fn update_items(&self, invoice_id: Uuid, items: &[InvoiceItem], amount: Decimal) -> Result<Option<InvoiceDetails>, ModelError> {
            let mut rows = self.rows.lock().await;
            let Some(row) = rows
                .iter_mut()
                .find(|r| r.invoice.invoice_status && r.invoice.invoice_id == invoice_id)
            else {
                return Ok(None);
            };
            for changed in items {
                if let Some(existing) = row.items.iter_mut().find(|i| i.invoice_item_id == changed.invoice_item_id) {
                    *existing = changed.clone();
                }
            }
            row.invoice.amount = amount;
            Ok(Some(row.clone()))
        }

        async fn soft_delete(&self, invoice_id: Uuid) -> Result<u64, ModelError> {
            let mut rows = self.rows.lock().await;
            match rows
                .iter_mut()
                .find(|r| r.invoice.invoice_status && r.invoice.invoice_id == invoice_id)
            {
                Some(r) => {
                    r.invoice.invoice_status = false;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }
}
