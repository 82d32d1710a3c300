use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use models::errors::ModelError;
use models::{invoice, invoice_item};

use super::domain::{Invoice, InvoiceDetails, InvoiceItem};
use super::repository::InvoiceRepository;

pub struct SeaOrmInvoiceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn load(&self, invoice_id: Uuid) -> Result<Option<InvoiceDetails>, ModelError> {
        let found = invoice::Entity::find_by_id(invoice_id)
            .filter(invoice::Column::InvoiceStatus.eq(true))
            .one(&self.db)
            .await?;
        let Some(header) = found else { return Ok(None) };
        let items = invoice_item::Entity::find()
            .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(invoice_item::Column::ProductId)
            .all(&self.db)
            .await?;
        Ok(Some(InvoiceDetails {
            invoice: header.into(),
            items: items.into_iter().map(Into::into).collect(),
        }))
    }
}

fn item_model(invoice_id: Uuid, item: &InvoiceItem) -> invoice_item::ActiveModel {
    invoice_item::ActiveModel {
        invoice_item_id: Set(item.invoice_item_id),
        invoice_id: Set(invoice_id),
        product_id: Set(item.product_id),
        product_name: Set(item.product_name.clone()),
        quantity: Set(item.quantity),
        price: Set(item.price),
        total: Set(item.total),
    }
}

#[async_trait::async_trait]
impl InvoiceRepository for SeaOrmInvoiceRepository {
    async fn insert(&self, details: &InvoiceDetails) -> Result<InvoiceDetails, ModelError> {
        let inv = &details.invoice;
        let am = invoice::ActiveModel {
            invoice_id: Set(inv.invoice_id),
            invoice_number: Set(inv.invoice_number.clone()),
            shop_id: Set(inv.shop_id),
            customer_id: Set(inv.customer_id),
            amount: Set(inv.amount),
            discount: Set(inv.discount),
            tax_amount: Set(inv.tax_amount),
            payment_mode: Set(inv.payment_mode.clone()),
            due_date: Set(inv.due_date),
            invoice_status: Set(true),
            created_at: Set(inv.created_at),
            updated_at: Set(inv.created_at),
        };

        let txn = self.db.begin().await?;
        let header = invoice::insert(&txn, am).await?;
        if !details.items.is_empty() {
            let items = details.items.iter().map(|i| item_model(inv.invoice_id, i));
            invoice_item::Entity::insert_many(items).exec(&txn).await?;
        }
        txn.commit().await?;

        Ok(InvoiceDetails { invoice: header.into(), items: details.items.clone() })
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Invoice>, ModelError> {
        let rows = invoice::Entity::find()
            .filter(invoice::Column::InvoiceStatus.eq(true))
            .order_by_desc(invoice::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_active_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceDetails>, ModelError> {
        self.load(invoice_id).await
    }

    async fn update_items(&self, invoice_id: Uuid, items: &[InvoiceItem], amount: Decimal) -> Result<Option<InvoiceDetails>, ModelError> {
        let txn = self.db.begin().await?;
        let found = invoice::Entity::find_by_id(invoice_id)
            .filter(invoice::Column::InvoiceStatus.eq(true))
            .one(&txn)
            .await?;
        let Some(header) = found else {
            txn.rollback().await?;
            return Ok(None);
        };
        for item in items {
            invoice_item::Entity::update(item_model(invoice_id, item)).exec(&txn).await?;
        }
        let mut am: invoice::ActiveModel = header.into();
        am.amount = Set(amount);
        am.updated_at = Set(Utc::now().into());
        invoice::Entity::update(am).exec(&txn).await?;
        txn.commit().await?;

        self.load(invoice_id).await
    }

    async fn soft_delete(&self, invoice_id: Uuid) -> Result<u64, ModelError> {
        invoice::soft_delete(&self.db, invoice_id).await
    }
}
