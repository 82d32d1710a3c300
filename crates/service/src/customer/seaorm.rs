use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use models::errors::ModelError;
use models::{customer, customer_type_static};

use super::domain::{Customer, CustomerBrief, CustomerFilter, CustomerPatch, CustomerSummary, NewCustomer};
use super::repository::CustomerRepository;

pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn active() -> Select<customer::Entity> {
        customer::Entity::find().filter(customer::Column::CustomerStatus.eq(true))
    }

    /// Explicit projection for the listing, left-joined with the type lookup.
    fn summaries(condition: Condition) -> Select<customer::Entity> {
        Self::active()
            .select_only()
            .columns([
                customer::Column::CustomerId,
                customer::Column::CustomerName,
                customer::Column::CustomerOwnerName,
                customer::Column::CustomerMobileNumber,
                customer::Column::CustomerEmailId,
                customer::Column::CustomerGstNo,
                customer::Column::Logo,
            ])
            .column(customer_type_static::Column::CustomerTypeShortDescription)
            .join(JoinType::LeftJoin, customer::Relation::CustomerType.def())
            .filter(condition)
            .order_by_asc(customer::Column::CustomerId)
    }

    async fn find_brief(&self, condition: Condition) -> Result<Option<CustomerBrief>, ModelError> {
        let row = Self::active()
            .select_only()
            .columns([
                customer::Column::CustomerId,
                customer::Column::CustomerName,
                customer::Column::CustomerOwnerName,
                customer::Column::CustomerMobileNumber,
                customer::Column::CustomerEmailId,
            ])
            .filter(condition)
            .into_model::<BriefRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn page(&self, condition: Condition, offset: u64, limit: u64) -> Result<Vec<CustomerSummary>, ModelError> {
        let rows = Self::summaries(condition)
            .offset(offset)
            .limit(limit)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    customer_id: i32,
    customer_name: String,
    customer_owner_name: Option<String>,
    customer_mobile_number: String,
    customer_email_id: String,
    customer_gst_no: String,
    logo: Option<String>,
    customer_type_short_description: Option<String>,
}

impl From<SummaryRow> for CustomerSummary {
    fn from(r: SummaryRow) -> Self {
        Self {
            customer_id: r.customer_id,
            customer_name: r.customer_name,
            customer_owner_name: r.customer_owner_name,
            customer_mobile_number: r.customer_mobile_number,
            customer_email_id: r.customer_email_id,
            customer_gst_no: r.customer_gst_no,
            logo: r.logo,
            customer_type_short_description: r.customer_type_short_description,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct BriefRow {
    customer_id: i32,
    customer_name: String,
    customer_owner_name: Option<String>,
    customer_mobile_number: String,
    customer_email_id: String,
}

impl From<BriefRow> for CustomerBrief {
    fn from(r: BriefRow) -> Self {
        Self {
            customer_id: r.customer_id,
            customer_name: r.customer_name,
            customer_owner_name: r.customer_owner_name,
            customer_mobile_number: r.customer_mobile_number,
            customer_email_id: r.customer_email_id,
        }
    }
}

fn filter_condition(f: &CustomerFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = &f.name {
        cond = cond.add(customer::Column::CustomerName.contains(v));
    }
    if let Some(v) = &f.owner_name {
        cond = cond.add(customer::Column::CustomerOwnerName.contains(v));
    }
    if let Some(v) = &f.mobile_number {
        cond = cond.add(customer::Column::CustomerMobileNumber.eq(v.as_str()));
    }
    if let Some(v) = &f.email_id {
        cond = cond.add(customer::Column::CustomerEmailId.eq(v.as_str()));
    }
    if let Some(v) = &f.address {
        cond = cond.add(customer::Column::CustomerAddress.contains(v));
    }
    if let Some(v) = &f.gst_no {
        cond = cond.add(customer::Column::CustomerGstNo.eq(v.as_str()));
    }
    if let Some(v) = f.customer_type_id {
        cond = cond.add(customer::Column::CustomerTypeId.eq(v));
    }
    cond
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn insert(&self, input: &NewCustomer) -> Result<Customer, ModelError> {
        let now = Utc::now().into();
        let am = customer::ActiveModel {
            customer_name: Set(input.name.clone()),
            customer_owner_name: Set(input.owner_name.clone()),
            customer_mobile_number: Set(input.mobile_number.clone()),
            customer_email_id: Set(input.email_id.clone()),
            customer_address: Set(input.address.clone()),
            customer_gst_no: Set(input.gst_no.clone()),
            logo: Set(input.logo.clone()),
            customer_status: Set(true),
            customer_type_id: Set(input.customer_type_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(customer::insert(&self.db, am).await?.into())
    }

    async fn find_active_by_id(&self, customer_id: i32) -> Result<Option<Customer>, ModelError> {
        let found = Self::active()
            .filter(customer::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CustomerBrief>, ModelError> {
        self.find_brief(Condition::all().add(customer::Column::CustomerName.eq(name))).await
    }

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<CustomerBrief>, ModelError> {
        self.find_brief(Condition::all().add(customer::Column::CustomerMobileNumber.eq(mobile_number))).await
    }

    async fn find_by_email(&self, email_id: &str) -> Result<Option<CustomerBrief>, ModelError> {
        self.find_brief(Condition::all().add(customer::Column::CustomerEmailId.eq(email_id))).await
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<CustomerSummary>, ModelError> {
        self.page(Condition::all(), offset, limit).await
    }

    async fn filter(&self, filter: &CustomerFilter, offset: u64, limit: u64) -> Result<Vec<CustomerSummary>, ModelError> {
        self.page(filter_condition(filter), offset, limit).await
    }

    async fn update(&self, customer_id: i32, input: &NewCustomer) -> Result<Option<Customer>, ModelError> {
        let Some(found) = Self::active()
            .filter(customer::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let mut am: customer::ActiveModel = found.into();
        am.customer_name = Set(input.name.clone());
        am.customer_owner_name = Set(input.owner_name.clone());
        am.customer_mobile_number = Set(input.mobile_number.clone());
        am.customer_email_id = Set(input.email_id.clone());
        am.customer_address = Set(input.address.clone());
        am.customer_gst_no = Set(input.gst_no.clone());
        am.logo = Set(input.logo.clone());
        am.customer_type_id = Set(input.customer_type_id);
        am.updated_at = Set(Utc::now().into());
        Ok(Some(customer::update(&self.db, am).await?.into()))
    }

    async fn patch(&self, customer_id: i32, patch: &CustomerPatch) -> Result<Option<Customer>, ModelError> {
        let Some(found) = Self::active()
            .filter(customer::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        if patch.mobile_number.is_none() && patch.email_id.is_none() {
            return Ok(Some(found.into()));
        }
        let mut am: customer::ActiveModel = found.into();
        if let Some(m) = &patch.mobile_number {
            am.customer_mobile_number = Set(m.clone());
        }
        if let Some(e) = &patch.email_id {
            am.customer_email_id = Set(e.clone());
        }
        am.updated_at = Set(Utc::now().into());
        Ok(Some(customer::update(&self.db, am).await?.into()))
    }

    async fn soft_delete(&self, customer_id: i32) -> Result<u64, ModelError> {
        customer::soft_delete(&self.db, customer_id).await
    }

    async fn hard_delete(&self, customer_id: i32) -> Result<u64, ModelError> {
        customer::hard_delete(&self.db, customer_id).await
    }
}
