use std::sync::Arc;

use common::pagination::Pagination;
use common::validation::{FieldError, Location};
use models::errors::ModelError;
use serde_json::Value;
use tracing::{info, instrument};

use super::domain::{Customer, CustomerBrief, CustomerFilter, CustomerPatch, CustomerSummary, NewCustomer};
use super::repository::CustomerRepository;
use crate::errors::{db, ServiceError};

/// Customer use cases on top of a [`CustomerRepository`].
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self { Self { repo } }

    /// Create a customer. A mobile number or email already used by an active
    /// customer is reported as a validation error on that field.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::customer::{CustomerService, domain::NewCustomer, repository::mock::MockCustomerRepository};
    /// let svc = CustomerService::new(Arc::new(MockCustomerRepository::default()));
    /// let input = NewCustomer {
    ///     name: "Acme Traders".into(), owner_name: None, mobile_number: "9876543210".into(),
    ///     email_id: "acme@example.com".into(), address: "12 Market Road, Pune".into(),
    ///     gst_no: "22AAAAA0000A1Z5".into(), logo: None, customer_type_id: None,
    /// };
    /// let created = tokio_test::block_on(svc.add_new_customer(input)).unwrap();
    /// assert_eq!(created.customer_id, 1);
    /// assert!(tokio_test::block_on(svc.get_customer_by_id(1)).unwrap().is_some());
    /// ```
    #[instrument(skip(self, input), fields(mobile = %input.mobile_number, email = %input.email_id))]
    pub async fn add_new_customer(&self, input: NewCustomer) -> Result<Customer, ServiceError> {
        let created = self
            .repo
            .insert(&input)
            .await
            .map_err(|e| write_err(e, &input.mobile_number, &input.email_id, input.customer_type_id, "add customer"))?;
        info!(customer_id = created.customer_id, "customer_added");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_all_customers(&self, page: Pagination) -> Result<Vec<CustomerSummary>, ServiceError> {
        let page = page.normalized();
        self.repo.list(page.offset(), page.limit).await.map_err(db("list customers"))
    }

    #[instrument(skip(self))]
    pub async fn filter_customers(&self, filter: CustomerFilter, page: Pagination) -> Result<Vec<CustomerSummary>, ServiceError> {
        let page = page.normalized();
        self.repo
            .filter(&filter, page.offset(), page.limit)
            .await
            .map_err(db("filter customers"))
    }

    #[instrument(skip(self))]
    pub async fn get_customer_by_id(&self, customer_id: i32) -> Result<Option<Customer>, ServiceError> {
        self.repo.find_active_by_id(customer_id).await.map_err(db("load customer"))
    }

    #[instrument(skip(self))]
    pub async fn get_customer_details_by_name(&self, name: &str) -> Result<Option<CustomerBrief>, ServiceError> {
        self.repo.find_by_name(name).await.map_err(db("load customer by name"))
    }

    #[instrument(skip(self))]
    pub async fn get_customer_details_by_mobile_no(&self, mobile_number: &str) -> Result<Option<CustomerBrief>, ServiceError> {
        self.repo.find_by_mobile(mobile_number).await.map_err(db("load customer by mobile number"))
    }

    #[instrument(skip(self))]
    pub async fn get_customer_details_by_email_id(&self, email_id: &str) -> Result<Option<CustomerBrief>, ServiceError> {
        self.repo.find_by_email(email_id).await.map_err(db("load customer by email"))
    }

    /// Replace every writable column of an active customer.
    #[instrument(skip(self, input))]
    pub async fn update_customer_by_id(&self, customer_id: i32, input: NewCustomer) -> Result<Option<Customer>, ServiceError> {
        let updated = self
            .repo
            .update(customer_id, &input)
            .await
            .map_err(|e| write_err(e, &input.mobile_number, &input.email_id, input.customer_type_id, "update customer"))?;
        if updated.is_some() {
            info!(customer_id, "customer_updated");
        }
        Ok(updated)
    }

    /// Change mobile number and/or email of an active customer.
    #[instrument(skip(self, patch))]
    pub async fn patch_customer_by_id(&self, customer_id: i32, patch: CustomerPatch) -> Result<Option<Customer>, ServiceError> {
        let Some(current) = self.repo.find_active_by_id(customer_id).await.map_err(db("load customer"))? else {
            return Ok(None);
        };
        let mobile = patch.mobile_number.clone().unwrap_or(current.customer_mobile_number);
        let email = patch.email_id.clone().unwrap_or(current.customer_email_id);
        let patched = self
            .repo
            .patch(customer_id, &patch)
            .await
            .map_err(|e| write_err(e, &mobile, &email, None, "patch customer"))?;
        if patched.is_some() {
            info!(customer_id, "customer_patched");
        }
        Ok(patched)
    }

    /// Mark the customer inactive. `false` when no active customer has that id.
    #[instrument(skip(self))]
    pub async fn soft_delete_customer(&self, customer_id: i32) -> Result<bool, ServiceError> {
        let affected = self.repo.soft_delete(customer_id).await.map_err(db("soft delete customer"))?;
        if affected > 0 {
            info!(customer_id, "customer_soft_deleted");
        }
        Ok(affected > 0)
    }

    /// Remove the customer row. `false` when no row has that id; a customer
    /// that invoices still reference is a validation error on `customerId`.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: i32) -> Result<bool, ServiceError> {
        let affected = self.repo.hard_delete(customer_id).await.map_err(|e| match e {
            ModelError::ForeignKey { field: "customer_id" } => ServiceError::Validation(vec![FieldError::new(
                "customerId",
                format!("Customer {customer_id} has invoices and cannot be deleted."),
                Value::from(customer_id),
                Location::Params,
            )]),
            other => ServiceError::from_model("delete customer", other),
        })?;
        if affected > 0 {
            info!(customer_id, "customer_deleted");
        }
        Ok(affected > 0)
    }
}

fn write_err(
    err: ModelError,
    mobile: &str,
    email: &str,
    customer_type_id: Option<i32>,
    operation: &'static str,
) -> ServiceError {
    match err {
        ModelError::Conflict { field: "customer_mobile_number" } => ServiceError::invalid(
            "customerMobileNumber",
            format!("The customer mobile number {mobile} already exists. Please try with another number."),
            mobile,
        ),
        ModelError::Conflict { field: "customer_email_id" } => ServiceError::invalid(
            "customerEmailId",
            format!("The customer email id {email} already exists. Please try with another email id."),
            email,
        ),
        ModelError::ForeignKey { field: "customer_type_id" } => ServiceError::invalid(
            "customerTypeId",
            format!("No customer type found with id {}.", customer_type_id.map_or_else(String::new, |id| id.to_string())),
            customer_type_id.map_or(Value::Null, Value::from),
        ),
        other => ServiceError::from_model(operation, other),
    }
}
