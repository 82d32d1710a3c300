use async_trait::async_trait;
use models::errors::ModelError;

use super::domain::{Customer, CustomerBrief, CustomerFilter, CustomerPatch, CustomerSummary, NewCustomer};

/// Persistence for customers. Every read only sees active rows.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert; duplicate active mobile/email fails with `ModelError::Conflict`.
    async fn insert(&self, input: &NewCustomer) -> Result<Customer, ModelError>;
    async fn find_active_by_id(&self, customer_id: i32) -> Result<Option<Customer>, ModelError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<CustomerBrief>, ModelError>;
    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<CustomerBrief>, ModelError>;
    async fn find_by_email(&self, email_id: &str) -> Result<Option<CustomerBrief>, ModelError>;
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<CustomerSummary>, ModelError>;
    async fn filter(&self, filter: &CustomerFilter, offset: u64, limit: u64) -> Result<Vec<CustomerSummary>, ModelError>;
    /// Overwrite every writable column of an active row; `None` when absent.
    async fn update(&self, customer_id: i32, input: &NewCustomer) -> Result<Option<Customer>, ModelError>;
    async fn patch(&self, customer_id: i32, patch: &CustomerPatch) -> Result<Option<Customer>, ModelError>;
    /// Returns affected rows; 0 means no active customer with that id.
    async fn soft_delete(&self, customer_id: i32) -> Result<u64, ModelError>;
    async fn hard_delete(&self, customer_id: i32) -> Result<u64, ModelError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use crate::invoice::repository::mock::MockInvoiceRepository;

    #[derive(Default)]
    struct State {
        next_id: i32,
        rows: Vec<Customer>,
    }

    pub struct MockCustomerRepository {
        state: Mutex<State>,
        types: HashMap<i32, String>,
        invoices: Option<Arc<MockInvoiceRepository>>,
    }

    impl Default for MockCustomerRepository {
        fn default() -> Self {
            let types = [(1, "Retail"), (2, "Wholesale"), (3, "Corporate")]
                .into_iter()
                .map(|(id, d)| (id, d.to_string()))
                .collect();
            Self { state: Mutex::new(State::default()), types, invoices: None }
        }
    }

    impl MockCustomerRepository {
        /// Emulate `fk_invoice_customer`: customers referenced by these
        /// invoices cannot be hard-deleted.
        pub fn with_invoices(mut self, invoices: Arc<MockInvoiceRepository>) -> Self {
            self.invoices = Some(invoices);
            self
        }

        /// Emulates `fk_customer_customer_type`.
        fn check_type(&self, customer_type_id: Option<i32>) -> Result<(), ModelError> {
            match customer_type_id {
                Some(id) if !self.types.contains_key(&id) => Err(ModelError::ForeignKey { field: "customer_type_id" }),
                _ => Ok(()),
            }
        }

        fn summary(&self, c: &Customer) -> CustomerSummary {
            CustomerSummary {
                customer_id: c.customer_id,
                customer_name: c.customer_name.clone(),
                customer_owner_name: c.customer_owner_name.clone(),
                customer_mobile_number: c.customer_mobile_number.clone(),
                customer_email_id: c.customer_email_id.clone(),
                customer_gst_no: c.customer_gst_no.clone(),
                logo: c.logo.clone(),
                customer_type_short_description: c.customer_type_id.and_then(|id| self.types.get(&id).cloned()),
            }
        }
    }

    fn brief(c: &Customer) -> CustomerBrief {
        CustomerBrief {
            customer_id: c.customer_id,
            customer_name: c.customer_name.clone(),
            customer_owner_name: c.customer_owner_name.clone(),
            customer_mobile_number: c.customer_mobile_number.clone(),
            customer_email_id: c.customer_email_id.clone(),
        }
    }

    /// Emulates the partial unique indexes: only active rows other than `skip` count.
    fn check_unique(rows: &[Customer], skip: Option<i32>, mobile: &str, email: &str) -> Result<(), ModelError> {
        let active = rows
            .iter()
            .filter(|c| c.customer_status && Some(c.customer_id) != skip);
        for c in active {
            if c.customer_mobile_number == mobile {
                return Err(ModelError::Conflict { field: "customer_mobile_number" });
            }
            if c.customer_email_id == email {
                return Err(ModelError::Conflict { field: "customer_email_id" });
            }
        }
        Ok(())
    }

    fn filter_matches(c: &Customer, f: &CustomerFilter) -> bool {
        let contains = |field: &str, want: &Option<String>| want.as_deref().map_or(true, |w| field.contains(w));
        let equals = |field: &str, want: &Option<String>| want.as_deref().map_or(true, |w| field == w);
        contains(&c.customer_name, &f.name)
            && f.owner_name.as_deref().map_or(true, |w| c.customer_owner_name.as_deref().map_or(false, |o| o.contains(w)))
            && equals(&c.customer_mobile_number, &f.mobile_number)
            && equals(&c.customer_email_id, &f.email_id)
            && contains(&c.customer_address, &f.address)
            && equals(&c.customer_gst_no, &f.gst_no)
            && f.customer_type_id.map_or(true, |t| c.customer_type_id == Some(t))
    }

    #[async_trait]
    impl CustomerRepository for MockCustomerRepository {
        async fn insert(&self, input: &NewCustomer) -> Result<Customer, ModelError> {
            self.check_type(input.customer_type_id)?;
            let mut st = self.state.lock().await;
            check_unique(&st.rows, None, &input.mobile_number, &input.email_id)?;
            st.next_id += 1;
            let customer = Customer {
                customer_id: st.next_id,
                customer_name: input.name.clone(),
                customer_owner_name: input.owner_name.clone(),
                customer_mobile_number: input.mobile_number.clone(),
                customer_email_id: input.email_id.clone(),
                customer_address: input.address.clone(),
                customer_gst_no: input.gst_no.clone(),
                logo: input.logo.clone(),
                customer_status: true,
                customer_type_id: input.customer_type_id,
            };
            st.rows.push(customer.clone());
            Ok(customer)
        }

        async fn find_active_by_id(&self, customer_id: i32) -> Result<Option<Customer>, ModelError> {
            let st = self.state.lock().await;
            Ok(st
                .rows
                .iter()
                .find(|c| c.customer_status && c.customer_id == customer_id)
                .cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<CustomerBrief>, ModelError> {
            let st = self.state.lock().await;
            Ok(st.rows.iter().find(|c| c.customer_status && c.customer_name == name).map(brief))
        }

        async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<CustomerBrief>, ModelError> {
            let st = self.state.lock().await;
            Ok(st
                .rows
                .iter()
                .find(|c| c.customer_status && c.customer_mobile_number == mobile_number)
                .map(brief))
        }

        async fn find_by_email(&self, email_id: &str) -> Result<Option<CustomerBrief>, ModelError> {
            let st = self.state.lock().await;
            Ok(st
                .rows
                .iter()
                .find(|c| c.customer_status && c.customer_email_id == email_id)
                .map(brief))
        }

        async fn list(&self, offset: u64, limit: u64) -> Result<Vec<CustomerSummary>, ModelError> {
            self.filter(&CustomerFilter::default(), offset, limit).await
        }

        async fn filter(&self, filter: &CustomerFilter, offset: u64, limit: u64) -> Result<Vec<CustomerSummary>, ModelError> {
            let st = self.state.lock().await;
            Ok(st
                .rows
                .iter()
                .filter(|c| c.customer_status && filter_matches(c, filter))
                .skip(offset as usize)
                .take(limit as usize)
                .map(|c| self.summary(c))
                .collect())
        }

        async fn update(&self, customer_id: i32, input: &NewCustomer) -> Result<Option<Customer>, ModelError> {
            let mut st = self.state.lock().await;
            if !st.rows.iter().any(|c| c.customer_status && c.customer_id == customer_id) {
                return Ok(None);
            }
            self.check_type(input.customer_type_id)?;
            check_unique(&st.rows, Some(customer_id), &input.mobile_number, &input.email_id)?;
            let Some(c) = st.rows.iter_mut().find(|c| c.customer_id == customer_id) else {
                return Ok(None);
            };
            c.customer_name = input.name.clone();
            c.customer_owner_name = input.owner_name.clone();
            c.customer_mobile_number = input.mobile_number.clone();
            c.customer_email_id = input.email_id.clone();
            c.customer_address = input.address.clone();
            c.customer_gst_no = input.gst_no.clone();
            c.logo = input.logo.clone();
            c.customer_type_id = input.customer_type_id;
            Ok(Some(c.clone()))
        }

        async fn patch(&self, customer_id: i32, patch: &CustomerPatch) -> Result<Option<Customer>, ModelError> {
            let mut st = self.state.lock().await;
            let Some(current) = st
                .rows
                .iter()
                .find(|c| c.customer_status && c.customer_id == customer_id)
                .cloned()
            else {
                return Ok(None);
            };
            let mobile = patch.mobile_number.clone().unwrap_or(current.customer_mobile_number);
            let email = patch.email_id.clone().unwrap_or(current.customer_email_id);
            check_unique(&st.rows, Some(customer_id), &mobile, &email)?;
            let row = st.rows.iter_mut().find(|r| r.customer_id == customer_id);
            Ok(row.map(|r| {
                r.customer_mobile_number = mobile;
                r.customer_email_id = email;
                r.clone()
            }))
        }

        async fn soft_delete(&self, customer_id: i32) -> Result<u64, ModelError> {
            let mut st = self.state.lock().await;
            match st.rows.iter_mut().find(|r| r.customer_status && r.customer_id == customer_id) {
                Some(r) => {
                    r.customer_status = false;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn hard_delete(&self, customer_id: i32) -> Result<u64, ModelError> {
            let mut st = self.state.lock().await;
            if let Some(invoices) = &self.invoices {
                let exists = st.rows.iter().any(|r| r.customer_id == customer_id);
                if exists && invoices.references_customer(customer_id).await {
                    return Err(ModelError::ForeignKey { field: "customer_id" });
                }
            }
            let before = st.rows.len();
            st.rows.retain(|r| r.customer_id != customer_id);
            Ok((before - st.rows.len()) as u64)
        }
    }
}
