use common::pagination::Pagination;
use common::validation::{FieldError, FieldRule, Location, RequestBags, RequestSchema, RuleSet};
use serde::Deserialize;
use service::customer::domain::{CustomerFilter, CustomerPatch, NewCustomer};

use super::{int_id, page_from, page_rules, path_param, GST_RE, MOBILE_RE};

const ID: &str = "customerId";

fn id_rules() -> RuleSet { int_id(ID, "Customer ID must be a number") }

/// Rules for the full customer field set.
pub fn customer_fields() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::body("Name")
            .default_message("Please provide a valid name.")
            .trim()
            .not_empty()
            .string()
            .with_message("Name is required"),
        FieldRule::body("OwnerName").optional().trim().string().with_message("Owner name must be a string"),
        FieldRule::body("MobileNo")
            .default_message("Please provide a valid mobile number.")
            .trim()
            .not_empty()
            .matches(&MOBILE_RE)
            .with_message("Mobile number must start with +91 (optional) and contain exactly 10 digits."),
        FieldRule::body("Email")
            .default_message("Please provide a valid email address.")
            .trim()
            .not_empty()
            .email()
            .with_message("Invalid email format"),
        FieldRule::body("Address")
            .default_message("Please provide a valid address.")
            .trim()
            .not_empty()
            .string()
            .with_message("Address is required")
            .length(10, Some(500))
            .with_message("Address should be between 10 and 500 characters"),
        FieldRule::body("GSTNo")
            .default_message("Please provide a valid GST number.")
            .trim()
            .alphanumeric()
            .with_message("GST number is required")
            .length(15, Some(15))
            .with_message("GST number must be 15 characters")
            .matches(&GST_RE)
            .with_message("GST number must be in the correct format"),
        FieldRule::body("logo").optional().trim().url().with_message("Logo must be a valid URL"),
        FieldRule::body("customerTypeId")
            .optional()
            .int_range(Some(1), None)
            .with_message("Customer type id must be a positive integer")
            .to_int(),
    ])
}

#[derive(Deserialize)]
struct CustomerBody {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "OwnerName", default)]
    owner_name: Option<String>,
    #[serde(rename = "MobileNo")]
    mobile_no: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "GSTNo")]
    gst_no: String,
    #[serde(default)]
    logo: Option<String>,
    #[serde(rename = "customerTypeId", default)]
    customer_type_id: Option<i32>,
}

impl From<CustomerBody> for NewCustomer {
    fn from(b: CustomerBody) -> Self {
        NewCustomer {
            name: b.name,
            owner_name: b.owner_name,
            mobile_number: b.mobile_no,
            email_id: b.email,
            address: b.address,
            gst_no: b.gst_no,
            logo: b.logo,
            customer_type_id: b.customer_type_id,
        }
    }
}

pub struct CustomerIdParam(pub i32);

impl RequestSchema for CustomerIdParam {
    fn rules() -> RuleSet { id_rules() }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(path_param(&bags, ID)?))
    }
}

pub struct CreateCustomer(pub NewCustomer);

impl RequestSchema for CreateCustomer {
    fn rules() -> RuleSet { customer_fields() }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(bags.body_as::<CustomerBody>()?.into()))
    }
}

pub struct UpdateCustomer {
    pub id: i32,
    pub input: NewCustomer,
}

impl RequestSchema for UpdateCustomer {
    fn rules() -> RuleSet { id_rules().then(customer_fields()) }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self { id: path_param(&bags, ID)?, input: bags.body_as::<CustomerBody>()?.into() })
    }
}

#[derive(Deserialize)]
struct PatchBody {
    #[serde(rename = "MobileNo", default)]
    mobile_no: Option<String>,
    #[serde(rename = "Email", default)]
    email: Option<String>,
}

pub struct PatchCustomer {
    pub id: i32,
    pub patch: CustomerPatch,
}

impl RequestSchema for PatchCustomer {
    fn rules() -> RuleSet { id_rules().then(customer_fields().only(&["MobileNo", "Email"]).all_optional()) }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let body: PatchBody = bags.body_as()?;
        Ok(Self {
            id: path_param(&bags, ID)?,
            patch: CustomerPatch { mobile_number: body.mobile_no, email_id: body.email },
        })
    }
}

#[derive(Deserialize)]
struct FilterBody {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "OwnerName", default)]
    owner_name: Option<String>,
    #[serde(rename = "MobileNo", default)]
    mobile_no: Option<String>,
    #[serde(rename = "Email", default)]
    email: Option<String>,
    #[serde(rename = "Address", default)]
    address: Option<String>,
    #[serde(rename = "GSTNo", default)]
    gst_no: Option<String>,
    #[serde(rename = "customerTypeId", default)]
    customer_type_id: Option<i32>,
}

/// Body of `POST /customer/filter`: any subset of the customer fields plus paging.
pub struct FilterCustomers {
    pub filter: CustomerFilter,
    pub page: Pagination,
}

impl RequestSchema for FilterCustomers {
    fn rules() -> RuleSet { customer_fields().all_optional().then(page_rules(Location::Body)) }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let b: FilterBody = bags.body_as()?;
        Ok(Self {
            filter: CustomerFilter {
                name: b.name,
                owner_name: b.owner_name,
                mobile_number: b.mobile_no,
                email_id: b.email,
                address: b.address,
                gst_no: b.gst_no,
                customer_type_id: b.customer_type_id,
            },
            page: page_from(&bags, Location::Body),
        })
    }
}
