use serde::{Deserialize, Serialize};

/// Writable customer columns, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub owner_name: Option<String>,
    pub mobile_number: String,
    pub email_id: String,
    pub address: String,
    pub gst_no: String,
    pub logo: Option<String>,
    pub customer_type_id: Option<i32>,
}

/// Partial update: only contact details may change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPatch {
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
}

/// Filter criteria. Names and address match as substrings, the rest exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerFilter {
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
    pub address: Option<String>,
    pub gst_no: Option<String>,
    pub customer_type_id: Option<i32>,
}

/// Full customer view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_owner_name: Option<String>,
    pub customer_mobile_number: String,
    pub customer_email_id: String,
    pub customer_address: String,
    #[serde(rename = "customerGSTNo")]
    pub customer_gst_no: String,
    pub logo: Option<String>,
    pub customer_status: bool,
    pub customer_type_id: Option<i32>,
}

/// Row of the customer listing, joined with the customer type lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_owner_name: Option<String>,
    pub customer_mobile_number: String,
    pub customer_email_id: String,
    #[serde(rename = "customerGSTNo")]
    pub customer_gst_no: String,
    pub logo: Option<String>,
    pub customer_type_short_description: Option<String>,
}

/// Narrow projection returned by the lookups by name, mobile or email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBrief {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_owner_name: Option<String>,
    pub customer_mobile_number: String,
    pub customer_email_id: String,
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self {
            customer_id: m.customer_id,
            customer_name: m.customer_name,
            customer_owner_name: m.customer_owner_name,
            customer_mobile_number: m.customer_mobile_number,
            customer_email_id: m.customer_email_id,
            customer_address: m.customer_address,
            customer_gst_no: m.customer_gst_no,
            logo: m.logo,
            customer_status: m.customer_status,
            customer_type_id: m.customer_type_id,
        }
    }
}
