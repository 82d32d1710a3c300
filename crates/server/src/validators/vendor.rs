use common::pagination::Pagination;
use common::validation::{FieldError, FieldRule, Location, RequestBags, RequestSchema, RuleSet};
use serde::Deserialize;
use service::vendor::domain::{NewVendor, VendorFilter, VendorPatch};
use uuid::Uuid;

use super::{page_from, page_rules, path_param, uuid_id, GST_RE, MOBILE_RE};

const ID: &str = "vendorId";

fn id_rules() -> RuleSet { uuid_id(ID, "Shop ID must be a valid UUID") }

fn classification(path: &'static str, msg: &'static str) -> FieldRule {
    FieldRule::body(path).optional().trim().int().with_message(msg).to_int()
}

pub fn vendor_fields() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::body("shopName").default_message("Please provide a valid shop name.").trim().not_empty().string(),
        FieldRule::body("shopOwnerName").optional().trim().string(),
        FieldRule::body("shopMobileNumber")
            .default_message("Please provide a valid mobile number.")
            .trim()
            .not_empty()
            .matches(&MOBILE_RE)
            .with_message("Mobile number must start with +91 (optional) and contain exactly 10 digits."),
        FieldRule::body("shopEmailId")
            .default_message("Please provide a valid email address.")
            .trim()
            .not_empty()
            .email()
            .with_message("Email ID must be a valid email address"),
        FieldRule::body("shopAddress")
            .default_message("Please provide a valid address.")
            .trim()
            .not_empty()
            .length(10, Some(500))
            .with_message("Address should be between 10 and 500 characters"),
        FieldRule::body("shopGSTNo")
            .optional()
            .trim()
            .matches(&GST_RE)
            .with_message("GST number must be in the correct format"),
        classification("shopTypeId", "Please provide numeric shop type id"),
        classification("shopCountryId", "Please provide numeric shop country id"),
        classification("shopStateId", "Please provide numeric shop state id"),
        FieldRule::body("logo").optional().trim().url().with_message("Logo must be a valid URL"),
    ])
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorBody {
    shop_name: String,
    #[serde(default)]
    shop_owner_name: Option<String>,
    shop_mobile_number: String,
    shop_email_id: String,
    shop_address: String,
    #[serde(rename = "shopGSTNo", default)]
    shop_gst_no: Option<String>,
    #[serde(default)]
    shop_type_id: Option<i32>,
    #[serde(default)]
    shop_country_id: Option<i32>,
    #[serde(default)]
    shop_state_id: Option<i32>,
    #[serde(default)]
    logo: Option<String>,
}

impl From<VendorBody> for NewVendor {
    fn from(b: VendorBody) -> Self {
        NewVendor {
            shop_name: b.shop_name,
            shop_owner_name: b.shop_owner_name,
            shop_mobile_number: b.shop_mobile_number,
            shop_email_id: b.shop_email_id,
            shop_address: b.shop_address,
            shop_gst_no: b.shop_gst_no,
            shop_type_id: b.shop_type_id,
            shop_country_id: b.shop_country_id,
            shop_state_id: b.shop_state_id,
            logo: b.logo,
        }
    }
}

pub struct VendorIdParam(pub Uuid);

impl RequestSchema for VendorIdParam {
    fn rules() -> RuleSet { id_rules() }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(path_param(&bags, ID)?))
    }
}

pub struct CreateVendor(pub NewVendor);

impl RequestSchema for CreateVendor {
    fn rules() -> RuleSet { vendor_fields() }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(bags.body_as::<VendorBody>()?.into()))
    }
}

pub struct UpdateVendor {
    pub id: Uuid,
    pub input: NewVendor,
}

impl RequestSchema for UpdateVendor {
    fn rules() -> RuleSet { id_rules().then(vendor_fields()) }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self { id: path_param(&bags, ID)?, input: bags.body_as::<VendorBody>()?.into() })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchBody {
    #[serde(default)]
    shop_mobile_number: Option<String>,
    #[serde(default)]
    shop_email_id: Option<String>,
}

pub struct PatchVendor {
    pub id: Uuid,
    pub patch: VendorPatch,
}

impl RequestSchema for PatchVendor {
    fn rules() -> RuleSet {
        id_rules().then(vendor_fields().only(&["shopMobileNumber", "shopEmailId"]).all_optional())
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let b: PatchBody = bags.body_as()?;
        Ok(Self {
            id: path_param(&bags, ID)?,
            patch: VendorPatch { shop_mobile_number: b.shop_mobile_number, shop_email_id: b.shop_email_id },
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterBody {
    #[serde(default)]
    shop_name: Option<String>,
    #[serde(default)]
    shop_type_id: Option<i32>,
    #[serde(default)]
    shop_country_id: Option<i32>,
    #[serde(default)]
    shop_state_id: Option<i32>,
}

pub struct FilterVendors {
    pub filter: VendorFilter,
    pub page: Pagination,
}

impl RequestSchema for FilterVendors {
    fn rules() -> RuleSet {
        RuleSet::new(vec![
            FieldRule::body("shopName").optional().trim().string(),
            classification("shopTypeId", "Please provide numeric shop type id"),
            classification("shopCountryId", "Please provide numeric shop country id"),
            classification("shopStateId", "Please provide numeric shop state id"),
            FieldRule::body("shopStatus")
                .optional()
                .boolean()
                .with_message("Please provide boolean shop status")
                .to_boolean(),
        ])
        .then(page_rules(Location::Body))
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let b: FilterBody = bags.body_as()?;
        Ok(Self {
            filter: VendorFilter {
                shop_name: b.shop_name,
                shop_type_id: b.shop_type_id,
                shop_country_id: b.shop_country_id,
                shop_state_id: b.shop_state_id,
            },
            page: page_from(&bags, Location::Body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn bags(body: Value) -> RequestBags {
        match body {
            Value::Object(m) => RequestBags::with_body(m),
            _ => unreachable!(),
        }
    }

    #[test]
    fn create_vendor_with_string_ids() {
        let mut b = bags(json!({
            "shopName": "Sharma General Store",
            "shopMobileNumber": "9876543210",
            "shopEmailId": "s@shop.in",
            "shopAddress": "7 Station Road, Nashik",
            "shopGSTNo": "27ABCDE1234F1ZZ",
            "shopTypeId": "3"
        }));
        CreateVendor::rules().validate(&mut b).unwrap();
        let CreateVendor(v) = CreateVendor::from_bags(b).unwrap();
        assert_eq!(v.shop_type_id, Some(3));
        assert_eq!(v.shop_gst_no.as_deref(), Some("27ABCDE1234F1ZZ"));
    }

    #[test]
    fn vendor_id_must_be_uuid() {
        let mut b = RequestBags::default();
        b.params.insert(ID.into(), json!("42"));
        let errs = VendorIdParam::rules().validate(&mut b).unwrap_err();
        assert_eq!(errs[0].msg, "Shop ID must be a valid UUID");
    }

    #[test]
    fn filter_rejects_non_numeric_type_and_non_boolean_status() {
        let errs = FilterVendors::rules()
            .validate(&mut bags(json!({"shopTypeId": "abc", "shopStatus": "maybe"})))
            .unwrap_err();
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].msg, "Please provide numeric shop type id");
        assert_eq!(errs[1].param, "shopStatus");
    }
}
