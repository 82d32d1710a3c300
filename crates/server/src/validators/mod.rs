//! Rule sets per endpoint and the request types they produce.
//!
//! Each request type implements [`RequestSchema`]: `rules()` runs in the
//! [`Validated`](crate::extract::Validated) extractor and `from_bags()` narrows
//! the validated bags into the service input.

pub mod customer;
pub mod invoice;
pub mod login;
pub mod user;
pub mod vendor;

use std::str::FromStr;

use common::pagination::{Pagination, MAX_PAGE_NUMBER};
use common::validation::{FieldError, FieldRule, Location, RequestBags, RequestSchema, RuleSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+91)?\d{10}$").expect("mobile regex"));
pub static GST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9][A-Z][0-9A-Z]$").expect("gst regex"));

/// Optional `limit` / `pageNumber`, converted to numbers.
pub fn page_rules(location: Location) -> RuleSet {
    RuleSet::new(vec![
        FieldRule::new(location, "limit")
            .optional()
            .trim()
            .int_range(Some(0), None)
            .with_message("Please provide the valid limit.")
            .to_int(),
        FieldRule::new(location, "pageNumber")
            .optional()
            .trim()
            .int_range(Some(0), Some(MAX_PAGE_NUMBER as i64))
            .with_message("Please provide the valid page number.")
            .to_int(),
    ])
}

pub fn page_from(bags: &RequestBags, location: Location) -> Pagination {
    let bag = bags.bag(location);
    let get = |key: &str| bag.get(key).and_then(Value::as_u64);
    Pagination::new(get("limit"), get("pageNumber"))
}

pub fn int_id(name: &'static str, msg: &'static str) -> RuleSet {
    RuleSet::new(vec![FieldRule::param(name).int().with_message(msg).to_int()])
}

pub fn uuid_id(name: &'static str, msg: &'static str) -> RuleSet {
    RuleSet::new(vec![FieldRule::param(name).uuid().with_message(msg)])
}

/// Read a path param that its rule already checked.
pub fn path_param<T: FromStr>(bags: &RequestBags, name: &str) -> Result<T, Vec<FieldError>> {
    bags.param(name).ok_or_else(|| {
        let value = bags.params.get(name).cloned().unwrap_or(Value::Null);
        vec![FieldError::new(name, "Invalid value", value, Location::Params)]
    })
}

/// `?limit=&pageNumber=` on the list endpoints.
pub struct PageQuery(pub Pagination);

impl RequestSchema for PageQuery {
    fn rules() -> RuleSet { page_rules(Location::Query) }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(PageQuery(page_from(&bags, Location::Query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mobile_pattern() {
        for ok in ["+919876543210", "9876543210"] {
            assert!(MOBILE_RE.is_match(ok), "{ok}");
        }
        for bad in ["12345", "+91987654321", "98765432101"] {
            assert!(!MOBILE_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn gst_pattern() {
        for ok in ["22AAAAA0000A1Z5", "27ABCDE1234F1ZZ"] {
            assert!(GST_RE.is_match(ok), "{ok}");
        }
        for bad in ["22aaaaa0000A1Z5", "22AAAAA0000A1Z55", "22AAAAA00001AZ5"] {
            assert!(!GST_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn page_query_defaults_and_clamps() {
        let mut bags = RequestBags::default();
        PageQuery::rules().validate(&mut bags).unwrap();
        assert_eq!(PageQuery::from_bags(bags).unwrap().0, Pagination::default());

        let mut bags = RequestBags::default();
        bags.query.insert("limit".into(), json!("500"));
        bags.query.insert("pageNumber".into(), json!("0"));
        PageQuery::rules().validate(&mut bags).unwrap();
        let page = PageQuery::from_bags(bags).unwrap().0;
        assert_eq!(page.limit, 100);
        assert_eq!(page.page_number, 1);

        let mut bad = RequestBags::default();
        bad.query.insert("limit".into(), json!("ten"));
        let errs = PageQuery::rules().validate(&mut bad).unwrap_err();
        assert_eq!(errs[0].msg, "Please provide the valid limit.");
    }

    #[test]
    fn page_number_beyond_bound_is_rejected() {
        let mut bags = RequestBags::default();
        bags.query.insert("limit".into(), json!("100"));
        bags.query.insert("pageNumber".into(), json!("9223372036854775807"));
        let errs = PageQuery::rules().validate(&mut bags).unwrap_err();
        assert_eq!(errs[0].param, "pageNumber");
        assert_eq!(errs[0].location, Location::Query);

        let mut bags = RequestBags::default();
        bags.query.insert("pageNumber".into(), json!(MAX_PAGE_NUMBER.to_string()));
        PageQuery::rules().validate(&mut bags).unwrap();
        assert_eq!(PageQuery::from_bags(bags).unwrap().0.page_number, MAX_PAGE_NUMBER);
    }
}
