use common::pagination::Pagination;
use common::validation::{FieldError, FieldRule, Location, RequestBags, RequestSchema, RuleSet};
use serde::Deserialize;
use service::auth::domain::LoginInput;
use service::login::domain::LoginFilter;
use uuid::Uuid;

use super::{page_from, page_rules};

pub struct Login(pub LoginInput);

impl RequestSchema for Login {
    fn rules() -> RuleSet {
        RuleSet::new(vec![
            FieldRule::body("email")
                .default_message("Please provide a valid email address.")
                .trim()
                .not_empty()
                .email(),
            FieldRule::body("password").default_message("Please provide a password.").not_empty().string(),
        ])
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(bags.body_as()?))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterBody {
    #[serde(default)]
    user_id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    success: Option<bool>,
}

pub struct FilterLogins {
    pub filter: LoginFilter,
    pub page: Pagination,
}

impl RequestSchema for FilterLogins {
    fn rules() -> RuleSet {
        RuleSet::new(vec![
            FieldRule::body("userId").optional().trim().uuid().with_message("User ID must be a valid UUID"),
            FieldRule::body("email").optional().trim().string(),
            FieldRule::body("success")
                .optional()
                .boolean()
                .with_message("Success must be a boolean")
                .to_boolean(),
        ])
        .then(page_rules(Location::Body))
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let b: FilterBody = bags.body_as()?;
        Ok(Self {
            filter: LoginFilter { user_id: b.user_id, email: b.email, success: b.success },
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
    fn login_requires_both_fields() {
        let errs = Login::rules().validate(&mut bags(json!({"email": "a@b.co"}))).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].param, "password");
    }

    #[test]
    fn filter_converts_success_flag() {
        let mut b = bags(json!({"success": "false", "limit": "5"}));
        FilterLogins::rules().validate(&mut b).unwrap();
        let f = FilterLogins::from_bags(b).unwrap();
        assert_eq!(f.filter.success, Some(false));
        assert_eq!(f.page.limit, 5);
    }
}
