use common::pagination::Pagination;
use common::validation::{FieldError, FieldRule, Location, RequestBags, RequestSchema, RuleSet};
use serde::Deserialize;
use service::user::domain::{NewUser, UserFilter, UserPatch, UserProfile};
use uuid::Uuid;

use super::{page_from, page_rules, path_param, uuid_id, MOBILE_RE};

const ID: &str = "userId";

fn id_rules() -> RuleSet { uuid_id(ID, "User ID must be a valid UUID") }

fn email() -> FieldRule {
    FieldRule::body("email")
        .default_message("Please provide a valid email address.")
        .trim()
        .not_empty()
        .email()
}

fn name() -> FieldRule {
    FieldRule::body("name").default_message("Please provide a valid name.").trim().not_empty().string()
}

fn mobile() -> FieldRule {
    FieldRule::body("mobileNumber")
        .optional()
        .trim()
        .matches(&MOBILE_RE)
        .with_message("Mobile number must start with +91 (optional) and contain exactly 10 digits.")
}

fn profile_rules() -> RuleSet { RuleSet::new(vec![email(), name(), mobile()]) }

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody {
    email: String,
    name: String,
    #[serde(default)]
    mobile_number: Option<String>,
}

impl From<ProfileBody> for UserProfile {
    fn from(b: ProfileBody) -> Self {
        UserProfile { email: b.email, name: b.name, mobile_number: b.mobile_number }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    #[serde(flatten)]
    profile: ProfileBody,
    password: String,
}

pub struct RegisterUser(pub NewUser);

impl RequestSchema for RegisterUser {
    fn rules() -> RuleSet {
        profile_rules().then(RuleSet::new(vec![FieldRule::body("password")
            .default_message("Please provide a password.")
            .not_empty()
            .string()
            .length(8, None)
            .with_message("Password must be at least 8 characters long.")]))
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let b: RegisterBody = bags.body_as()?;
        Ok(Self(NewUser {
            email: b.profile.email,
            name: b.profile.name,
            mobile_number: b.profile.mobile_number,
            password: b.password,
        }))
    }
}

/// `GET /user/email/:email`
pub struct UserEmailParam(pub String);

impl RequestSchema for UserEmailParam {
    fn rules() -> RuleSet {
        RuleSet::new(vec![FieldRule::param("email")
            .trim()
            .email()
            .with_message("Please provide a valid email address.")])
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(path_param(&bags, "email")?))
    }
}

pub struct UserIdParam(pub Uuid);

impl RequestSchema for UserIdParam {
    fn rules() -> RuleSet { id_rules() }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self(path_param(&bags, ID)?))
    }
}

pub struct UpdateUser {
    pub id: Uuid,
    pub profile: UserProfile,
}

impl RequestSchema for UpdateUser {
    fn rules() -> RuleSet { id_rules().then(profile_rules()) }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        Ok(Self { id: path_param(&bags, ID)?, profile: bags.body_as::<ProfileBody>()?.into() })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mobile_number: Option<String>,
}

pub struct PatchUser {
    pub id: Uuid,
    pub patch: UserPatch,
}

impl RequestSchema for PatchUser {
    fn rules() -> RuleSet { id_rules().then(RuleSet::new(vec![name(), mobile()]).all_optional()) }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let b: PatchBody = bags.body_as()?;
        Ok(Self { id: path_param(&bags, ID)?, patch: UserPatch { name: b.name, mobile_number: b.mobile_number } })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mobile_number: Option<String>,
}

pub struct FilterUsers {
    pub filter: UserFilter,
    pub page: Pagination,
}

impl RequestSchema for FilterUsers {
    fn rules() -> RuleSet {
        RuleSet::new(vec![
            FieldRule::body("email").optional().trim().string(),
            FieldRule::body("name").optional().trim().string(),
            FieldRule::body("mobileNumber").optional().trim().string(),
        ])
        .then(page_rules(Location::Body))
    }

    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>> {
        let b: FilterBody = bags.body_as()?;
        Ok(Self {
            filter: UserFilter { email: b.email, name: b.name, mobile_number: b.mobile_number },
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
    fn register_trims_and_maps_fields() {
        let mut b = bags(json!({
            "email": "  asha@example.com ",
            "name": "Asha",
            "password": "correct horse"
        }));
        RegisterUser::rules().validate(&mut b).unwrap();
        let RegisterUser(u) = RegisterUser::from_bags(b).unwrap();
        assert_eq!(u.email, "asha@example.com");
        assert_eq!(u.mobile_number, None);
        assert_eq!(u.password, "correct horse");
    }

    #[test]
    fn register_rejects_short_password_and_bad_email() {
        let errs = RegisterUser::rules()
            .validate(&mut bags(json!({"email": "nope", "name": "A", "password": "short"})))
            .unwrap_err();
        let params: Vec<_> = errs.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, ["email", "password"]);
        assert_eq!(errs[1].msg, "Password must be at least 8 characters long.");
    }

    #[test]
    fn patch_accepts_partial_body() {
        let mut b = bags(json!({"mobileNumber": "+919876543210"}));
        b.params.insert(ID.into(), json!("0b7e6c1a-3f0d-4b8e-9a55-2c4d6e8f0a1b"));
        PatchUser::rules().validate(&mut b).unwrap();
        let p = PatchUser::from_bags(b).unwrap();
        assert_eq!(p.patch.name, None);
        assert_eq!(p.patch.mobile_number.as_deref(), Some("+919876543210"));
    }
}
