//! Declarative request validation.
//!
//! A [`RuleSet`] is an ordered list of [`FieldRule`]s. Each rule targets one
//! field in one of the request bags (path params, query string, JSON body) and
//! runs its checks in order; the first failing check produces a single
//! [`FieldError`] for that field. Sanitizers (`trim`) run before the checks,
//! conversions (`to_int`, `to_boolean`) after all checks passed.
//!
//! Paths use dots for nesting and `*` for every element of an array, e.g.
//! `items.*.quantity`.

use std::borrow::Cow;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const DEFAULT_MESSAGE: &str = "Invalid value";
static NULL: Value = Value::Null;

pub static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email regex")
});
pub static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*(:\d{1,5})?(/[^\s]*)?$").expect("url regex"));
static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("numeric regex"));
static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("int regex"));

/// Which request bag a field was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
    Query,
}

/// One rule failure, reported back to the client as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
    pub value: Value,
    pub location: Location,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>, value: Value, location: Location) -> Self {
        Self { param: param.into(), msg: msg.into(), value, location }
    }

    pub fn body(param: impl Into<String>, msg: impl Into<String>, value: Value) -> Self {
        Self::new(param, msg, value, Location::Body)
    }
}

/// The three field bags of a request after extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBags {
    pub params: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Map<String, Value>,
}

impl RequestBags {
    pub fn with_body(body: Map<String, Value>) -> Self {
        Self { body, ..Self::default() }
    }

    pub fn bag(&self, location: Location) -> &Map<String, Value> {
        match location {
            Location::Body => &self.body,
            Location::Params => &self.params,
            Location::Query => &self.query,
        }
    }

    fn bag_mut(&mut self, location: Location) -> &mut Map<String, Value> {
        match location {
            Location::Body => &mut self.body,
            Location::Params => &mut self.params,
            Location::Query => &mut self.query,
        }
    }

    /// Parse a path param; numbers and strings are both accepted.
    pub fn param<T: FromStr>(&self, key: &str) -> Option<T> {
        scalar_text(self.params.get(key)?)?.parse().ok()
    }

    /// Parse a query value; numbers and strings are both accepted.
    pub fn query_value<T: FromStr>(&self, key: &str) -> Option<T> {
        scalar_text(self.query.get(key)?)?.parse().ok()
    }

    /// Deserialize the (already validated) body into a strict DTO.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, Vec<FieldError>> {
        serde_json::from_value(Value::Object(self.body.clone())).map_err(|e| {
            vec![FieldError::body("body", format!("Invalid request body: {e}"), Value::Null)]
        })
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone)]
enum Check {
    NotEmpty,
    String,
    Int { min: Option<i64>, max: Option<i64> },
    Numeric,
    Boolean,
    Uuid,
    Email,
    Url,
    Iso8601,
    Alphanumeric,
    Length { min: usize, max: Option<usize> },
    Matches(&'static Regex),
    Array { non_empty: bool },
}

impl Check {
    fn passes(&self, v: &Value) -> bool {
        match self {
            Check::NotEmpty => match v {
                Value::Null => false,
                Value::String(s) => !s.is_empty(),
                Value::Array(a) => !a.is_empty(),
                Value::Object(o) => !o.is_empty(),
                _ => true,
            },
            Check::String => v.is_string(),
            Check::Int { min, max } => {
                let n = match v {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) if INT_RE.is_match(s) => s.parse::<i64>().ok(),
                    _ => None,
                };
                match n {
                    Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                    None => false,
                }
            }
            Check::Numeric => match v {
                Value::Number(_) => true,
                Value::String(s) => NUMERIC_RE.is_match(s),
                _ => false,
            },
            Check::Boolean => match v {
                Value::Bool(_) => true,
                Value::String(s) => matches!(s.as_str(), "true" | "false" | "0" | "1"),
                _ => false,
            },
            Check::Uuid => v.as_str().map_or(false, |s| uuid::Uuid::parse_str(s).is_ok()),
            Check::Email => v.as_str().map_or(false, |s| EMAIL_RE.is_match(s)),
            Check::Url => v.as_str().map_or(false, |s| URL_RE.is_match(s)),
            Check::Iso8601 => v.as_str().map_or(false, is_iso8601),
            Check::Alphanumeric => v
                .as_str()
                .map_or(false, |s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())),
            Check::Length { min, max } => match scalar_text(v) {
                Some(s) => {
                    let len = s.chars().count();
                    len >= *min && max.map_or(true, |m| len <= m)
                }
                None => false,
            },
            Check::Matches(re) => scalar_text(v).map_or(false, |s| re.is_match(&s)),
            Check::Array { non_empty } => v.as_array().map_or(false, |a| !*non_empty || !a.is_empty()),
        }
    }
}

fn is_iso8601(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[derive(Debug, Clone, Copy)]
enum Conversion {
    Int,
    Boolean,
}

#[derive(Debug, Clone)]
struct Step {
    check: Check,
    msg: Option<Cow<'static, str>>,
}

/// Checks for a single field (or every element matched by a `*` path).
#[derive(Debug, Clone)]
pub struct FieldRule {
    location: Location,
    path: Cow<'static, str>,
    default_msg: Cow<'static, str>,
    optional: bool,
    trim: bool,
    steps: Vec<Step>,
    conversion: Option<Conversion>,
}

impl FieldRule {
    pub fn new(location: Location, path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            location,
            path: path.into(),
            default_msg: Cow::Borrowed(DEFAULT_MESSAGE),
            optional: false,
            trim: false,
            steps: Vec::new(),
            conversion: None,
        }
    }

    pub fn body(path: impl Into<Cow<'static, str>>) -> Self { Self::new(Location::Body, path) }
    pub fn param(path: impl Into<Cow<'static, str>>) -> Self { Self::new(Location::Params, path) }
    pub fn query(path: impl Into<Cow<'static, str>>) -> Self { Self::new(Location::Query, path) }

    pub fn path(&self) -> &str { &self.path }
    pub fn location(&self) -> Location { self.location }

    fn push(mut self, check: Check) -> Self {
        self.steps.push(Step { check, msg: None });
        self
    }

    /// Message used by every check that has no message of its own.
    pub fn default_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.default_msg = msg.into();
        self
    }

    /// Message for the check added just before this call.
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.msg = Some(msg.into());
        } else {
            self.default_msg = msg.into();
        }
        self
    }

    /// Skip every check when the field is absent or `null`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn not_empty(self) -> Self { self.push(Check::NotEmpty) }
    pub fn string(self) -> Self { self.push(Check::String) }
    pub fn int(self) -> Self { self.push(Check::Int { min: None, max: None }) }
    pub fn int_range(self, min: Option<i64>, max: Option<i64>) -> Self { self.push(Check::Int { min, max }) }
    pub fn numeric(self) -> Self { self.push(Check::Numeric) }
    pub fn boolean(self) -> Self { self.push(Check::Boolean) }
    pub fn uuid(self) -> Self { self.push(Check::Uuid) }
    pub fn email(self) -> Self { self.push(Check::Email) }
    pub fn url(self) -> Self { self.push(Check::Url) }
    pub fn iso8601(self) -> Self { self.push(Check::Iso8601) }
    pub fn alphanumeric(self) -> Self { self.push(Check::Alphanumeric) }
    pub fn length(self, min: usize, max: Option<usize>) -> Self { self.push(Check::Length { min, max }) }
    pub fn matches(self, re: &'static Regex) -> Self { self.push(Check::Matches(re)) }
    pub fn array(self, non_empty: bool) -> Self { self.push(Check::Array { non_empty }) }

    /// Replace a valid integer string with a JSON number.
    pub fn to_int(mut self) -> Self {
        self.conversion = Some(Conversion::Int);
        self
    }

    /// Replace `"true"`/`"false"`/`"1"`/`"0"` with a JSON boolean.
    pub fn to_boolean(mut self) -> Self {
        self.conversion = Some(Conversion::Boolean);
        self
    }

    fn run(&self, bags: &mut RequestBags, errors: &mut Vec<FieldError>) {
        let location = self.location;
        let mut root = Value::Object(std::mem::take(bags.bag_mut(location)));
        for (param, pointer) in expand(&root, &self.path) {
            if let Some(err) = self.run_one(&mut root, &param, &pointer) {
                errors.push(err);
            }
        }
        if let Value::Object(map) = root {
            *bags.bag_mut(location) = map;
        }
    }

    fn run_one(&self, root: &mut Value, param: &str, pointer: &str) -> Option<FieldError> {
        let present = root.pointer(pointer).map_or(false, |v| !v.is_null());
        if !present && self.optional {
            return None;
        }
        if self.trim {
            if let Some(Value::String(s)) = root.pointer_mut(pointer) {
                let trimmed = s.trim().to_string();
                if trimmed.len() != s.len() {
                    *s = trimmed;
                }
            }
        }
        let value = root.pointer(pointer).cloned().unwrap_or(Value::Null);
        for step in &self.steps {
            if !step.check.passes(&value) {
                let msg = step.msg.as_ref().unwrap_or(&self.default_msg).to_string();
                return Some(FieldError::new(param, msg, value, self.location));
            }
        }
        if let (Some(conversion), Some(slot)) = (self.conversion, root.pointer_mut(pointer)) {
            convert(slot, conversion);
        }
        None
    }
}

fn convert(slot: &mut Value, conversion: Conversion) {
    let converted = match (conversion, &*slot) {
        (Conversion::Int, Value::String(s)) => s.parse::<i64>().ok().map(Value::from),
        (Conversion::Boolean, Value::String(s)) => match s.as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    };
    if let Some(v) = converted {
        *slot = v;
    }
}

/// Resolve a dotted path with `*` wildcards into concrete `(param, json pointer)` pairs.
fn expand(root: &Value, path: &str) -> Vec<(String, String)> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut out = Vec::new();
    expand_into(root, &segments, String::new(), String::new(), &mut out);
    out
}

fn expand_into(current: &Value, segments: &[&str], param: String, pointer: String, out: &mut Vec<(String, String)>) {
    let Some((head, rest)) = segments.split_first() else {
        out.push((param, pointer));
        return;
    };
    if *head == "*" {
        if let Value::Array(items) = current {
            for (i, item) in items.iter().enumerate() {
                expand_into(item, rest, format!("{param}[{i}]"), format!("{pointer}/{i}"), out);
            }
        }
        return;
    }
    let next_param = if param.is_empty() { head.to_string() } else { format!("{param}.{head}") };
    let next_pointer = format!("{pointer}/{}", head.replace('~', "~0").replace('/', "~1"));
    let next = current.get(*head).unwrap_or(&NULL);
    expand_into(next, rest, next_param, next_pointer, out);
}

/// Ordered collection of field rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self { Self { rules } }

    /// Concatenate two sets, e.g. an id rule followed by the create rules.
    pub fn then(mut self, other: RuleSet) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Same rules, each skipped when its field is absent.
    pub fn all_optional(self) -> Self {
        Self { rules: self.rules.into_iter().map(FieldRule::optional).collect() }
    }

    /// Keep only the rules whose path is listed.
    pub fn only(self, paths: &[&str]) -> Self {
        Self { rules: self.rules.into_iter().filter(|r| paths.contains(&r.path())).collect() }
    }

    pub fn rules(&self) -> &[FieldRule] { &self.rules }

    /// Run every rule; sanitizers and conversions are written back into `bags`.
    pub fn validate(&self, bags: &mut RequestBags) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            rule.run(bags, &mut errors);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A request type that can be produced from validated bags.
pub trait RequestSchema: Sized {
    fn rules() -> RuleSet;
    fn from_bags(bags: RequestBags) -> Result<Self, Vec<FieldError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+91)?\d{10}$").unwrap());

    fn body(v: Value) -> RequestBags {
        match v {
            Value::Object(m) => RequestBags::with_body(m),
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn first_failure_per_field_is_reported() {
        let rules = RuleSet::new(vec![FieldRule::body("Name")
            .not_empty()
            .with_message("Name is required")
            .string()
            .with_message("Name must be a string")]);
        let mut bags = body(json!({}));
        let errs = rules.validate(&mut bags).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].param, "Name");
        assert_eq!(errs[0].msg, "Name is required");
        assert_eq!(errs[0].location, Location::Body);
    }

    #[test]
    fn optional_fields_skip_when_absent_but_check_when_present() {
        let rules = RuleSet::new(vec![FieldRule::body("logo").optional().url()]);
        assert!(rules.validate(&mut body(json!({}))).is_ok());
        assert!(rules.validate(&mut body(json!({"logo": null}))).is_ok());
        assert!(rules.validate(&mut body(json!({"logo": "https://cdn.example.com/a.png"}))).is_ok());
        let errs = rules.validate(&mut body(json!({"logo": "not a url"}))).unwrap_err();
        assert_eq!(errs[0].value, json!("not a url"));
    }

    #[test]
    fn trim_is_written_back_before_checks() {
        let rules = RuleSet::new(vec![FieldRule::body("Name").trim().not_empty()]);
        let mut bags = body(json!({"Name": "  Acme  "}));
        rules.validate(&mut bags).unwrap();
        assert_eq!(bags.body["Name"], json!("Acme"));

        let errs = rules.validate(&mut body(json!({"Name": "   "}))).unwrap_err();
        assert_eq!(errs[0].value, json!(""));
    }

    #[test]
    fn regex_rule_accepts_and_rejects() {
        let rules = RuleSet::new(vec![FieldRule::body("MobileNo").matches(&MOBILE)]);
        for ok in ["+919876543210", "9876543210"] {
            assert!(rules.validate(&mut body(json!({"MobileNo": ok}))).is_ok(), "{ok}");
        }
        for bad in ["12345", "+91987654321"] {
            assert!(rules.validate(&mut body(json!({"MobileNo": bad}))).is_err(), "{bad}");
        }
    }

    #[test]
    fn int_rule_and_conversion_on_params() {
        let rules = RuleSet::new(vec![FieldRule::param("customerId").int().to_int()]);
        let mut bags = RequestBags::default();
        bags.params.insert("customerId".into(), json!("42"));
        rules.validate(&mut bags).unwrap();
        assert_eq!(bags.params["customerId"], json!(42));
        assert_eq!(bags.param::<i32>("customerId"), Some(42));

        let mut bad = RequestBags::default();
        bad.params.insert("customerId".into(), json!("abc"));
        let errs = rules.validate(&mut bad).unwrap_err();
        assert_eq!(errs[0].location, Location::Params);
    }

    #[test]
    fn length_bounds_count_characters() {
        let rules = RuleSet::new(vec![FieldRule::body("Address").length(10, Some(500))]);
        assert!(rules.validate(&mut body(json!({"Address": "short"}))).is_err());
        assert!(rules.validate(&mut body(json!({"Address": "12 Long Street, Pune"}))).is_ok());
        assert!(rules.validate(&mut body(json!({"Address": "x".repeat(501)}))).is_err());
    }

    #[test]
    fn wildcard_paths_check_every_element() {
        let rules = RuleSet::new(vec![
            FieldRule::body("items").array(true),
            FieldRule::body("items.*.quantity").numeric(),
        ]);
        let mut bags = body(json!({"items": [{"quantity": 2}, {"quantity": "x"}]}));
        let errs = rules.validate(&mut bags).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].param, "items[1].quantity");

        let errs = rules.validate(&mut body(json!({"items": []}))).unwrap_err();
        assert_eq!(errs[0].param, "items");
    }

    #[test]
    fn then_concatenates_and_all_optional_relaxes() {
        let id = RuleSet::new(vec![FieldRule::param("id").uuid()]);
        let fields = RuleSet::new(vec![FieldRule::body("Email").email()]);
        let combined = id.then(fields.clone());
        assert_eq!(combined.rules().len(), 2);

        assert!(fields.clone().validate(&mut body(json!({}))).is_err());
        assert!(fields.all_optional().validate(&mut body(json!({}))).is_ok());
    }

    #[test]
    fn scalar_checks() {
        assert!(Check::Boolean.passes(&json!("true")));
        assert!(!Check::Boolean.passes(&json!("yes")));
        assert!(Check::Numeric.passes(&json!("12.50")));
        assert!(!Check::Numeric.passes(&json!("12a")));
        assert!(Check::Iso8601.passes(&json!("2024-05-01")));
        assert!(Check::Iso8601.passes(&json!("2024-05-01T10:00:00Z")));
        assert!(!Check::Iso8601.passes(&json!("01/05/2024")));
        assert!(Check::Email.passes(&json!("owner@acme.in")));
        assert!(!Check::Email.passes(&json!("owner@")));
        assert!(Check::Alphanumeric.passes(&json!("22AAAAA0000A1Z5")));
        assert!(!Check::Alphanumeric.passes(&json!("22AAAAA-000A1Z5")));
        assert!(Check::Int { min: Some(1), max: None }.passes(&json!(3)));
        assert!(!Check::Int { min: Some(1), max: None }.passes(&json!(0)));
    }

    #[test]
    fn field_error_serializes_lowercase_location() {
        let e = FieldError::body("Email", "Invalid value", json!("x"));
        let v = serde_json::to_value(e).unwrap();
        assert_eq!(v, json!({"param": "Email", "msg": "Invalid value", "value": "x", "location": "body"}));
    }
}
