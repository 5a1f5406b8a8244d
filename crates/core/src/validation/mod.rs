//! Request-body validation.
//!
//! A [`RuleSet`] describes how to turn an untyped JSON body into a typed
//! record. Rule sets are written against [`Validator`], which extracts
//! fields, applies per-field rules and accumulates errors in the order the
//! rules ran. Every rule on a field runs, so one field can report several
//! errors.

mod contact;
mod project;

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};
use url::{Host, Url};
use validator::{ValidateEmail, ValidateLength};

use crate::email::normalize_email;

pub use contact::NewContact;
pub use project::NewProject;

/// A single rejected field, surfaced verbatim to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A typed record that can be built from a validated request body.
pub trait RuleSet: Sized {
    /// Apply every rule for this record and assemble it.
    ///
    /// The returned value is only used when `v` recorded no errors, so
    /// failing fields may fall back to defaults.
    fn apply(v: &mut Validator<'_>) -> Self;
}

/// Validate `body` against the rule set `R`.
///
/// A body that is not a JSON object carries no fields, so every required
/// field reports its own error.
pub fn validate<R: RuleSet>(body: &Value) -> Result<R, Vec<FieldError>> {
    let empty = Map::new();
    let map = match body {
        Value::Object(map) => map,
        _ => &empty,
    };

    let mut validator = Validator::new(map);
    let record = R::apply(&mut validator);
    validator.finish(record)
}

/// Field extraction and error accumulation over one request body.
pub struct Validator<'a> {
    body: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Validator<'a> {
    pub fn new(body: &'a Map<String, Value>) -> Self {
        Self {
            body,
            errors: Vec::new(),
        }
    }

    /// Start a rule chain for `name`.
    pub fn field(&mut self, name: &'static str) -> Field<'_, 'a> {
        let value = extract(self.body.get(name));
        Field {
            validator: self,
            name,
            value,
            optional: false,
        }
    }

    pub fn reject(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn finish<T>(self, record: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(record)
        } else {
            Err(self.errors)
        }
    }
}

/// Scalars are coerced to text. Null, arrays and objects count as missing.
fn extract(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Rule chain for a single field.
pub struct Field<'v, 'a> {
    validator: &'v mut Validator<'a>,
    name: &'static str,
    value: Option<String>,
    optional: bool,
}

impl Field<'_, '_> {
    /// Strip surrounding whitespace before the remaining rules run.
    pub fn trim(mut self) -> Self {
        self.value = self.value.map(|s| s.trim().to_string());
        self
    }

    /// Skip the remaining rules when the field is absent or null.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn not_empty(self, message: &str) -> Self {
        self.check(|s| !s.is_empty(), message)
    }

    /// Length limit in characters, not bytes.
    pub fn max_chars(self, max: u64, message: &str) -> Self {
        self.check(|s| s.validate_length(None, Some(max), None), message)
    }

    pub fn email(self, message: &str) -> Self {
        self.check(|s| s.validate_email(), message)
    }

    /// `http`, `https` or `ftp` URL on a public-looking host. The scheme may
    /// be left off.
    pub fn url(self, message: &str) -> Self {
        self.check(is_web_url, message)
    }

    pub fn normalize_email(mut self) -> Self {
        self.value = self.value.map(|s| normalize_email(&s));
        self
    }

    fn check(self, rule: impl FnOnce(&str) -> bool, message: &str) -> Self {
        if self.value.is_none() && self.optional {
            return self;
        }
        if !rule(self.value.as_deref().unwrap_or("")) {
            self.validator.reject(self.name, message);
        }
        self
    }

    /// The final value of a required field.
    pub fn text(self) -> String {
        self.value.unwrap_or_default()
    }

    /// The final value of an optional field.
    pub fn opt_text(self) -> Option<String> {
        self.value
    }
}

const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

fn is_web_url(s: &str) -> bool {
    if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
        return false;
    }
    if s.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("mailto:")) {
        return false;
    }
    let candidate = if s.contains("://") {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(format!("http://{s}"))
    };
    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };
    if !URL_SCHEMES.iter().any(|scheme| *scheme == url.scheme()) {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => has_tld(domain),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        None => false,
    }
}

/// At least two labels, none empty, ending in an alphabetic or punycode TLD.
fn has_tld(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    if rest.is_empty() || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())) || tld.starts_with("xn--")
}
