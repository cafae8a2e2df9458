use std::sync::Arc;

use rust_decimal::Decimal;
use url::Url;

use super::field::{FieldValue, Message};

/// A single field-level check. `None` input means the field is absent
/// from the form. Rules are pure: no I/O, no panics on invalid input.
pub trait Rule: Send + Sync {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message>;
}

impl<F> Rule for F
where
    F: Fn(Option<&FieldValue>) -> Option<Message> + Send + Sync,
{
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        (self)(value)
    }
}

// Every rule except `required` passes on an empty value, so optional
// fields are only validated when the user actually filled them in.
fn is_blank(value: Option<&FieldValue>) -> bool {
    value.is_none_or(FieldValue::is_empty)
}

pub fn required() -> Required {
    Required { message: None }
}

pub fn email() -> Email {
    Email { message: None }
}

pub fn min_length(min: usize) -> MinLength {
    MinLength { min, message: None }
}

pub fn max_length(max: usize) -> MaxLength {
    MaxLength { max, message: None }
}

pub fn number() -> Numeric {
    Numeric { message: None }
}

pub fn min(bound: impl Into<Decimal>) -> Min {
    Min {
        bound: bound.into(),
        message: None,
    }
}

pub fn max(bound: impl Into<Decimal>) -> Max {
    Max {
        bound: bound.into(),
        message: None,
    }
}

pub fn url() -> WellFormedUrl {
    WellFormedUrl { message: None }
}

pub struct Required {
    message: Option<Message>,
}

impl Required {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Required {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        let blank = match value {
            None => true,
            Some(FieldValue::Text(text)) => text.trim().is_empty(),
            Some(FieldValue::Number(_)) => false,
            Some(FieldValue::Blob(bytes)) => bytes.is_empty(),
        };
        blank.then(|| {
            self.message
                .clone()
                .unwrap_or(Message::Borrowed("This field is required"))
        })
    }
}

pub struct Email {
    message: Option<Message>,
}

impl Email {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Email {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        if is_blank(value) {
            return None;
        }
        let shaped = value
            .and_then(FieldValue::as_text)
            .is_some_and(|text| looks_like_email(&text));
        (!shaped).then(|| {
            self.message
                .clone()
                .unwrap_or(Message::Borrowed("Invalid email address"))
        })
    }
}

// The simple `local@domain.tld` shape: no whitespace, non-empty local
// part, a dot inside the domain with characters on both sides.
fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

pub struct MinLength {
    min: usize,
    message: Option<Message>,
}

impl MinLength {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for MinLength {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        if is_blank(value) {
            return None;
        }
        let long_enough = value.is_some_and(|value| value.len() >= self.min);
        (!long_enough).then(|| {
            self.message.clone().unwrap_or_else(|| {
                format!("Minimum {} characters required", self.min).into()
            })
        })
    }
}

pub struct MaxLength {
    max: usize,
    message: Option<Message>,
}

impl MaxLength {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for MaxLength {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        if is_blank(value) {
            return None;
        }
        let short_enough = value.is_some_and(|value| value.len() <= self.max);
        (!short_enough).then(|| {
            self.message.clone().unwrap_or_else(|| {
                format!("Maximum {} characters allowed", self.max).into()
            })
        })
    }
}

pub struct Numeric {
    message: Option<Message>,
}

impl Numeric {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Numeric {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        if is_blank(value) {
            return None;
        }
        let numeric = value.and_then(FieldValue::as_decimal).is_some();
        (!numeric).then(|| {
            self.message
                .clone()
                .unwrap_or(Message::Borrowed("Must be a valid number"))
        })
    }
}

pub struct Min {
    bound: Decimal,
    message: Option<Message>,
}

impl Min {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Min {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        if is_blank(value) {
            return None;
        }
        // A non-coercing value fails the bound, it does not skip it.
        let in_bounds = value
            .and_then(FieldValue::as_decimal)
            .is_some_and(|number| number >= self.bound);
        (!in_bounds).then(|| {
            self.message
                .clone()
                .unwrap_or_else(|| format!("Minimum value is {}", self.bound).into())
        })
    }
}

pub struct Max {
    bound: Decimal,
    message: Option<Message>,
}

impl Max {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Max {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        if is_blank(value) {
            return None;
        }
        let in_bounds = value
            .and_then(FieldValue::as_decimal)
            .is_some_and(|number| number <= self.bound);
        (!in_bounds).then(|| {
            self.message
                .clone()
                .unwrap_or_else(|| format!("Maximum value is {}", self.bound).into())
        })
    }
}

pub struct WellFormedUrl {
    message: Option<Message>,
}

impl WellFormedUrl {
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for WellFormedUrl {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        if is_blank(value) {
            return None;
        }
        let absolute = value
            .and_then(FieldValue::as_text)
            .is_some_and(|text| Url::parse(&text).is_ok());
        (!absolute).then(|| {
            self.message
                .clone()
                .unwrap_or(Message::Borrowed("Invalid URL format"))
        })
    }
}

/// Ordered rules for one field. Evaluated in insertion order, stopping
/// at the first failure; the order decides which message surfaces when
/// several rules would fail. An empty set always passes.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Rule for RuleSet {
    fn check(&self, value: Option<&FieldValue>) -> Option<Message> {
        self.rules.iter().find_map(|rule| rule.check(value))
    }
}
