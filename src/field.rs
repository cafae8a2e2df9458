use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;

pub type Message = Cow<'static, str>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    /// Carrier for errors not attributable to a single field.
    pub const FORM: FieldKey = FieldKey::new("_form");

    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Blob(Vec<u8>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Blob(bytes) => bytes.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldValue::Text(text) => text.chars().count(),
            FieldValue::Number(number) => number.to_string().chars().count(),
            FieldValue::Blob(bytes) => bytes.len(),
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Text(text) => Decimal::from_str(text.trim()).ok(),
            FieldValue::Number(number) => Some(*number),
            FieldValue::Blob(_) => None,
        }
    }

    pub(crate) fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(text) => Some(Cow::Borrowed(text)),
            FieldValue::Number(number) => Some(Cow::Owned(number.to_string())),
            FieldValue::Blob(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::Blob(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormData {
    values: BTreeMap<FieldKey, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: FieldKey, value: impl Into<FieldValue>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: FieldKey, value: impl Into<FieldValue>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.values.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }
}

impl FromIterator<(FieldKey, FieldValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (FieldKey, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
