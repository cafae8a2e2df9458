use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::field::{FieldKey, Message};

/// At most one message per field; the first failing rule wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorReport {
    errors: BTreeMap<FieldKey, Message>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(message: impl Into<Message>) -> Self {
        let mut report = Self::new();
        report.insert(FieldKey::FORM, message);
        report
    }

    pub fn insert(&mut self, key: FieldKey, message: impl Into<Message>) {
        self.errors.entry(key).or_insert_with(|| message.into());
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key).map(Message::as_ref)
    }

    pub fn form_error(&self) -> Option<&str> {
        self.get(FieldKey::FORM)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.errors.iter().map(|(key, message)| (*key, message.as_ref()))
    }
}

/// Receives the full report each time; replace, never merge.
pub trait ErrorSink: Send + Sync {
    fn set_errors(&self, errors: ErrorReport);
}

impl<F> ErrorSink for F
where
    F: Fn(ErrorReport) + Send + Sync,
{
    fn set_errors(&self, errors: ErrorReport) {
        (self)(errors)
    }
}

/// Caller-owned backing store for the sink; the pipeline itself keeps
/// no error state across attempts.
#[derive(Clone, Default)]
pub struct SharedErrors {
    state: Arc<RwLock<ErrorReport>>,
}

impl SharedErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ErrorReport {
        let state = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.clone()
    }

    pub fn get(&self, key: FieldKey) -> Option<Message> {
        let state = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.errors.get(&key).cloned()
    }

    pub fn form_error(&self) -> Option<Message> {
        self.get(FieldKey::FORM)
    }

    pub fn is_empty(&self) -> bool {
        let state = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.is_empty()
    }
}

impl ErrorSink for SharedErrors {
    fn set_errors(&self, errors: ErrorReport) {
        let mut state = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *state = errors;
    }
}
