use std::collections::BTreeMap;

use super::field::{FieldKey, FormData};
use super::report::ErrorReport;
use super::rules::{Rule, RuleSet};

/// Whole-form validation seam; an empty report signals validity.
pub trait Validate: Send + Sync {
    fn validate(&self, form: &FormData) -> ErrorReport;
}

impl<F> Validate for F
where
    F: Fn(&FormData) -> ErrorReport + Send + Sync,
{
    fn validate(&self, form: &FormData) -> ErrorReport {
        (self)(form)
    }
}

/// Per-field rule sets applied against a form snapshot. Fields absent
/// from the form still run their rules, so `required` can reject them.
#[derive(Clone, Default)]
pub struct FormSchema {
    fields: BTreeMap<FieldKey, RuleSet>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: FieldKey, rules: RuleSet) -> Self {
        self.fields.insert(key, rules);
        self
    }
}

impl Validate for FormSchema {
    fn validate(&self, form: &FormData) -> ErrorReport {
        let mut report = ErrorReport::new();
        for (key, rules) in &self.fields {
            if let Some(message) = rules.check(form.get(*key)) {
                report.insert(*key, message);
            }
        }
        report
    }
}
