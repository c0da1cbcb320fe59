//! Field validation lifecycle.
//!
//! `validate` walks `Resolve → EmptyCheck → RequiredValueCheck → Delegate`:
//! undefined fields, empty values and required-value mismatches are settled
//! here, before the concrete [`FieldCheck`] ever sees the value.

pub mod field;
mod types;

pub use field::FieldOptions;
pub use types::{Rejection, RejectionKind, ValidationError, ValidationOutcome};

use std::collections::HashMap;
use std::sync::Arc;

use crate::input::{InputResolver, InputSource, RequestInputs};
#[cfg(feature = "with-serde")]
use crate::options::ConfigError;
use crate::options::{OptionStore, OptionValue};

/// The validator-specific part of a validation.
pub trait FieldCheck {
    /// Display name used when none is configured.
    fn display_name(&self) -> &str;

    /// Declares the check's own options with their defaults.
    fn declare_options(&self, store: &mut OptionStore);

    /// Checks a present, non-empty value and returns its sanitized form.
    fn check(
        &self,
        value: &str,
        options: &OptionStore,
        display_name: &str,
    ) -> Result<String, Rejection>;
}

pub struct Validator<C> {
    check: C,
    options: OptionStore,
    inputs: Arc<dyn InputResolver + Send + Sync>,
    custom_data: Option<HashMap<String, String>>,
    value: Option<String>,
    outcome: Option<ValidationOutcome>,
    last_result: Option<bool>,
}

impl<C: FieldCheck + Default> Default for Validator<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: FieldCheck> Validator<C> {
    pub fn new(check: C) -> Self {
        let mut options = OptionStore::new();
        field::declare(&mut options, check.display_name());
        check.declare_options(&mut options);
        Self {
            check,
            options,
            inputs: Arc::new(RequestInputs::from_process_env()),
            custom_data: None,
            value: None,
            outcome: None,
            last_result: None,
        }
    }

    pub fn with_inputs(mut self, inputs: Arc<dyn InputResolver + Send + Sync>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn set_inputs(&mut self, inputs: Arc<dyn InputResolver + Send + Sync>) -> &mut Self {
        self.inputs = inputs;
        self
    }

    /// Data served for [`InputSource::Custom`].
    pub fn set_custom_data<I, K, V>(&mut self, data: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_data = Some(
            data.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.update_options(|store| {
            store.set(name, value);
        })
    }

    /// Applies a JSON object of option names to values, see
    /// [`OptionStore::apply_json`].
    #[cfg(feature = "with-serde")]
    pub fn apply_json_options(&mut self, json: &str) -> Result<usize, ConfigError> {
        let mut applied = Ok(0);
        self.update_options(|store| applied = store.apply_json(json));
        applied
    }

    /// Reads an option; an option never defined is defined with `fallback`.
    pub fn option(&mut self, name: &str, fallback: impl Into<OptionValue>) -> &OptionValue {
        self.options.get(name, fallback)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn options(&self) -> &OptionStore {
        &self.options
    }

    pub fn set_allow_empty(&mut self, value: bool) -> &mut Self {
        self.set_option(field::ALLOW_EMPTY, value)
    }

    pub fn set_required(&mut self, value: bool) -> &mut Self {
        self.set_option(field::REQUIRED, value)
    }

    pub fn set_default_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_option(field::DEFAULT_VALUE, value.into())
    }

    pub fn set_required_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_option(field::REQUIRED_VALUE, value.into())
    }

    /// Blank names are ignored.
    pub fn set_display_name(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if value.trim().is_empty() {
            return self;
        }
        self.set_option(field::DISPLAY_NAME, value)
    }

    pub fn check(&self) -> &C {
        &self.check
    }

    pub fn check_mut(&mut self) -> &mut C {
        self.last_result = None;
        &mut self.check
    }

    /// Every option mutation goes through here and drops the cached result.
    pub(crate) fn update_options<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut OptionStore),
    {
        f(&mut self.options);
        self.last_result = None;
        self
    }

    /// Runs the lifecycle for `key` from `source`.
    ///
    /// Only caller mistakes are errors; every data problem ends up in the
    /// returned flag and in [`Self::outcome`].
    pub fn validate(
        &mut self,
        source: InputSource,
        key: &str,
        display_name: Option<&str>,
    ) -> Result<bool, ValidationError> {
        let field = FieldOptions::from_store(&self.options);
        let display_name = field.effective_display_name(display_name, key);

        self.value = None;
        self.outcome = None;
        self.last_result = None;

        let raw = match self.resolve(source, key) {
            Ok(raw) => raw,
            Err(_) if !field.required && field.default_value.is_some() => {
                field.default_value.clone()
            }
            Err(_) => return Err(ValidationError::unknown_source(source)),
        };

        let (value, outcome) = self.run(raw, &field, source, key, &display_name);
        debug_event!(
            key,
            source = source.name(),
            valid = outcome.valid,
            is_request = outcome.is_request,
            kind = ?outcome.kind(),
            "field validated"
        );

        let valid = outcome.valid;
        self.value = value;
        self.outcome = Some(outcome);
        self.last_result = Some(valid);
        Ok(valid)
    }

    fn resolve(&self, source: InputSource, key: &str) -> Result<Option<String>, ValidationError> {
        if source == InputSource::Custom {
            return Ok(self
                .custom_data
                .as_ref()
                .and_then(|data| data.get(key))
                .cloned());
        }
        self.inputs
            .resolve(source, key)
            .map_err(|_| ValidationError::unknown_source(source))
    }

    fn run(
        &self,
        raw: Option<String>,
        field: &FieldOptions,
        source: InputSource,
        key: &str,
        display_name: &str,
    ) -> (Option<String>, ValidationOutcome) {
        let value = match raw {
            Some(value) => value,
            None if field.required => {
                let rejection = Rejection::UndefinedRequiredField {
                    display_name: display_name.to_string(),
                    key: key.to_string(),
                    input: source,
                };
                return (None, ValidationOutcome::rejected(rejection, false));
            }
            None => field.default_value.clone().unwrap_or_default(),
        };

        let mismatch = || Rejection::RequiredValueMismatch {
            display_name: display_name.to_string(),
            key: key.to_string(),
            input: source,
        };
        let required_value_differs = field
            .required_value
            .as_ref()
            .is_some_and(|required| *required != value);

        let trimmed = value.trim();
        if trimmed.is_empty() {
            if required_value_differs {
                return (Some(value), ValidationOutcome::rejected(mismatch(), false));
            }
            if !field.allow_empty {
                let rejection = Rejection::EmptyValueRejected {
                    display_name: display_name.to_string(),
                };
                return (Some(value), ValidationOutcome::rejected(rejection, true));
            }
            return (Some(value), ValidationOutcome::accepted(String::new()));
        }

        if required_value_differs {
            return (Some(value), ValidationOutcome::rejected(mismatch(), false));
        }

        let outcome = match self.check.check(&value, &self.options, display_name) {
            Ok(sanitized) => ValidationOutcome::accepted(sanitized),
            Err(rejection) => ValidationOutcome::rejected(rejection, true),
        };
        (Some(value), outcome)
    }

    pub fn is_request(&self) -> bool {
        self.outcome.as_ref().is_some_and(|o| o.is_request)
    }

    pub fn message(&self) -> &str {
        self.outcome.as_ref().map_or("", |o| o.message.as_str())
    }

    /// The raw value of the last validation (after default substitution).
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.outcome.as_ref()
    }

    /// `None` before the first validation and after any option change.
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }
}

#[cfg(test)]
mod tests;
