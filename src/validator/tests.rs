use std::cell::Cell;
use std::sync::Arc;

use super::{FieldCheck, Rejection, RejectionKind, ValidationError, Validator};
use crate::input::{InputResolver, InputSource, RequestInputs, UnsupportedSource};
use crate::options::{OptionKind, OptionStore};

/// Accepts values containing `needle`, counts how often it runs.
#[derive(Default)]
struct StubCheck {
    calls: Cell<usize>,
}

impl FieldCheck for StubCheck {
    fn display_name(&self) -> &str {
        "Stub"
    }

    fn declare_options(&self, store: &mut OptionStore) {
        store.declare("Needle", OptionKind::Str, "ok", false);
    }

    fn check(
        &self,
        value: &str,
        options: &OptionStore,
        display_name: &str,
    ) -> Result<String, Rejection> {
        self.calls.set(self.calls.get() + 1);
        let needle = options.text("Needle").unwrap_or_default();
        if value.contains(&needle) {
            Ok(value.trim().to_string())
        } else {
            Err(Rejection::InvalidFormat {
                display_name: display_name.to_string(),
            })
        }
    }
}

fn post(pairs: &[(&str, &str)]) -> Arc<RequestInputs> {
    Arc::new(RequestInputs::new().with(
        InputSource::Post,
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())),
    ))
}

/// Serves POST only and declines everything else.
struct PostOnly(Arc<RequestInputs>);

impl InputResolver for PostOnly {
    fn resolve(&self, source: InputSource, key: &str) -> Result<Option<String>, UnsupportedSource> {
        match source {
            InputSource::Post => self.0.resolve(source, key),
            other => Err(UnsupportedSource(other)),
        }
    }
}

fn validator(pairs: &[(&str, &str)]) -> Validator<StubCheck> {
    Validator::new(StubCheck::default()).with_inputs(post(pairs))
}

#[test]
fn undefined_required_field_is_not_a_request() {
    let mut v = validator(&[]);
    let ok = v.validate(InputSource::Post, "mail", None).unwrap();
    assert!(!ok);
    assert!(!v.is_request());
    let outcome = v.outcome().unwrap();
    assert_eq!(outcome.kind(), Some(RejectionKind::UndefinedRequiredField));
    assert_eq!(v.value(), None);
    assert_eq!(v.check().calls.get(), 0);
}

#[test]
fn undefined_optional_field_uses_default_value() {
    let mut v = validator(&[]);
    v.set_required(false).set_default_value("ok-default");
    assert!(v.validate(InputSource::Post, "mail", None).unwrap());
    assert_eq!(v.value(), Some("ok-default"));
    assert_eq!(v.check().calls.get(), 1);
}

#[test]
fn undefined_optional_field_without_default_is_empty() {
    let mut v = validator(&[]);
    v.set_required(false);
    assert!(!v.validate(InputSource::Post, "mail", None).unwrap());
    assert!(v.is_request());
    assert_eq!(
        v.outcome().unwrap().kind(),
        Some(RejectionKind::EmptyValueRejected)
    );
    v.set_allow_empty(true);
    assert!(v.validate(InputSource::Post, "mail", None).unwrap());
    assert_eq!(v.value(), Some(""));
}

#[test]
fn empty_value_short_circuits_before_the_check() {
    let mut v = validator(&[("mail", "   ")]);
    v.set_allow_empty(true);
    assert!(v.validate(InputSource::Post, "mail", None).unwrap());
    assert_eq!(v.check().calls.get(), 0);
}

#[test]
fn empty_value_with_mismatching_required_value() {
    let mut v = validator(&[("mail", "")]);
    v.set_required_value("ok");
    assert!(!v.validate(InputSource::Post, "mail", None).unwrap());
    assert!(!v.is_request());
    assert_eq!(
        v.outcome().unwrap().kind(),
        Some(RejectionKind::RequiredValueMismatch)
    );
}

#[test]
fn required_value_mismatch_suppresses_the_check() {
    let mut v = validator(&[("mail", "ok but different")]);
    v.set_required_value("ok");
    assert!(!v.validate(InputSource::Post, "mail", None).unwrap());
    assert!(!v.is_request());
    assert_eq!(v.check().calls.get(), 0);

    let mut v = validator(&[("mail", "ok")]);
    v.set_required_value("ok");
    assert!(v.validate(InputSource::Post, "mail", None).unwrap());
    assert!(v.is_request());
}

#[test]
fn delegate_decides_non_trivial_values() {
    let mut v = validator(&[("good", "is ok"), ("bad", "nope")]);
    assert!(v.validate(InputSource::Post, "good", None).unwrap());
    assert_eq!(v.outcome().unwrap().sanitized_value.as_deref(), Some("is ok"));
    assert!(!v.validate(InputSource::Post, "bad", Some("Nick")).unwrap());
    assert!(v.is_request());
    assert_eq!(v.message(), "not a valid Nick value");
}

#[test]
fn declined_source_is_fatal_unless_optional_with_default() {
    let mut v = Validator::new(StubCheck::default())
        .with_inputs(Arc::new(PostOnly(post(&[("mail", "ok")]))));
    let err = v.validate(InputSource::Session, "mail", None).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownInputSource { ref name } if name == "SESSION"));

    v.set_required(false).set_default_value("ok");
    assert!(v.validate(InputSource::Session, "mail", None).unwrap());

    // the validator stays usable afterwards
    assert!(v.validate(InputSource::Post, "mail", None).unwrap());
}

#[test]
fn fresh_validator_serves_every_request_source() {
    let mut v = Validator::new(StubCheck::default());
    for source in InputSource::ALL {
        if source == InputSource::Custom {
            continue;
        }
        assert!(!v.validate(source, "mail", None).unwrap(), "{source}");
        assert!(!v.is_request());
        assert_eq!(
            v.outcome().unwrap().kind(),
            Some(RejectionKind::UndefinedRequiredField)
        );
    }
}

#[test]
fn fresh_validator_reads_the_process_environment() {
    let present = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .find(|(_, value)| !value.trim().is_empty());
    let Some((key, value)) = present else {
        return;
    };
    let mut v = Validator::new(StubCheck::default());
    v.set_option("Needle", "");
    assert!(v.validate(InputSource::Env, &key, None).unwrap());
    assert_eq!(v.value(), Some(value.as_str()));
}

#[test]
fn custom_data_must_be_supplied() {
    let mut v = validator(&[]);
    assert!(!v.validate(InputSource::Custom, "mail", None).unwrap());
    assert!(!v.is_request());
    v.set_custom_data([("mail", "ok")]);
    assert!(v.validate(InputSource::Custom, "mail", None).unwrap());
}

#[test]
fn option_changes_invalidate_the_cached_result() {
    let mut v = validator(&[("mail", "needle")]);
    assert!(!v.validate(InputSource::Post, "mail", None).unwrap());
    assert_eq!(v.last_result(), Some(false));

    v.set_option("Needle", "need");
    assert_eq!(v.last_result(), None);
    assert!(v.validate(InputSource::Post, "mail", None).unwrap());
    assert_eq!(v.last_result(), Some(true));
    assert_eq!(v.check().calls.get(), 2);
}

#[test]
fn display_name_falls_back_to_key() {
    let mut v = validator(&[]);
    v.set_option("DisplayName", "");
    v.validate(InputSource::Post, "mail", None).unwrap();
    assert!(v.message().contains("required mail value \"mail\" from POST source"));

    v.set_display_name("   ");
    v.set_display_name("E-Mail");
    v.validate(InputSource::Post, "mail", None).unwrap();
    insta::assert_snapshot!(
        v.message(),
        @r#"NO REQUEST: the required E-Mail value "mail" from POST source is undefined"#
    );
}

#[test]
fn option_reads_materialize_defaults() {
    let mut v = validator(&[]);
    let before = v.option_count();
    assert!(!v.has_option("Extra"));
    v.option("Extra", 5);
    assert!(v.has_option("Extra"));
    assert_eq!(v.option_count(), before + 1);
}
