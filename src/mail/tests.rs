use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::MailAddressValidator;
use crate::domain::{DomainClassifier, DomainInfo, TableClassifier};
use crate::grammar::{LocalPartForm, Standard};
use crate::input::InputSource;
use crate::mx::MxError;
use crate::options::ConfigError;
use crate::validator::RejectionKind;

fn validate(v: &mut MailAddressValidator, value: &str) -> bool {
    v.set_custom_data([("mail", value)]);
    v.validate(InputSource::Custom, "mail", None).unwrap()
}

fn rejection(v: &mut MailAddressValidator, value: &str) -> Option<RejectionKind> {
    validate(v, value);
    v.outcome().and_then(|outcome| outcome.kind())
}

/// Classifier that counts calls and delegates to the built-in tables.
#[derive(Default)]
struct CountingClassifier {
    calls: AtomicUsize,
}

impl DomainClassifier for CountingClassifier {
    fn classify(&self, domain: &str, require_known_tld: bool) -> Option<DomainInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TableClassifier::new().classify(domain, require_known_tld)
    }
}

#[test]
fn plain_address_with_defaults() {
    let mut v = MailAddressValidator::default();
    assert!(validate(&mut v, "A.b@Example.COM"));
    let outcome = v.outcome().unwrap();
    assert!(outcome.is_request);
    assert_eq!(outcome.sanitized_value.as_deref(), Some("A.b@example.com"));
    assert_eq!(v.value(), Some("A.b@Example.COM"));
}

#[test]
fn empty_value_is_rejected_as_a_request() {
    let mut v = MailAddressValidator::default();
    assert_eq!(rejection(&mut v, ""), Some(RejectionKind::EmptyValueRejected));
    assert!(v.is_request());
    insta::assert_snapshot!(v.message(), @"the Mail address field can not use an empty value");
}

#[test]
fn malformed_addresses_are_invalid_format() {
    let mut v = MailAddressValidator::default();
    for input in ["plainaddress", "a@[IPv6:::1]", "user@256.1.1.1", " a@example.com"] {
        assert_eq!(rejection(&mut v, input), Some(RejectionKind::InvalidFormat), "{input}");
        assert!(v.is_request());
    }
    insta::assert_snapshot!(v.message(), @"not a valid Mail address value");
}

#[test]
fn domain_literals_skip_classification() {
    let classifier = Arc::new(CountingClassifier::default());
    let mut v = MailAddressValidator::default();
    v.set_classifier(classifier.clone())
        .set_allow_domain_literal(true)
        .set_check_for_mx(true);
    assert!(validate(&mut v, "a@[IPv6:::1]"));
    assert!(validate(&mut v, "a@[127.0.0.1]"));
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        v.outcome().unwrap().sanitized_value.as_deref(),
        Some("a@[127.0.0.1]")
    );

    v.set_domain_blacklist(["[127.0.0.1]"]);
    assert_eq!(
        rejection(&mut v, "a@[127.0.0.1]"),
        Some(RejectionKind::BlacklistedDomain)
    );
}

#[test]
fn unclassifiable_domain() {
    let mut v = MailAddressValidator::default();
    v.set_classifier(Arc::new(|_: &str, _: bool| None::<DomainInfo>));
    assert_eq!(
        rejection(&mut v, "a@example.com"),
        Some(RejectionKind::DomainResolutionFailed)
    );
}

#[test]
fn local_and_reserved_names() {
    let mut v = MailAddressValidator::default();
    assert_eq!(
        rejection(&mut v, "a@printer.local"),
        Some(RejectionKind::LocalDomainRejected)
    );
    v.set_allow_local(true);
    assert_eq!(rejection(&mut v, "a@printer.local"), Some(RejectionKind::UnknownTld));
    v.set_require_known_tld(false);
    assert!(validate(&mut v, "a@printer.local"));

    assert_eq!(
        rejection(&mut v, "a@foo.test"),
        Some(RejectionKind::ReservedDomainRejected)
    );
    v.set_allow_reserved(true);
    assert!(validate(&mut v, "a@foo.test"));
}

#[test]
fn geographic_and_localized_tlds() {
    let mut v = MailAddressValidator::default();
    assert!(validate(&mut v, "a@shop.berlin"));
    v.set_allow_geographic(false);
    assert_eq!(
        rejection(&mut v, "a@shop.berlin"),
        Some(RejectionKind::GeographicTldRejected)
    );
    insta::assert_snapshot!(v.message(), @"mail address pointing to the geographic TLD 'berlin'");

    let mut v = MailAddressValidator::default();
    v.set_require_basic_domain_name(false);
    assert_eq!(
        rejection(&mut v, "a@xn--e1afmkfd.xn--p1ai"),
        Some(RejectionKind::LocalizedTldRejected)
    );
    v.set_allow_localized(true);
    assert!(validate(&mut v, "a@xn--e1afmkfd.xn--p1ai"));
}

#[test]
fn tld_presence_and_knowledge() {
    let mut v = MailAddressValidator::default();
    v.set_require_basic_domain_name(false);
    assert_eq!(rejection(&mut v, "a@mailhost"), Some(RejectionKind::MissingTld));
    v.set_require_tld(false).set_require_known_tld(false);
    assert!(validate(&mut v, "a@mailhost"));

    let mut v = MailAddressValidator::default();
    assert_eq!(rejection(&mut v, "a@example.zzz"), Some(RejectionKind::UnknownTld));
    v.set_require_known_tld(false);
    assert!(validate(&mut v, "a@example.zzz"));
}

#[test]
fn dynamic_dns_comes_before_the_blacklists() {
    let mut v = MailAddressValidator::default();
    v.set_tld_blacklist(["org"]);
    assert_eq!(
        rejection(&mut v, "a@me.dyndns.org"),
        Some(RejectionKind::DynamicDnsRejected)
    );
    v.set_allow_dynamic(true);
    assert_eq!(
        rejection(&mut v, "a@me.dyndns.org"),
        Some(RejectionKind::BlacklistedTld)
    );
}

#[test]
fn blacklists() {
    let mut v = MailAddressValidator::default();
    v.set_tld_blacklist([".RU"]);
    assert_eq!(rejection(&mut v, "a@mail.ru"), Some(RejectionKind::BlacklistedTld));
    assert!(validate(&mut v, "a@mail.de"));

    v.set_domain_blacklist(["Spam.com", "mx.other.com"]);
    assert_eq!(
        rejection(&mut v, "a@mx.spam.com"),
        Some(RejectionKind::BlacklistedDomain)
    );
    assert_eq!(
        rejection(&mut v, "a@MX.other.com"),
        Some(RejectionKind::BlacklistedDomain)
    );
    assert!(validate(&mut v, "a@www.other.com"));
}

#[test]
fn mx_check() {
    let mut v = MailAddressValidator::default();
    v.set_check_for_mx(true);
    assert_eq!(rejection(&mut v, "a@example.com"), Some(RejectionKind::NoMxRecord));

    v.set_mx_lookup(Arc::new(|domain: &str| -> Result<bool, MxError> {
        match domain {
            "example.com" => Ok(true),
            "slow.com" => Err(MxError::Timeout {
                domain: domain.to_string(),
            }),
            _ => Ok(false),
        }
    }));
    assert!(validate(&mut v, "a@example.com"));
    assert_eq!(rejection(&mut v, "a@nomx.com"), Some(RejectionKind::NoMxRecord));
    assert_eq!(rejection(&mut v, "a@slow.com"), Some(RejectionKind::NoMxRecord));
    insta::assert_snapshot!(
        v.message(),
        @"mail address with invalid domain part (slow.com): no MX host"
    );
}

#[test]
fn presets() {
    let v = MailAddressValidator::with_standard("rfc5322").unwrap();
    assert_eq!(v.grammar().local_part, LocalPartForm::Obsolete);
    assert!(v.grammar().allow_cfws);

    assert!(matches!(
        MailAddressValidator::with_standard("rfc822"),
        Err(ConfigError::UnknownStandard { .. })
    ));

    let mut v = MailAddressValidator::default();
    assert!(!validate(&mut v, "a (comment)@example.com"));
    assert_eq!(v.last_result(), Some(false));
    v.set_standard(Standard::Rfc5322);
    assert_eq!(v.last_result(), None);
    assert!(validate(&mut v, "a (comment)@example.com"));
    assert_eq!(
        v.outcome().unwrap().sanitized_value.as_deref(),
        Some("a@example.com")
    );

    assert!(validate(&mut v, "a (x) . b@example.com"));
    assert_eq!(
        v.outcome().unwrap().sanitized_value.as_deref(),
        Some("a.b@example.com")
    );
    assert_eq!(v.value(), Some("a (x) . b@example.com"));
}

#[test]
fn per_call_display_name() {
    let mut v = MailAddressValidator::default();
    v.set_custom_data([("mail", "nope")]);
    v.validate(InputSource::Custom, "mail", Some("E-Mail")).unwrap();
    assert_eq!(v.message(), "not a valid E-Mail value");
    v.validate(InputSource::Custom, "mail", None).unwrap();
    assert_eq!(v.message(), "not a valid Mail address value");
}
