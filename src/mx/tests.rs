use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

use super::resolver::{MxSource, answer_from, ascii_domain, host_name};
use super::{MxAnswer, MxError, MxHost};

/// Serves whatever `answer` returns for the queried name.
struct StubSource<F> {
    answer: F,
}

impl<F> MxSource for StubSource<F>
where
    F: Fn(&str) -> Result<Vec<MxHost>, ResolveError>,
{
    fn query_mx(&self, ascii_domain: &str) -> Result<Vec<MxHost>, ResolveError> {
        (self.answer)(ascii_domain)
    }
}

fn stub<F>(answer: F) -> StubSource<F>
where
    F: Fn(&str) -> Result<Vec<MxHost>, ResolveError>,
{
    StubSource { answer }
}

#[test]
fn blank_domains_are_rejected_before_querying() {
    assert!(matches!(ascii_domain(" . "), Err(MxError::EmptyDomain)));
}

#[test]
fn unicode_domains_are_queried_in_ascii() {
    assert_eq!(ascii_domain("Bücher.Example.").unwrap(), "xn--bcher-kva.example");
}

#[test]
fn hosts_are_sorted_and_deduplicated() {
    let source = stub(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![
            MxHost::new(20, "mx2.example.com"),
            MxHost::new(10, "mx1.example.com"),
            MxHost::new(10, "mx1.example.com"),
            MxHost::new(30, "mx3.example.com"),
        ])
    });

    let answer = answer_from(&source, "example.com").unwrap();
    let priorities: Vec<u16> = answer.hosts().iter().map(|h| h.priority).collect();
    assert_eq!(priorities, [10, 20, 30]);
    assert_eq!(answer.primary().map(|h| h.host.as_str()), Some("mx1.example.com"));
    assert!(answer.accepts_mail());
}

#[test]
fn missing_records_are_an_empty_answer() {
    let answer = answer_from(&stub(|_| Ok(Vec::new())), "example.com").unwrap();
    assert!(answer.is_empty());
    assert!(!answer.accepts_mail());
    assert_eq!(answer, MxAnswer::default());
}

#[test]
fn null_mx_takes_no_mail() {
    let source = stub(|_| Ok(vec![MxHost::new(0, host_name("."))]));
    let answer = answer_from(&source, "example.com").unwrap();
    assert_eq!(answer.hosts().len(), 1);
    assert!(answer.hosts()[0].is_null());
    assert_eq!(answer.primary(), None);
    assert!(!answer.accepts_mail());
}

#[test]
fn timeouts_name_the_domain() {
    let source = stub(|_| Err(ResolveError::from(ResolveErrorKind::Timeout)));
    let err = answer_from(&source, "slow.example").unwrap_err();
    assert!(matches!(err, MxError::Timeout { ref domain } if domain == "slow.example"));
}

#[test]
fn other_failures_keep_their_source() {
    let source = stub(|_| Err(ResolveError::from("refused")));
    let err = answer_from(&source, "example.com").unwrap_err();
    assert!(matches!(err, MxError::Query { ref domain, .. } if domain == "example.com"));
    insta::assert_snapshot!(err.to_string(), @"MX query for example.com failed");
}

#[test]
fn exchange_names_are_canonical() {
    assert_eq!(host_name("Mail.EXAMPLE.com."), "mail.example.com");
    assert_eq!(host_name("."), "");
}
