//! Domain classification used by the post-parse acceptance checks.
//!
//! [`DomainClassifier`] is the seam: tests and callers with their own public
//! suffix data plug in here. [`TableClassifier`] is the built-in version
//! backed by static tables.

mod tables;

use std::collections::BTreeSet;

/// What a classifier knows about a domain name.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainInfo {
    pub has_tld: bool,
    pub has_known_tld: bool,
    pub is_local: bool,
    pub is_reserved: bool,
    pub is_geographic: bool,
    pub is_localized: bool,
    pub is_dynamic: bool,
    /// Last two labels, or the whole name for single-label domains.
    pub second_level_domain: String,
    /// Empty for single-label domains.
    pub top_level_domain: String,
}

pub trait DomainClassifier {
    /// Returns `None` when `domain` cannot be classified at all.
    ///
    /// With `require_known_tld` off, `has_known_tld` mirrors `has_tld`.
    fn classify(&self, domain: &str, require_known_tld: bool) -> Option<DomainInfo>;
}

impl<F> DomainClassifier for F
where
    F: Fn(&str, bool) -> Option<DomainInfo>,
{
    fn classify(&self, domain: &str, require_known_tld: bool) -> Option<DomainInfo> {
        self(domain, require_known_tld)
    }
}

/// Static-table classifier. Extra TLDs and dynamic DNS providers can be
/// registered on top of the built-in lists.
#[derive(Debug, Clone, Default)]
pub struct TableClassifier {
    extra_tlds: BTreeSet<String>,
    extra_dynamic: BTreeSet<String>,
}

impl TableClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_tld(mut self, tld: &str) -> Self {
        self.extra_tlds.insert(tld.trim_start_matches('.').to_ascii_lowercase());
        self
    }

    pub fn with_dynamic_provider(mut self, domain: &str) -> Self {
        self.extra_dynamic.insert(domain.to_ascii_lowercase());
        self
    }

    fn is_known_tld(&self, tld: &str) -> bool {
        tables::KNOWN_TLDS.contains(tld)
            || tables::GEOGRAPHIC_TLDS.contains(tld)
            || tables::LOCALIZED_TLDS.contains(tld)
            || self.extra_tlds.contains(tld)
    }

    fn is_dynamic(&self, ascii: &str) -> bool {
        std::iter::successors(Some(ascii), |name| name.split_once('.').map(|(_, rest)| rest))
            .any(|suffix| {
                tables::DYNAMIC_DNS.contains(suffix) || self.extra_dynamic.contains(suffix)
            })
    }
}

impl DomainClassifier for TableClassifier {
    fn classify(&self, domain: &str, require_known_tld: bool) -> Option<DomainInfo> {
        let trimmed = domain.trim().trim_end_matches('.');
        if trimmed.is_empty() {
            return None;
        }
        let ascii = idna::domain_to_ascii(trimmed).ok()?.to_ascii_lowercase();
        let labels: Vec<&str> = ascii.split('.').collect();
        if labels.iter().any(|label| label.is_empty()) {
            return None;
        }

        let has_tld = labels.len() > 1;
        let (second_level_domain, top_level_domain) = match labels.as_slice() {
            [.., sld, tld] => (format!("{sld}.{tld}"), (*tld).to_string()),
            _ => (ascii.clone(), String::new()),
        };
        let tld = top_level_domain.as_str();

        let has_known_tld = if require_known_tld {
            has_tld && self.is_known_tld(tld)
        } else {
            has_tld
        };

        Some(DomainInfo {
            has_tld,
            has_known_tld,
            is_local: tables::LOCAL_NAMES.contains(tld)
                || (!has_tld && tables::LOCAL_NAMES.contains(ascii.as_str())),
            is_reserved: tables::RESERVED_TLDS.contains(tld),
            is_geographic: tables::GEOGRAPHIC_TLDS.contains(tld),
            is_localized: tld.starts_with("xn--"),
            is_dynamic: self.is_dynamic(&ascii),
            second_level_domain,
            top_level_domain,
        })
    }
}
