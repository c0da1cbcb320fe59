//! The mail address field check.
//!
//! A value first has to match the grammar selected by the options, then the
//! domain goes through the acceptance policy: classification, local and
//! reserved names, geographic and localized TLDs, TLD presence and
//! knowledge, dynamic DNS, the two blacklists and finally the MX check.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{DomainClassifier, TableClassifier};
use crate::grammar::config as opt;
use crate::grammar::{
    AcceptancePolicy, DomainPart, GrammarConfig, ParseResult, Standard, parse_address,
};
use crate::mx::MxLookup;
use crate::options::{ConfigError, OptionStore, OptionValue};
use crate::validator::{FieldCheck, Rejection, Validator};

pub type MailAddressValidator = Validator<MailAddressCheck>;

#[derive(Clone)]
pub struct MailAddressCheck {
    classifier: Arc<dyn DomainClassifier + Send + Sync>,
    mx: Option<Arc<dyn MxLookup + Send + Sync>>,
}

impl Default for MailAddressCheck {
    fn default() -> Self {
        Self {
            classifier: Arc::new(TableClassifier::new()),
            mx: None,
        }
    }
}

impl MailAddressCheck {
    pub fn new(classifier: Arc<dyn DomainClassifier + Send + Sync>) -> Self {
        Self {
            classifier,
            mx: None,
        }
    }

    pub fn with_mx_lookup(mut self, mx: Arc<dyn MxLookup + Send + Sync>) -> Self {
        self.mx = Some(mx);
        self
    }

    fn accept(&self, parsed: &ParseResult, policy: &AcceptancePolicy) -> Result<(), Rejection> {
        let name = match &parsed.domain {
            DomainPart::Name(name) => name,
            DomainPart::Literal(addr) => {
                let text = parsed.domain_part.to_ascii_lowercase();
                if policy.domain_blacklist.contains(&text)
                    || policy.domain_blacklist.contains(&addr.to_string())
                {
                    return Err(Rejection::BlacklistedDomain {
                        domain: parsed.domain_part.clone(),
                    });
                }
                return Ok(());
            }
        };
        let domain = || name.clone();

        let info = self
            .classifier
            .classify(name, policy.require_known_tld)
            .ok_or_else(|| Rejection::DomainResolutionFailed { domain: domain() })?;
        let tld = || info.top_level_domain.clone();

        if !policy.allow_local && info.is_local {
            return Err(Rejection::LocalDomainRejected { domain: domain() });
        }
        if !policy.allow_reserved && info.is_reserved {
            return Err(Rejection::ReservedDomainRejected { domain: domain() });
        }
        if !policy.allow_geographic && info.is_geographic {
            return Err(Rejection::GeographicTldRejected { tld: tld() });
        }
        if !policy.allow_localized && info.is_localized {
            return Err(Rejection::LocalizedTldRejected { domain: domain() });
        }
        if policy.require_tld && !info.has_tld {
            return Err(Rejection::MissingTld { domain: domain() });
        }
        if policy.require_known_tld && !info.has_known_tld {
            return Err(Rejection::UnknownTld { tld: tld() });
        }
        if !policy.allow_dynamic && info.is_dynamic {
            return Err(Rejection::DynamicDnsRejected { domain: domain() });
        }
        if info.has_tld && policy.tld_blacklist.contains(&info.top_level_domain) {
            return Err(Rejection::BlacklistedTld { tld: tld() });
        }
        if policy.domain_blacklist.contains(&info.second_level_domain)
            || policy.domain_blacklist.contains(name)
        {
            return Err(Rejection::BlacklistedDomain { domain: domain() });
        }
        if policy.check_for_mx && !self.has_mx(name) {
            return Err(Rejection::NoMxRecord { domain: domain() });
        }
        Ok(())
    }

    fn has_mx(&self, domain: &str) -> bool {
        let Some(mx) = &self.mx else {
            warn_event!(domain, "CheckForMX is set but no MX lookup is configured");
            return false;
        };
        match mx.has_mx(domain) {
            Ok(found) => found,
            Err(_err) => {
                debug_event!(domain, error = %_err, "MX lookup failed");
                false
            }
        }
    }
}

impl FieldCheck for MailAddressCheck {
    fn display_name(&self) -> &str {
        "Mail address"
    }

    fn declare_options(&self, store: &mut OptionStore) {
        GrammarConfig::declare(store);
    }

    fn check(
        &self,
        value: &str,
        options: &OptionStore,
        display_name: &str,
    ) -> Result<String, Rejection> {
        let config = GrammarConfig::derive(options);
        let parsed = parse_address(&config, value).map_err(|_err| {
            debug_event!(error = %_err, "mail address does not match the grammar");
            Rejection::InvalidFormat {
                display_name: display_name.to_string(),
            }
        })?;
        self.accept(&parsed, &config.policy)?;
        Ok(parsed.address())
    }
}

macro_rules! flag_setters {
    ($($(#[$meta:meta])* $fn:ident => $name:path;)+) => {
        $(
            $(#[$meta])*
            pub fn $fn(&mut self, value: bool) -> &mut Self {
                self.set_option($name, value)
            }
        )+
    };
}

fn string_list<I, S>(items: I) -> OptionValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OptionValue::Array(items.into_iter().map(|item| OptionValue::Str(item.into())).collect())
}

impl Validator<MailAddressCheck> {
    /// Mail address validator with `standard` applied on top of the defaults.
    pub fn with_preset(standard: Standard) -> Self {
        let mut validator = Self::default();
        validator.set_standard(standard);
        validator
    }

    /// Like [`Self::with_preset`], with the preset given by name
    /// (`basic`, `5321`/`rfc5321`, `5322`/`rfc5322`).
    pub fn with_standard(name: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_preset(Standard::from_str(name)?))
    }

    /// Overwrites the five grammar flags owned by `standard`.
    pub fn set_standard(&mut self, standard: Standard) -> &mut Self {
        self.update_options(|store| standard.apply(store))
    }

    flag_setters! {
        set_allow_quoted_string => opt::ALLOW_QUOTED_STRING;
        /// Takes precedence over `AllowQuotedString`.
        set_allow_obsolete => opt::ALLOW_OBSOLETE;
        set_require_basic_domain_name => opt::REQUIRE_BASIC_DOMAIN_NAME;
        set_allow_domain_literal => opt::ALLOW_DOMAIN_LITERAL;
        set_allow_comments_folding_whitespace => opt::ALLOW_COMMENTS_FOLDING_WHITESPACE;
        set_require_tld => opt::REQUIRE_TLD;
        set_require_known_tld => opt::REQUIRE_KNOWN_TLD;
        set_allow_local => opt::ALLOW_LOCAL;
        set_allow_reserved => opt::ALLOW_RESERVED;
        set_allow_geographic => opt::ALLOW_GEOGRAPHIC;
        set_allow_localized => opt::ALLOW_LOCALIZED;
        set_allow_dynamic => opt::ALLOW_DYNAMIC;
        /// Needs an MX lookup, see [`Self::set_mx_lookup`].
        set_check_for_mx => opt::CHECK_FOR_MX;
    }

    /// TLDs are compared case-insensitively, a leading '.' is ignored.
    pub fn set_tld_blacklist<I, S>(&mut self, tlds: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_option(opt::TLD_BLACKLIST, string_list(tlds))
    }

    /// Entries match the second-level domain or the full domain.
    pub fn set_domain_blacklist<I, S>(&mut self, domains: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_option(opt::DOMAIN_BLACKLIST, string_list(domains))
    }

    pub fn set_classifier(
        &mut self,
        classifier: Arc<dyn DomainClassifier + Send + Sync>,
    ) -> &mut Self {
        self.check_mut().classifier = classifier;
        self
    }

    pub fn set_mx_lookup(&mut self, mx: Arc<dyn MxLookup + Send + Sync>) -> &mut Self {
        self.check_mut().mx = Some(mx);
        self
    }

    /// The grammar the next validation will use.
    pub fn grammar(&self) -> GrammarConfig {
        GrammarConfig::derive(self.options())
    }
}

#[cfg(test)]
mod tests;
